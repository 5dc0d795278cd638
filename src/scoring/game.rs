use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ScoreError;
use crate::models::{new_id, AtBat, Game, InningLedger, PitchingRecord, Player};
use crate::scoring::AtBatOutcome;

/// Outs that retire a side.
pub const OUTS_PER_SIDE: u32 = 3;

/// Run and steal counts staged by the scorer before committing an at-bat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staged {
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub stolen_bases: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Half {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PitchingField {
    InningsPitched,
    Strikeouts,
    RunsAllowed,
    EarnedRuns,
    HitsAllowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InningField {
    TeamRuns,
    TeamHits,
    OpponentRuns,
    OpponentHits,
}

/// One scorer action against a live game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameAction {
    RecordAtBat {
        outcome: AtBatOutcome,
        #[serde(default)]
        rbi: u32,
        #[serde(default)]
        stolen_bases: u32,
    },
    EditAtBat {
        /// Zero-based inning index; the current inning when omitted.
        #[serde(default)]
        inning: Option<usize>,
        index: usize,
        outcome: AtBatOutcome,
        #[serde(default)]
        rbi: u32,
        #[serde(default)]
        stolen_bases: u32,
    },
    AdjustOpponentRuns { delta: i32 },
    AdjustOpponentHits { delta: i32 },
    AdjustOuts { delta: i32 },
    AdjustPitching { field: PitchingField, delta: i32 },
    ChangePitcher { player_id: String },
    SideChange,
    EditInning { inning: usize, field: InningField, delta: i32 },
    Finish,
    Resume,
}

fn apply_delta(value: &mut u32, delta: i32) {
    *value = if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    };
}

impl Game {
    /// Dispatches a scorer action. `roster` is the owning team's live roster,
    /// consulted only when a pitcher is brought in.
    pub fn apply(&mut self, action: GameAction, roster: &[Player]) -> Result<(), ScoreError> {
        match action {
            GameAction::RecordAtBat { outcome, rbi, stolen_bases } => {
                self.record_at_bat(outcome, Staged { rbi, stolen_bases }).map(|_| ())
            }
            GameAction::EditAtBat { inning, index, outcome, rbi, stolen_bases } => match inning {
                Some(inning) => self.edit_at_bat_in(inning, index, outcome, rbi, stolen_bases),
                None => self.edit_at_bat(index, outcome, rbi, stolen_bases),
            },
            GameAction::AdjustOpponentRuns { delta } => self.adjust_opponent_runs(delta),
            GameAction::AdjustOpponentHits { delta } => self.adjust_opponent_hits(delta),
            GameAction::AdjustOuts { delta } => self.adjust_outs(delta),
            GameAction::AdjustPitching { field, delta } => self.adjust_pitching_stat(field, delta),
            GameAction::ChangePitcher { player_id } => self.change_pitcher(roster, &player_id),
            GameAction::SideChange => self.perform_side_change(),
            GameAction::EditInning { inning, field, delta } => {
                self.edit_inning_directly(inning, field, delta)
            }
            GameAction::Finish => {
                self.finish();
                Ok(())
            }
            GameAction::Resume => {
                self.resume();
                Ok(())
            }
        }
    }

    fn ensure_open(&self) -> Result<(), ScoreError> {
        if self.finished {
            return Err(ScoreError::GameFinished);
        }
        Ok(())
    }

    /// Which half of the current inning is being played.
    pub fn current_half(&self) -> Half {
        if self.is_team_batting == self.batted_first {
            Half::Top
        } else {
            Half::Bottom
        }
    }

    fn current_ledger_mut(&mut self) -> &mut InningLedger {
        let idx = self.current_inning_index();
        while self.innings.len() <= idx {
            let number = self.innings.len() as u32 + 1;
            self.innings.push(InningLedger::new(number));
        }
        &mut self.innings[idx]
    }

    /// Rebuilds game totals from the inning ledgers.
    pub fn recompute_totals(&mut self) {
        self.team_total_runs = self.innings.iter().map(|i| i.team_runs).sum();
        self.team_total_hits = self.innings.iter().map(|i| i.team_hits).sum();
        self.opponent_total_runs = self.innings.iter().map(|i| i.opponent_runs).sum();
        self.opponent_total_hits = self.innings.iter().map(|i| i.opponent_hits).sum();
    }

    pub fn record_at_bat(
        &mut self,
        outcome: AtBatOutcome,
        staged: Staged,
    ) -> Result<AtBat, ScoreError> {
        self.ensure_open()?;
        if !self.is_team_batting {
            return Err(ScoreError::NotBatting);
        }
        if self.current_outs >= OUTS_PER_SIDE {
            return Err(ScoreError::SideRetired);
        }
        let batter = self.current_batter().cloned().ok_or(ScoreError::NoCurrentBatter)?;

        let at_bat = AtBat {
            id: new_id(),
            player_id: batter.id,
            player_name: batter.name,
            outcome,
            rbi: staged.rbi,
            stolen_bases: staged.stolen_bases,
        };
        debug!(game = %self.id, batter = %at_bat.player_name, ?outcome, rbi = staged.rbi, "at-bat recorded");

        let ledger = self.current_ledger_mut();
        ledger.at_bats.push(at_bat.clone());
        if outcome.is_hit() {
            ledger.team_hits += 1;
        }
        ledger.team_runs = ledger.rbi_total();

        self.current_outs = (self.current_outs + outcome.outs()).min(OUTS_PER_SIDE);
        self.current_batter_index = (self.current_batter_index + 1) % self.batting_order.len();
        self.recompute_totals();
        Ok(at_bat)
    }

    /// Edits an at-bat of the current inning.
    pub fn edit_at_bat(
        &mut self,
        index: usize,
        outcome: AtBatOutcome,
        rbi: u32,
        stolen_bases: u32,
    ) -> Result<(), ScoreError> {
        let inning = self.current_inning_index();
        self.edit_at_bat_in(inning, index, outcome, rbi, stolen_bases)
    }

    /// Rewrites a committed at-bat. The batter, the batting-order cursor and
    /// the out count stay as they are.
    pub fn edit_at_bat_in(
        &mut self,
        inning: usize,
        index: usize,
        outcome: AtBatOutcome,
        rbi: u32,
        stolen_bases: u32,
    ) -> Result<(), ScoreError> {
        self.ensure_open()?;
        let ledger = self.innings.get_mut(inning).ok_or(ScoreError::InningNotFound(inning))?;
        let at_bat = ledger.at_bats.get_mut(index).ok_or(ScoreError::AtBatNotFound(index))?;

        match (at_bat.outcome.is_hit(), outcome.is_hit()) {
            (true, false) => ledger.team_hits = ledger.team_hits.saturating_sub(1),
            (false, true) => ledger.team_hits += 1,
            _ => {}
        }
        at_bat.outcome = outcome;
        at_bat.rbi = rbi;
        at_bat.stolen_bases = stolen_bases;
        ledger.team_runs = ledger.rbi_total();

        debug!(game = %self.id, inning, index, ?outcome, rbi, "at-bat edited");
        self.recompute_totals();
        Ok(())
    }

    pub fn adjust_opponent_runs(&mut self, delta: i32) -> Result<(), ScoreError> {
        self.adjust_opponent(delta, InningField::OpponentRuns)
    }

    pub fn adjust_opponent_hits(&mut self, delta: i32) -> Result<(), ScoreError> {
        self.adjust_opponent(delta, InningField::OpponentHits)
    }

    fn adjust_opponent(&mut self, delta: i32, field: InningField) -> Result<(), ScoreError> {
        self.ensure_open()?;
        if self.is_team_batting {
            return Err(ScoreError::NotFielding);
        }
        let ledger = self.current_ledger_mut();
        match field {
            InningField::OpponentHits => apply_delta(&mut ledger.opponent_hits, delta),
            _ => apply_delta(&mut ledger.opponent_runs, delta),
        }
        self.recompute_totals();
        Ok(())
    }

    /// Manual out correction. Never changes sides, even at three outs.
    pub fn adjust_outs(&mut self, delta: i32) -> Result<(), ScoreError> {
        self.ensure_open()?;
        apply_delta(&mut self.current_outs, delta);
        self.current_outs = self.current_outs.min(OUTS_PER_SIDE);
        Ok(())
    }

    /// Folds a single-record document into the per-pitcher list.
    fn adopt_legacy_pitching(&mut self) {
        if let Some(record) = self.pitching_record.take() {
            if !self.pitching_records.iter().any(|r| r.player_id == record.player_id) {
                self.pitching_records.insert(0, record);
            }
        }
    }

    pub fn adjust_pitching_stat(&mut self, field: PitchingField, delta: i32) -> Result<(), ScoreError> {
        self.ensure_open()?;
        self.adopt_legacy_pitching();
        let pitcher_id = self.current_pitcher_id.clone();
        let record = self
            .pitching_records
            .iter_mut()
            .find(|r| r.player_id == pitcher_id)
            .ok_or(ScoreError::NoCurrentPitcher)?;

        match field {
            PitchingField::InningsPitched => record.innings_pitched.step(delta),
            PitchingField::Strikeouts => apply_delta(&mut record.strikeouts, delta),
            PitchingField::RunsAllowed => apply_delta(&mut record.runs_allowed, delta),
            PitchingField::EarnedRuns => apply_delta(&mut record.earned_runs, delta),
            PitchingField::HitsAllowed => apply_delta(&mut record.hits_allowed, delta),
        }
        debug!(game = %self.id, pitcher = %record.player_name, ?field, delta, "pitching adjusted");
        Ok(())
    }

    /// Brings `player_id` in to pitch. Earlier pitchers keep their lines.
    pub fn change_pitcher(&mut self, roster: &[Player], player_id: &str) -> Result<(), ScoreError> {
        self.ensure_open()?;
        let pitcher = roster
            .iter()
            .find(|p| p.id == player_id)
            .ok_or_else(|| ScoreError::PitcherNotOnRoster(player_id.to_string()))?;

        self.adopt_legacy_pitching();
        if !self.pitching_records.iter().any(|r| r.player_id == pitcher.id) {
            self.pitching_records.push(PitchingRecord::new(pitcher));
        }
        self.current_pitcher_id = pitcher.id.clone();
        info!(game = %self.id, pitcher = %pitcher.name, "pitching change");
        Ok(())
    }

    /// Ends the current half-inning. Finishing a bottom half opens the next
    /// inning.
    pub fn perform_side_change(&mut self) -> Result<(), ScoreError> {
        self.ensure_open()?;
        let half = self.current_half();
        let ledger = self.current_ledger_mut();
        match half {
            Half::Top => ledger.top_complete = true,
            Half::Bottom => ledger.bottom_complete = true,
        }

        if half == Half::Bottom {
            self.current_inning += 1;
            self.current_ledger_mut();
        }
        self.is_team_batting = !self.is_team_batting;
        self.current_outs = 0;
        self.recompute_totals();

        info!(game = %self.id, inning = self.current_inning, batting = self.is_team_batting, "side change");
        Ok(())
    }

    /// Correction of a committed inning's counters, bypassing the at-bat log.
    /// The inning's runs may then no longer match its at-bats' RBI.
    pub fn edit_inning_directly(
        &mut self,
        inning: usize,
        field: InningField,
        delta: i32,
    ) -> Result<(), ScoreError> {
        self.ensure_open()?;
        let ledger = self.innings.get_mut(inning).ok_or(ScoreError::InningNotFound(inning))?;
        let value = match field {
            InningField::TeamRuns => &mut ledger.team_runs,
            InningField::TeamHits => &mut ledger.team_hits,
            InningField::OpponentRuns => &mut ledger.opponent_runs,
            InningField::OpponentHits => &mut ledger.opponent_hits,
        };
        apply_delta(value, delta);
        info!(game = %self.id, inning, ?field, delta, "inning edited directly");
        self.recompute_totals();
        Ok(())
    }

    pub fn finish(&mut self) {
        self.recompute_totals();
        let half = self.current_half();
        let ledger = self.current_ledger_mut();
        match half {
            Half::Top => ledger.top_complete = true,
            Half::Bottom => ledger.bottom_complete = true,
        }
        self.finished = true;
        info!(game = %self.id, runs = self.team_total_runs, opponent_runs = self.opponent_total_runs, "game finished");
    }

    pub fn resume(&mut self) {
        if !self.finished {
            return;
        }
        let half = self.current_half();
        let ledger = self.current_ledger_mut();
        match half {
            Half::Top => ledger.top_complete = false,
            Half::Bottom => ledger.bottom_complete = false,
        }
        self.finished = false;
        info!(game = %self.id, "game resumed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatterRef, GameKind};
    use crate::scoring::InningsPitched;
    use chrono::{NaiveDate, Utc};

    fn player(id: &str, name: &str) -> Player {
        Player { id: id.into(), name: name.into(), number: None, is_pitcher: false, photo: None }
    }

    fn game_with(order: &[&Player], batted_first: bool) -> Game {
        let pitcher = player("p", "Pitcher");
        Game {
            id: "g".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            kind: GameKind::Practice,
            opponent: "Owls".into(),
            location: "Riverside".into(),
            batted_first,
            batting_order: order.iter().map(|p| BatterRef::from(*p)).collect(),
            roster_for_game: vec![],
            innings: vec![InningLedger::new(1)],
            pitching_records: vec![PitchingRecord::new(&pitcher)],
            pitching_record: None,
            current_pitcher_id: pitcher.id,
            team_total_runs: 0,
            team_total_hits: 0,
            opponent_total_runs: 0,
            opponent_total_hits: 0,
            current_inning: 1,
            is_team_batting: batted_first,
            current_batter_index: 0,
            current_outs: 0,
            finished: false,
            created_at: Utc::now(),
        }
    }

    fn assert_runs_consistent(game: &Game) {
        for inning in &game.innings {
            assert_eq!(inning.rbi_total(), inning.team_runs);
        }
        assert_eq!(game.innings.iter().map(|i| i.team_runs).sum::<u32>(), game.team_total_runs);
    }

    #[test]
    fn single_then_home_run_with_staged_rbi() {
        let (a, b) = (player("a", "Abe"), player("b", "Ban"));
        let mut game = game_with(&[&a, &b], true);

        game.record_at_bat(AtBatOutcome::Single, Staged::default()).unwrap();
        game.record_at_bat(AtBatOutcome::HomeRun, Staged { rbi: 1, stolen_bases: 0 }).unwrap();

        let inning = &game.innings[0];
        assert_eq!(inning.team_hits, 2);
        assert_eq!(inning.team_runs, 1);
        assert_eq!(game.current_batter_index, 0);
        assert_eq!(game.current_outs, 0);
        assert_eq!(inning.at_bats[1].player_name, "Ban");
        assert_eq!(game.team_total_hits, 2);
    }

    #[test]
    fn three_outs_stay_recorded_without_turnover() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        for _ in 0..3 {
            game.record_at_bat(AtBatOutcome::Out, Staged::default()).unwrap();
        }
        assert_eq!(game.current_outs, 3);
        assert!(game.is_team_batting);
        assert_runs_consistent(&game);
        assert_eq!(
            game.record_at_bat(AtBatOutcome::Single, Staged::default()).unwrap_err(),
            ScoreError::SideRetired
        );
    }

    #[test]
    fn batting_order_cycles_modulo_roster() {
        let roster: Vec<Player> = (0..4).map(|i| player(&format!("p{i}"), "X")).collect();
        let refs: Vec<&Player> = roster.iter().collect();
        let mut game = game_with(&refs, true);
        let outcomes = [AtBatOutcome::Walk, AtBatOutcome::Single, AtBatOutcome::Error];
        for n in 1..=11usize {
            if game.current_outs >= OUTS_PER_SIDE {
                game.perform_side_change().unwrap();
                game.perform_side_change().unwrap();
            }
            let staged = Staged { rbi: (n % 2) as u32, stolen_bases: 0 };
            game.record_at_bat(outcomes[n % outcomes.len()], staged).unwrap();
            assert_eq!(game.current_batter_index, n % 4);
            assert_runs_consistent(&game);
        }
    }

    #[test]
    fn triple_play_caps_outs_at_three() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        game.record_at_bat(AtBatOutcome::DoublePlay, Staged::default()).unwrap();
        game.record_at_bat(AtBatOutcome::TriplePlay, Staged::default()).unwrap();
        assert_eq!(game.current_outs, 3);
    }

    #[test]
    fn empty_order_has_no_batter() {
        let mut game = game_with(&[], true);
        assert_eq!(
            game.record_at_bat(AtBatOutcome::Single, Staged::default()).unwrap_err(),
            ScoreError::NoCurrentBatter
        );
        assert!(game.innings[0].at_bats.is_empty());
    }

    #[test]
    fn editing_across_the_hit_boundary_moves_one_hit() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        game.record_at_bat(AtBatOutcome::Double, Staged::default()).unwrap();
        game.record_at_bat(AtBatOutcome::Out, Staged::default()).unwrap();
        assert_eq!(game.team_total_hits, 1);

        game.edit_at_bat(0, AtBatOutcome::Walk, 0, 0).unwrap();
        assert_eq!(game.innings[0].team_hits, 0);
        assert_eq!(game.team_total_hits, 0);

        game.edit_at_bat(1, AtBatOutcome::Triple, 2, 1).unwrap();
        assert_eq!(game.innings[0].team_hits, 1);
        assert_eq!(game.team_total_hits, 1);
        assert_eq!(game.team_total_runs, 2);
        assert_eq!(game.innings[0].at_bats[1].player_id, "a");
        assert_eq!(game.current_batter_index, 0);

        // hit to hit leaves the count alone
        game.edit_at_bat(1, AtBatOutcome::Single, 2, 1).unwrap();
        assert_eq!(game.team_total_hits, 1);
        assert_runs_consistent(&game);
    }

    #[test]
    fn edit_of_missing_at_bat_is_rejected() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        assert_eq!(
            game.edit_at_bat(0, AtBatOutcome::Out, 0, 0).unwrap_err(),
            ScoreError::AtBatNotFound(0)
        );
        assert_eq!(
            game.edit_at_bat_in(4, 0, AtBatOutcome::Out, 0, 0).unwrap_err(),
            ScoreError::InningNotFound(4)
        );
    }

    #[test]
    fn two_side_changes_advance_one_inning() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        game.record_at_bat(AtBatOutcome::Out, Staged::default()).unwrap();

        game.perform_side_change().unwrap();
        assert_eq!(game.current_inning, 1);
        assert!(!game.is_team_batting);
        assert_eq!(game.current_outs, 0);
        assert!(game.innings[0].top_complete);

        game.perform_side_change().unwrap();
        assert_eq!(game.current_inning, 2);
        assert!(game.is_team_batting);
        assert!(game.innings[0].bottom_complete);
        assert_eq!(game.innings.len(), 2);
        assert_eq!(game.innings[1].number, 2);
    }

    #[test]
    fn batting_second_starts_in_the_field() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], false);
        assert_eq!(game.current_half(), Half::Top);
        assert_eq!(
            game.record_at_bat(AtBatOutcome::Single, Staged::default()).unwrap_err(),
            ScoreError::NotBatting
        );

        game.adjust_opponent_runs(2).unwrap();
        game.perform_side_change().unwrap();
        assert_eq!(game.current_inning, 1);
        assert_eq!(game.current_half(), Half::Bottom);
        game.record_at_bat(AtBatOutcome::HomeRun, Staged { rbi: 1, stolen_bases: 0 }).unwrap();

        game.perform_side_change().unwrap();
        assert_eq!(game.current_inning, 2);
        assert!(!game.is_team_batting);
        assert_eq!((game.team_total_runs, game.opponent_total_runs), (1, 2));
    }

    #[test]
    fn opponent_counters_clamp_at_zero() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        assert_eq!(game.adjust_opponent_runs(1).unwrap_err(), ScoreError::NotFielding);

        game.perform_side_change().unwrap();
        game.adjust_opponent_runs(2).unwrap();
        game.adjust_opponent_runs(-5).unwrap();
        game.adjust_opponent_hits(3).unwrap();
        assert_eq!(game.opponent_total_runs, 0);
        assert_eq!(game.opponent_total_hits, 3);
    }

    #[test]
    fn pitching_adjustments_use_thirds() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        for _ in 0..3 {
            game.adjust_pitching_stat(PitchingField::InningsPitched, 1).unwrap();
        }
        game.adjust_pitching_stat(PitchingField::Strikeouts, 2).unwrap();
        game.adjust_pitching_stat(PitchingField::EarnedRuns, -1).unwrap();

        let record = game.current_pitcher().unwrap();
        assert_eq!(record.innings_pitched, InningsPitched::from_whole(1));
        assert_eq!(record.strikeouts, 2);
        assert_eq!(record.earned_runs, 0);

        for _ in 0..4 {
            game.adjust_pitching_stat(PitchingField::InningsPitched, -1).unwrap();
        }
        assert!(game.current_pitcher().unwrap().innings_pitched.is_zero());
    }

    #[test]
    fn relief_pitcher_gets_own_record() {
        let a = player("a", "Abe");
        let reliever = player("r", "Relief");
        let mut game = game_with(&[&a], true);
        game.adjust_pitching_stat(PitchingField::EarnedRuns, 2).unwrap();

        assert_eq!(
            game.change_pitcher(&[a.clone()], "r").unwrap_err(),
            ScoreError::PitcherNotOnRoster("r".into())
        );
        game.change_pitcher(&[a.clone(), reliever.clone()], "r").unwrap();
        game.adjust_pitching_stat(PitchingField::Strikeouts, 1).unwrap();

        assert_eq!(game.pitching_records.len(), 2);
        assert_eq!(game.pitching_records[0].earned_runs, 2);
        assert_eq!(game.pitching_records[1].strikeouts, 1);

        // bringing back the starter reuses the original line
        let starter = player("p", "Pitcher");
        game.change_pitcher(&[starter], "p").unwrap();
        assert_eq!(game.pitching_records.len(), 2);
        assert_eq!(game.current_pitcher().unwrap().earned_runs, 2);
    }

    #[test]
    fn direct_inning_edit_flows_into_totals() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        game.edit_inning_directly(0, InningField::TeamRuns, 4).unwrap();
        game.edit_inning_directly(0, InningField::OpponentHits, -1).unwrap();
        assert_eq!(game.team_total_runs, 4);
        assert_eq!(game.opponent_total_hits, 0);
        assert_eq!(
            game.edit_inning_directly(3, InningField::TeamRuns, 1).unwrap_err(),
            ScoreError::InningNotFound(3)
        );
    }

    #[test]
    fn manual_outs_clamp_without_turnover() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        game.adjust_outs(5).unwrap();
        assert_eq!(game.current_outs, 3);
        assert!(game.is_team_batting);
        game.adjust_outs(-4).unwrap();
        assert_eq!(game.current_outs, 0);
    }

    #[test]
    fn finished_game_rejects_mutations_until_resumed() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        game.finish();
        assert!(game.innings[0].top_complete);

        assert_eq!(
            game.record_at_bat(AtBatOutcome::Single, Staged::default()).unwrap_err(),
            ScoreError::GameFinished
        );
        assert_eq!(game.perform_side_change().unwrap_err(), ScoreError::GameFinished);
        assert_eq!(
            game.apply(GameAction::AdjustOuts { delta: 1 }, &[]).unwrap_err(),
            ScoreError::GameFinished
        );
        assert!(game.innings[0].at_bats.is_empty());

        game.resume();
        assert!(!game.innings[0].top_complete);
        game.record_at_bat(AtBatOutcome::Single, Staged::default()).unwrap();
    }

    #[test]
    fn legacy_record_is_adopted_on_first_pitching_change() {
        let a = player("a", "Abe");
        let mut game = game_with(&[&a], true);
        let legacy = game.pitching_records.remove(0);
        game.pitching_record = Some(legacy);

        game.adjust_pitching_stat(PitchingField::HitsAllowed, 1).unwrap();
        assert!(game.pitching_record.is_none());
        assert_eq!(game.pitching_records[0].hits_allowed, 1);
    }

    #[test]
    fn actions_parse_from_tagged_json() {
        let action: GameAction = serde_json::from_value(serde_json::json!({
            "action": "recordAtBat", "outcome": "homeRun", "rbi": 2
        }))
        .unwrap();
        assert_eq!(
            action,
            GameAction::RecordAtBat { outcome: AtBatOutcome::HomeRun, rbi: 2, stolen_bases: 0 }
        );

        let action: GameAction = serde_json::from_value(serde_json::json!({
            "action": "changePitcher", "playerId": "r"
        }))
        .unwrap();
        assert_eq!(action, GameAction::ChangePitcher { player_id: "r".into() });

        let action: GameAction =
            serde_json::from_value(serde_json::json!({ "action": "sideChange" })).unwrap();
        assert_eq!(action, GameAction::SideChange);
    }
}
