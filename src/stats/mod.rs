//! Career statistics folded out of a team's game history. Everything here is
//! a pure function of the games passed in.

use serde::Serialize;

use crate::models::{Game, Player, Team};
use crate::scoring::{AtBatOutcome, InningsPitched};

/// Which on-base percentage formula to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OnBaseFormula {
    /// (H + BB) / (AB + BB)
    AtBatsPlusWalks,
    /// (H + BB) / PA, so sacrifices and errors weigh on the rate too.
    PlateAppearances,
}

/// Formula used for reported OBP and OPS.
pub const ON_BASE_FORMULA: OnBaseFormula = OnBaseFormula::AtBatsPlusWalks;

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Three decimals without the leading zero: `.267`, `1.000`.
pub fn format_rate(value: f64) -> String {
    let s = format!("{value:.3}");
    match s.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => s,
    }
}

/// OPS keeps its leading digit: `0.767`.
pub fn format_ops(value: f64) -> String {
    format!("{value:.3}")
}

pub fn format_era(value: f64) -> String {
    format!("{value:.2}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingLine {
    /// Games with at least one plate appearance.
    pub games_appeared: u32,
    /// Games the player was declared present for at setup.
    pub games_attended: u32,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub reached_on_error: u32,
    pub sacrifices: u32,
    pub rbi: u32,
    pub stolen_bases: u32,
}

impl BattingLine {
    fn add(&mut self, outcome: AtBatOutcome, rbi: u32, stolen_bases: u32) {
        self.plate_appearances += 1;
        self.rbi += rbi;
        self.stolen_bases += stolen_bases;
        if outcome.counts_as_at_bat() {
            self.at_bats += 1;
        }
        match outcome {
            AtBatOutcome::Single => self.singles += 1,
            AtBatOutcome::Double => self.doubles += 1,
            AtBatOutcome::Triple => self.triples += 1,
            AtBatOutcome::HomeRun => self.home_runs += 1,
            AtBatOutcome::Walk => self.walks += 1,
            AtBatOutcome::Error => self.reached_on_error += 1,
            AtBatOutcome::Sacrifice => self.sacrifices += 1,
            AtBatOutcome::Out | AtBatOutcome::DoublePlay | AtBatOutcome::TriplePlay => {}
        }
        if outcome.is_hit() {
            self.hits += 1;
        }
    }

    pub fn total_bases(&self) -> u32 {
        self.singles + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }

    pub fn batting_average(&self) -> f64 {
        ratio(self.hits, self.at_bats)
    }

    pub fn on_base_percentage(&self, formula: OnBaseFormula) -> f64 {
        let on_base = self.hits + self.walks;
        match formula {
            OnBaseFormula::AtBatsPlusWalks => ratio(on_base, self.at_bats + self.walks),
            OnBaseFormula::PlateAppearances => ratio(on_base, self.plate_appearances),
        }
    }

    pub fn slugging(&self) -> f64 {
        ratio(self.total_bases(), self.at_bats)
    }

    pub fn ops(&self, formula: OnBaseFormula) -> f64 {
        self.on_base_percentage(formula) + self.slugging()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingLine {
    pub appearances: u32,
    pub innings_pitched: InningsPitched,
    pub strikeouts: u32,
    pub runs_allowed: u32,
    pub earned_runs: u32,
    pub hits_allowed: u32,
}

impl PitchingLine {
    /// Earned runs per nine innings; zero when no outs have been recorded.
    pub fn era(&self) -> f64 {
        if self.innings_pitched.is_zero() {
            return 0.0;
        }
        self.earned_runs as f64 / self.innings_pitched.as_innings() * 9.0
    }
}

pub fn batting_line(games: &[Game], player_id: &str) -> BattingLine {
    let mut line = BattingLine::default();
    for game in games {
        let mut appeared = false;
        for at_bat in game.innings.iter().flat_map(|i| &i.at_bats) {
            if at_bat.player_id == player_id {
                appeared = true;
                line.add(at_bat.outcome, at_bat.rbi, at_bat.stolen_bases);
            }
        }
        if appeared {
            line.games_appeared += 1;
        }
        if game.roster_for_game.iter().any(|b| b.id == player_id) {
            line.games_attended += 1;
        }
    }
    line
}

pub fn pitching_line(games: &[Game], player_id: &str) -> PitchingLine {
    let mut line = PitchingLine::default();
    for game in games {
        let mut pitched = false;
        for record in game.pitching_lines().filter(|r| r.player_id == player_id) {
            pitched = true;
            line.innings_pitched = line.innings_pitched + record.innings_pitched;
            line.strikeouts += record.strikeouts;
            line.runs_allowed += record.runs_allowed;
            line.earned_runs += record.earned_runs;
            line.hits_allowed += record.hits_allowed;
        }
        if pitched {
            line.appearances += 1;
        }
    }
    line
}

/// Flagged as a pitcher, or has taken the mound in at least one game.
pub fn has_pitching_experience(player: &Player, games: &[Game]) -> bool {
    player.is_pitcher
        || games
            .iter()
            .any(|g| g.pitching_lines().any(|r| r.player_id == player.id))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingReport {
    #[serde(flatten)]
    pub line: BattingLine,
    pub average: String,
    pub on_base: String,
    pub slugging: String,
    pub ops: String,
    pub on_base_formula: OnBaseFormula,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingReport {
    #[serde(flatten)]
    pub line: PitchingLine,
    pub innings_display: String,
    pub era: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsReport {
    pub player_id: String,
    pub player_name: String,
    pub number: Option<u32>,
    pub batting: BattingReport,
    /// Present only for players with pitching experience.
    pub pitching: Option<PitchingReport>,
}

pub fn player_report(team: &Team, player: &Player) -> PlayerStatsReport {
    let line = batting_line(&team.games, &player.id);
    let batting = BattingReport {
        average: format_rate(line.batting_average()),
        on_base: format_rate(line.on_base_percentage(ON_BASE_FORMULA)),
        slugging: format_rate(line.slugging()),
        ops: format_ops(line.ops(ON_BASE_FORMULA)),
        on_base_formula: ON_BASE_FORMULA,
        line,
    };

    let pitching = has_pitching_experience(player, &team.games).then(|| {
        let line = pitching_line(&team.games, &player.id);
        PitchingReport {
            innings_display: line.innings_pitched.to_string(),
            era: format_era(line.era()),
            line,
        }
    });

    PlayerStatsReport {
        player_id: player.id.clone(),
        player_name: player.name.clone(),
        number: player.number,
        batting,
        pitching,
    }
}
