use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use crate::error::ScoreError;
use crate::models::{new_id, BatterRef, Game, GameKind, InningLedger, PitchingRecord, Team};

pub const MAX_BATTING_ORDER: usize = 9;

fn default_true() -> bool {
    true
}

/// Everything the scorer fills in before the first pitch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub tournament: Option<String>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_true")]
    pub batted_first: bool,
    /// Player ids in batting order.
    #[serde(default)]
    pub batting_order: Vec<String>,
    /// Player ids present at the game. Everyone in the batting order is
    /// present whether listed here or not.
    #[serde(default)]
    pub attending: Vec<String>,
    #[serde(default)]
    pub pitcher_id: Option<String>,
}

fn required(value: &str, field: &'static str) -> Result<String, ScoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ScoreError::MissingField(field));
    }
    Ok(value.to_string())
}

impl Team {
    /// Validates `setup` against the roster and appends the new game. Nothing
    /// changes on the team when validation fails.
    pub fn start_game(&mut self, setup: &GameSetup) -> Result<&Game, ScoreError> {
        let date = setup.date.ok_or(ScoreError::MissingField("date"))?;
        let location = required(&setup.location, "location")?;
        let opponent = required(&setup.opponent, "opponent")?;
        let kind = if setup.official {
            GameKind::Official {
                tournament: required(setup.tournament.as_deref().unwrap_or(""), "tournament")?,
                round: setup
                    .round
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string),
            }
        } else {
            GameKind::Practice
        };

        let order_len = setup.batting_order.len();
        if order_len == 0 || order_len > MAX_BATTING_ORDER {
            return Err(ScoreError::BattingOrderSize { got: order_len, max: MAX_BATTING_ORDER });
        }
        let mut batting_order: Vec<BatterRef> = Vec::with_capacity(order_len);
        for id in &setup.batting_order {
            if batting_order.iter().any(|b| &b.id == id) {
                return Err(ScoreError::DuplicateInOrder(id.clone()));
            }
            let player = self.player(id).ok_or_else(|| ScoreError::NotOnRoster(id.clone()))?;
            batting_order.push(BatterRef::from(player));
        }

        let mut roster_for_game: Vec<BatterRef> = Vec::new();
        for id in setup.attending.iter().chain(&setup.batting_order) {
            if roster_for_game.iter().any(|b| &b.id == id) {
                continue;
            }
            let player = self.player(id).ok_or_else(|| ScoreError::NotOnRoster(id.clone()))?;
            roster_for_game.push(BatterRef::from(player));
        }

        let pitcher_id = setup.pitcher_id.as_deref().ok_or(ScoreError::MissingField("pitcher"))?;
        let pitcher = self
            .player(pitcher_id)
            .ok_or_else(|| ScoreError::PitcherNotOnRoster(pitcher_id.to_string()))?;

        let game = Game {
            id: new_id(),
            date,
            kind,
            opponent,
            location,
            batted_first: setup.batted_first,
            batting_order,
            roster_for_game,
            innings: vec![InningLedger::new(1)],
            pitching_records: vec![PitchingRecord::new(pitcher)],
            pitching_record: None,
            current_pitcher_id: pitcher.id.clone(),
            team_total_runs: 0,
            team_total_hits: 0,
            opponent_total_runs: 0,
            opponent_total_hits: 0,
            current_inning: 1,
            is_team_batting: setup.batted_first,
            current_batter_index: 0,
            current_outs: 0,
            finished: false,
            created_at: Utc::now(),
        };

        self.recent_locations.remember(&game.location);
        self.recent_opponents.remember(&game.opponent);
        if let GameKind::Official { tournament, .. } = &game.kind {
            self.recent_tournaments.remember(tournament);
        }
        info!(team = %self.id, game = %game.id, opponent = %game.opponent, "game created");

        self.games.push(game);
        Ok(&self.games[self.games.len() - 1])
    }
}
