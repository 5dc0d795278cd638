use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::scoring::{AtBatOutcome, InningsPitched};

/// How many recent locations, opponents and tournament names a team keeps.
pub const RECENT_ENTRIES_CAP: usize = 20;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Team aggregate: roster plus full game history. Persisted as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub recent_locations: RecentList,
    #[serde(default)]
    pub recent_opponents: RecentList,
    #[serde(default)]
    pub recent_tournaments: RecentList,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub is_pitcher: bool,
    /// Opaque reference handed back by the image store.
    #[serde(default)]
    pub photo: Option<String>,
}

/// A player as captured at the moment of an event. Later roster edits do not
/// rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: Option<u32>,
}

impl From<&Player> for BatterRef {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            number: player.number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum GameKind {
    Practice,
    Official {
        tournament: String,
        #[serde(default)]
        round: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub date: NaiveDate,
    pub kind: GameKind,
    pub opponent: String,
    pub location: String,
    pub batted_first: bool,
    /// Batting order snapshot taken at setup. Frozen for the whole game.
    pub batting_order: Vec<BatterRef>,
    /// Players declared present at setup, whether or not they bat.
    #[serde(default)]
    pub roster_for_game: Vec<BatterRef>,
    pub innings: Vec<InningLedger>,
    #[serde(default)]
    pub pitching_records: Vec<PitchingRecord>,
    /// Older documents carry exactly one record under this key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitching_record: Option<PitchingRecord>,
    pub current_pitcher_id: String,
    #[serde(default)]
    pub team_total_runs: u32,
    #[serde(default)]
    pub team_total_hits: u32,
    #[serde(default)]
    pub opponent_total_runs: u32,
    #[serde(default)]
    pub opponent_total_hits: u32,
    pub current_inning: u32,
    pub is_team_batting: bool,
    pub current_batter_index: usize,
    pub current_outs: u32,
    #[serde(default)]
    pub finished: bool,
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// Every pitching line in this game, whichever shape the document used.
    pub fn pitching_lines(&self) -> impl Iterator<Item = &PitchingRecord> {
        self.pitching_record.iter().chain(self.pitching_records.iter())
    }

    pub fn current_pitcher(&self) -> Option<&PitchingRecord> {
        self.pitching_records.iter().find(|r| r.player_id == self.current_pitcher_id)
    }

    pub fn current_batter(&self) -> Option<&BatterRef> {
        self.batting_order.get(self.current_batter_index)
    }

    pub fn current_inning_ledger(&self) -> Option<&InningLedger> {
        self.innings.get(self.current_inning_index())
    }

    pub(crate) fn current_inning_index(&self) -> usize {
        (self.current_inning.max(1) - 1) as usize
    }

    pub fn year(&self) -> i32 {
        chrono::Datelike::year(&self.date)
    }
}

/// One inning, both halves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningLedger {
    pub number: u32,
    #[serde(default)]
    pub team_runs: u32,
    #[serde(default)]
    pub team_hits: u32,
    #[serde(default)]
    pub opponent_runs: u32,
    #[serde(default)]
    pub opponent_hits: u32,
    #[serde(default)]
    pub at_bats: Vec<AtBat>,
    #[serde(default)]
    pub top_complete: bool,
    #[serde(default)]
    pub bottom_complete: bool,
}

impl InningLedger {
    pub fn new(number: u32) -> Self {
        Self { number, ..Default::default() }
    }

    pub fn rbi_total(&self) -> u32 {
        self.at_bats.iter().map(|ab| ab.rbi).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtBat {
    pub id: String,
    pub player_id: String,
    pub player_name: String,
    #[serde(rename = "result")]
    pub outcome: AtBatOutcome,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub stolen_bases: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingRecord {
    pub player_id: String,
    pub player_name: String,
    #[serde(default)]
    pub innings_pitched: InningsPitched,
    #[serde(default)]
    pub strikeouts: u32,
    #[serde(default)]
    pub runs_allowed: u32,
    #[serde(default)]
    pub earned_runs: u32,
    #[serde(default)]
    pub hits_allowed: u32,
}

impl PitchingRecord {
    pub fn new(pitcher: &Player) -> Self {
        Self {
            player_id: pitcher.id.clone(),
            player_name: pitcher.name.clone(),
            innings_pitched: InningsPitched::ZERO,
            strikeouts: 0,
            runs_allowed: 0,
            earned_runs: 0,
            hits_allowed: 0,
        }
    }
}

/// Newest-first list of distinct strings, capped at [`RECENT_ENTRIES_CAP`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentList(VecDeque<String>);

impl RecentList {
    /// Adds `entry` at the front unless it is already listed. The oldest
    /// entry falls off once the cap is exceeded.
    pub fn remember(&mut self, entry: &str) {
        let entry = entry.trim();
        if entry.is_empty() || self.0.iter().any(|e| e == entry) {
            return;
        }
        self.0.push_front(entry.to_string());
        self.0.truncate(RECENT_ENTRIES_CAP);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeam {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerForm {
    pub name: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub is_pitcher: bool,
}

/// Summary row for team listings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub player_count: usize,
    pub game_count: usize,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.clone(),
            name: team.name.clone(),
            player_count: team.players.len(),
            game_count: team.games.len(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: String,
    pub date: NaiveDate,
    pub opponent: String,
    pub location: String,
    pub kind: GameKind,
    pub team_runs: u32,
    pub opponent_runs: u32,
    pub finished: bool,
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            date: game.date,
            opponent: game.opponent.clone(),
            location: game.location.clone(),
            kind: game.kind.clone(),
            team_runs: game.team_total_runs,
            opponent_runs: game.opponent_total_runs,
            finished: game.finished,
        }
    }
}
