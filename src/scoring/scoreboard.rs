use serde::Serialize;

use crate::models::Game;

/// Columns always shown, even before the later innings are reached.
pub const SCOREBOARD_MIN_INNINGS: usize = 7;

/// Line score for one game. A cell is `None` (shown as a dash) until its
/// half-inning is complete.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    pub team_name: String,
    pub opponent: String,
    pub batted_first: bool,
    pub innings: Vec<ScoreboardColumn>,
    pub team_runs: u32,
    pub team_hits: u32,
    pub opponent_runs: u32,
    pub opponent_hits: u32,
    pub current_inning: u32,
    pub current_outs: u32,
    pub is_team_batting: bool,
    pub finished: bool,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardColumn {
    pub number: u32,
    pub team: Option<u32>,
    pub opponent: Option<u32>,
}

impl Scoreboard {
    pub fn for_game(team_name: &str, game: &Game) -> Self {
        let columns = game.innings.len().max(SCOREBOARD_MIN_INNINGS);
        let innings = (0..columns)
            .map(|i| {
                let number = i as u32 + 1;
                match game.innings.get(i) {
                    Some(ledger) => {
                        let (team_done, opponent_done) = if game.batted_first {
                            (ledger.top_complete, ledger.bottom_complete)
                        } else {
                            (ledger.bottom_complete, ledger.top_complete)
                        };
                        ScoreboardColumn {
                            number,
                            team: team_done.then_some(ledger.team_runs),
                            opponent: opponent_done.then_some(ledger.opponent_runs),
                        }
                    }
                    None => ScoreboardColumn { number, team: None, opponent: None },
                }
            })
            .collect();

        Self {
            team_name: team_name.to_string(),
            opponent: game.opponent.clone(),
            batted_first: game.batted_first,
            innings,
            team_runs: game.team_total_runs,
            team_hits: game.team_total_hits,
            opponent_runs: game.opponent_total_runs,
            opponent_hits: game.opponent_total_hits,
            current_inning: game.current_inning,
            current_outs: game.current_outs,
            is_team_batting: game.is_team_batting,
            finished: game.finished,
        }
    }
}
