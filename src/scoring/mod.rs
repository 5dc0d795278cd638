//! In-game scoring: the outcome catalog, the innings-pitched encoding, the
//! game state machine and roster/setup validation.

pub mod game;
pub mod innings_pitched;
pub mod outcome;
pub mod roster;
pub mod scoreboard;
pub mod setup;

pub use game::{GameAction, Half, InningField, PitchingField, Staged, OUTS_PER_SIDE};
pub use innings_pitched::InningsPitched;
pub use outcome::{AtBatOutcome, OutcomeCategory};
pub use scoreboard::Scoreboard;
pub use setup::{GameSetup, MAX_BATTING_ORDER};
