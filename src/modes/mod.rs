pub mod human;

pub use human::{GameOverChoice, HumanMode, RoundOutcome};
