pub mod session;

pub use session::{GameEnd, GameRecord, SessionMetrics};
