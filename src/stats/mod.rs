// Stats module - per-player lookups and the derived figures built from them

pub mod match_history;
pub mod ranked;
pub mod engine;

// Re-export public types and functions
pub use engine::DerivedStats;
pub use match_history::MatchHistoryBundle;
pub use ranked::RankedStanding;
