// Core algorithm exports
pub mod controller;
pub mod matcher;
pub mod normalize;
pub mod scoring;

pub use controller::{Action, CheckController, CheckEvent, CheckState};
pub use matcher::DuplicateMatcher;
pub use normalize::{breed_set, jaccard, normalize};
pub use scoring::{score_record, ScoreBreakdown};
