pub mod comparison;

pub use comparison::{BridgeProfile, ComparisonRequest, ComparisonResult, WordProfile};
