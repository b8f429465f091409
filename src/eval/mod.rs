//! Spatial evaluation: predicates per shape kind, verdict aggregation,
//! and report formatting.

mod evaluator;
mod index;
mod report;

pub use evaluator::{evaluate, evaluate_all};
pub use index::LayerIndex;
pub use report::{report, Message, Report};
