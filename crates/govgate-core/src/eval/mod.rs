//! Decision logic (pure apart from the rate counter hook).

pub mod condition;
pub mod decision;
pub mod evaluator;

pub use condition::compare;
pub use decision::{Decision, Outcome};
pub use evaluator::decide;
