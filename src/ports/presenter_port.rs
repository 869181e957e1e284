//! Presentation sink port trait.

use crate::domain::error::MuhurtaError;
use crate::domain::evaluator::Evaluation;

/// Port for rendering evaluations. There is no feedback path from a
/// presenter back into the evaluator.
pub trait PresenterPort {
    fn present(&self, evaluation: &Evaluation) -> Result<(), MuhurtaError>;
}
