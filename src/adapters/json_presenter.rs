//! JSON line presenter adapter.

use crate::domain::error::MuhurtaError;
use crate::domain::evaluator::Evaluation;
use crate::ports::presenter_port::PresenterPort;

/// Emits one JSON object per evaluation on stdout, for piping into other
/// tools.
pub struct JsonPresenter;

impl PresenterPort for JsonPresenter {
    fn present(&self, evaluation: &Evaluation) -> Result<(), MuhurtaError> {
        let line = serde_json::to_string(evaluation).map_err(|e| MuhurtaError::LogWrite {
            reason: e.to_string(),
        })?;
        println!("{line}");
        Ok(())
    }
}
