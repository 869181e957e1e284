//! CSV evaluation-log adapter.
//!
//! Appends one row per evaluation so a long-running watch leaves an
//! auditable trail. The file gets a header when first created.

use crate::domain::error::MuhurtaError;
use crate::domain::evaluator::Evaluation;
use crate::ports::presenter_port::PresenterPort;
use std::fs::OpenOptions;
use std::path::PathBuf;

pub struct CsvLogAdapter {
    path: PathBuf,
}

impl CsvLogAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

const HEADER: [&str; 6] = [
    "evaluated_at",
    "hour_check",
    "weekday_check",
    "date_check",
    "overall",
    "advice",
];

impl PresenterPort for CsvLogAdapter {
    fn present(&self, evaluation: &Evaluation) -> Result<(), MuhurtaError> {
        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer
                .write_record(HEADER)
                .map_err(|e| MuhurtaError::LogWrite {
                    reason: e.to_string(),
                })?;
        }
        writer
            .write_record([
                evaluation
                    .evaluated_at
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                evaluation.time.label.to_string(),
                evaluation.weekday.label.to_string(),
                evaluation.date.label.to_string(),
                evaluation.overall.label().to_string(),
                evaluation.advice.clone(),
            ])
            .map_err(|e| MuhurtaError::LogWrite {
                reason: e.to_string(),
            })?;
        writer.flush()?;
        Ok(())
    }
}
