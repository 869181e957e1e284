//! Console presenter adapter.
//!
//! All display formatting lives here; the domain only carries tagged
//! classifications and label texts.

use crate::domain::error::MuhurtaError;
use crate::domain::evaluator::Evaluation;
use crate::domain::verdict::Tone;
use crate::ports::presenter_port::PresenterPort;

pub struct ConsolePresenter;

fn glyph(tone: Tone) -> &'static str {
    match tone {
        Tone::Favorable => "[+]",
        Tone::Unfavorable => "[x]",
        Tone::NeutralStable => "[=]",
        Tone::NeutralModerate => "[~]",
    }
}

/// Renders an evaluation as the multi-line dashboard block.
pub fn format_evaluation(evaluation: &Evaluation) -> String {
    format!(
        "Evaluated at {}\n  Hour:    {} {}\n  Weekday: {} {}\n  Date:    {} {}\nOverall: {}\nAdvice:  {}",
        evaluation.evaluated_at.format("%Y-%m-%d %H:%M:%S"),
        glyph(evaluation.time.tone),
        evaluation.time.label,
        glyph(evaluation.weekday.tone),
        evaluation.weekday.label,
        glyph(evaluation.date.tone),
        evaluation.date.label,
        evaluation.overall.label(),
        evaluation.advice,
    )
}

impl PresenterPort for ConsolePresenter {
    fn present(&self, evaluation: &Evaluation) -> Result<(), MuhurtaError> {
        println!("{}\n", format_evaluation(evaluation));
        Ok(())
    }
}
