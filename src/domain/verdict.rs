//! Verdict classifications and advice texts.
//!
//! Classification is kept separate from display formatting: a [`Tone`] is a
//! tagged variant, and glyphs or colors belong to the presenter adapters.

use serde::Serialize;

/// Qualitative classification of a single factor (hour, weekday, or date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Favorable,
    Unfavorable,
    NeutralStable,
    NeutralModerate,
}

impl Tone {
    pub fn is_favorable(self) -> bool {
        matches!(self, Tone::Favorable)
    }

    pub fn is_unfavorable(self) -> bool {
        matches!(self, Tone::Unfavorable)
    }
}

/// One factor's verdict together with its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckVerdict {
    pub tone: Tone,
    pub label: &'static str,
}

impl CheckVerdict {
    pub(crate) const fn new(tone: Tone, label: &'static str) -> Self {
        Self { tone, label }
    }
}

/// The combined trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallVerdict {
    StrictlyAvoid,
    PerfectDay,
    GoodTime,
    OkWithConfirmation,
}

impl OverallVerdict {
    pub fn label(self) -> &'static str {
        match self {
            OverallVerdict::StrictlyAvoid => "Strictly avoid trading",
            OverallVerdict::PerfectDay => "Perfect day to trade",
            OverallVerdict::GoodTime => "Good time to trade",
            OverallVerdict::OkWithConfirmation => "OK to trade with confirmation",
        }
    }
}

/// Alternate wording some deployments use for the
/// [`OverallVerdict::OkWithConfirmation`] branch.
pub const ALTERNATE_OK_ADVICE: &str =
    "Some factors are neutral. Trade small or wait for a better setup.";

/// Advice strings keyed by overall verdict.
///
/// The `ok_with_confirmation` text is the only one that varies between
/// deployments; it can be overridden from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceCatalog {
    pub strictly_avoid: String,
    pub perfect_day: String,
    pub good_time: String,
    pub ok_with_confirmation: String,
}

impl Default for AdviceCatalog {
    fn default() -> Self {
        Self {
            strictly_avoid: "Conditions are unfavorable. Better to avoid trading right now."
                .to_string(),
            perfect_day: "Everything is aligned! Great time for focused and confident trades."
                .to_string(),
            good_time: "You have favorable energies. Consider trading with proper confirmation."
                .to_string(),
            ok_with_confirmation:
                "Avoid overtrading or emotional decisions. Focus on logic and clear setups."
                    .to_string(),
        }
    }
}

impl AdviceCatalog {
    /// A catalog with a custom `ok_with_confirmation` text.
    pub fn with_ok_advice(advice: impl Into<String>) -> Self {
        Self {
            ok_with_confirmation: advice.into(),
            ..Self::default()
        }
    }

    pub fn advice_for(&self, verdict: OverallVerdict) -> &str {
        match verdict {
            OverallVerdict::StrictlyAvoid => &self.strictly_avoid,
            OverallVerdict::PerfectDay => &self.perfect_day,
            OverallVerdict::GoodTime => &self.good_time,
            OverallVerdict::OkWithConfirmation => &self.ok_with_confirmation,
        }
    }
}
