//! Rule evaluation engine.
//!
//! Pure and total: given a moment and a profile, classify trading
//! favorability. No I/O, no state, no error conditions.
//!
//! # Evaluation Semantics
//!
//! - Hour check: first match wins among risky, best, stable
//! - Weekday check: lucky day beats the hardcoded risky weekdays
//! - Date check: lucky root is checked before unlucky, so a root present in
//!   both sets reads as lucky
//! - Overall: any unfavorable factor forces `StrictlyAvoid`; all three
//!   favorable gives `PerfectDay`; a favorable hour or weekday without an
//!   unfavorable date gives `GoodTime`; everything else is
//!   `OkWithConfirmation`

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::domain::numerology::digit_root;
use crate::domain::profile::Profile;
use crate::domain::verdict::{AdviceCatalog, CheckVerdict, OverallVerdict, Tone};

/// One tick's outcome. Immutable; recomputed fresh on every invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub time: CheckVerdict,
    pub weekday: CheckVerdict,
    pub date: CheckVerdict,
    pub overall: OverallVerdict,
    pub advice: String,
    pub evaluated_at: NaiveDateTime,
}

/// Evaluates `now` against `profile` with the built-in advice texts.
pub fn evaluate(now: NaiveDateTime, profile: &Profile) -> Evaluation {
    evaluate_with(now, profile, &AdviceCatalog::default())
}

/// Evaluates `now` against `profile` with a caller-supplied advice catalog.
pub fn evaluate_with(
    now: NaiveDateTime,
    profile: &Profile,
    advice: &AdviceCatalog,
) -> Evaluation {
    let day = now.weekday();
    let time = hour_verdict(day, now.hour());
    let weekday = weekday_verdict(day, profile);
    let date = date_verdict(digit_root(now.day()), profile);
    let overall = combine(time.tone, weekday.tone, date.tone);

    Evaluation {
        time,
        weekday,
        date,
        overall,
        advice: advice.advice_for(overall).to_string(),
        evaluated_at: now,
    }
}

fn hour_verdict(day: Weekday, hour: u32) -> CheckVerdict {
    let risky = (day == Weekday::Tue && (9..11).contains(&hour))
        || (day == Weekday::Sat && (13..15).contains(&hour));
    let best = (day == Weekday::Wed || day == Weekday::Fri) && (9..11).contains(&hour);
    let stable = (14..15).contains(&hour);

    if risky {
        CheckVerdict::new(Tone::Unfavorable, "Bad trading hour")
    } else if best {
        CheckVerdict::new(Tone::Favorable, "Best trading hour")
    } else if stable {
        CheckVerdict::new(Tone::NeutralStable, "Stable hour")
    } else {
        CheckVerdict::new(Tone::NeutralModerate, "Neutral trading hour")
    }
}

fn weekday_verdict(day: Weekday, profile: &Profile) -> CheckVerdict {
    if profile.lucky_days.contains(&day) {
        CheckVerdict::new(Tone::Favorable, "Favorable weekday")
    } else if day == Weekday::Tue || day == Weekday::Sat {
        CheckVerdict::new(Tone::Unfavorable, "Risky weekday")
    } else {
        CheckVerdict::new(Tone::NeutralModerate, "Moderate weekday")
    }
}

fn date_verdict(root: u32, profile: &Profile) -> CheckVerdict {
    let root = root as u8;
    if profile.lucky_roots.contains(&root) {
        CheckVerdict::new(Tone::Favorable, "Lucky numerology date")
    } else if profile.unlucky_roots.contains(&root) {
        CheckVerdict::new(Tone::Unfavorable, "Unlucky numerology date")
    } else {
        CheckVerdict::new(Tone::NeutralModerate, "Neutral date")
    }
}

fn combine(time: Tone, weekday: Tone, date: Tone) -> OverallVerdict {
    if time.is_unfavorable() || weekday.is_unfavorable() || date.is_unfavorable() {
        OverallVerdict::StrictlyAvoid
    } else if time.is_favorable() && weekday.is_favorable() && date.is_favorable() {
        OverallVerdict::PerfectDay
    } else if (time.is_favorable() || weekday.is_favorable()) && !date.is_unfavorable() {
        OverallVerdict::GoodTime
    } else {
        OverallVerdict::OkWithConfirmation
    }
}
