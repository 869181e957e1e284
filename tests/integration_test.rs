//! Integration tests for the evaluator and the advisor loop.
//!
//! Tests cover:
//! - The named evaluation scenarios end to end through `evaluate`
//! - Determinism and totality over a wide input sweep
//! - Advisor loop behavior with mock ports: profile reload per tick,
//!   default fallback, last-known-profile recovery, presenter fan-out
//! - File-backed profile storage feeding the loop

mod common;

use common::*;
use chrono::Weekday;
use muhurta::adapters::json_profile_adapter::JsonProfileAdapter;
use muhurta::advisor::{run_advisor, Ticker};
use muhurta::domain::evaluator::{evaluate, evaluate_with};
use muhurta::domain::profile::Profile;
use muhurta::domain::verdict::{AdviceCatalog, OverallVerdict, Tone, ALTERNATE_OK_ADVICE};
use muhurta::ports::presenter_port::PresenterPort;
use muhurta::ports::profile_port::ProfilePort;
use std::collections::BTreeSet;
use std::time::Duration;

fn fast_ticker() -> (Ticker, muhurta::advisor::StopHandle) {
    // The loops below are bounded by tick budgets; the handle is only held
    // so the ticker keeps running between ticks.
    Ticker::new(Duration::from_millis(1))
}

mod evaluation_scenarios {
    use super::*;

    #[test]
    fn wednesday_morning_lucky_date_is_a_perfect_day() {
        // Wednesday 09:30, day 14 (root 5), default profile.
        let eval = evaluate(dt(2024, 2, 14, 9, 30), &Profile::default());
        assert_eq!(eval.time.tone, Tone::Favorable);
        assert_eq!(eval.weekday.tone, Tone::Favorable);
        assert_eq!(eval.date.tone, Tone::Favorable);
        assert_eq!(eval.overall, OverallVerdict::PerfectDay);
    }

    #[test]
    fn tuesday_morning_unlucky_date_is_strictly_avoided() {
        // Tuesday 10:00, day 8 (root 8), default profile.
        let eval = evaluate(dt(2024, 10, 8, 10, 0), &Profile::default());
        assert_eq!(eval.time.tone, Tone::Unfavorable);
        assert_eq!(eval.date.tone, Tone::Unfavorable);
        assert_eq!(eval.overall, OverallVerdict::StrictlyAvoid);
    }

    #[test]
    fn unlucky_date_alone_forces_avoidance() {
        // Thursday 14:30, day 9 (root 9): time and weekday are neutral.
        let eval = evaluate(dt(2025, 1, 9, 14, 30), &Profile::default());
        assert_eq!(eval.time.tone, Tone::NeutralStable);
        assert_eq!(eval.weekday.tone, Tone::NeutralModerate);
        assert_eq!(eval.date.tone, Tone::Unfavorable);
        assert_eq!(eval.overall, OverallVerdict::StrictlyAvoid);
    }

    #[test]
    fn lucky_weekday_with_neutral_hour_is_a_good_time() {
        // Monday 16:00, day 3 (root 3), default profile.
        let eval = evaluate(dt(2025, 2, 3, 16, 0), &Profile::default());
        assert_eq!(eval.time.tone, Tone::NeutralModerate);
        assert_eq!(eval.weekday.tone, Tone::Favorable);
        assert_eq!(eval.date.tone, Tone::Favorable);
        assert_eq!(eval.overall, OverallVerdict::GoodTime);
    }

    #[test]
    fn overlapping_root_sets_resolve_lucky_first() {
        let profile = Profile {
            lucky_roots: BTreeSet::from([8]),
            unlucky_roots: BTreeSet::from([8]),
            ..Profile::default()
        };
        // Day 8 (root 8) appears in both sets.
        let eval = evaluate(dt(2025, 2, 8, 16, 0), &profile);
        assert_eq!(eval.date.tone, Tone::Favorable);
    }

    #[test]
    fn evaluation_is_total_and_deterministic_across_a_month() {
        let profile = Profile::default();
        for day in 1..=28 {
            for hour in 0..24 {
                let now = dt(2025, 2, day, hour, 0);
                let first = evaluate(now, &profile);
                let second = evaluate(now, &profile);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn configured_neutral_advice_reaches_the_result() {
        // Sunday 16:00, day 2 (root 2): every factor neutral.
        let advice = AdviceCatalog::with_ok_advice(ALTERNATE_OK_ADVICE);
        let eval = evaluate_with(dt(2025, 2, 2, 16, 0), &Profile::default(), &advice);
        assert_eq!(eval.overall, OverallVerdict::OkWithConfirmation);
        assert_eq!(eval.advice, ALTERNATE_OK_ADVICE);
    }
}

mod advisor_loop {
    use super::*;

    #[test]
    fn runs_the_requested_number_of_ticks() {
        let clock = MockClock::fixed(dt(2024, 2, 14, 9, 30));
        let profiles = MockProfilePort::new().with_profile(Profile::default());
        let presenter = CollectingPresenter::new();
        let sink = presenter.sink();
        let presenters: Vec<Box<dyn PresenterPort>> = vec![Box::new(presenter)];

        let (ticker, _stop) = fast_ticker();
        let ticks = run_advisor(
            &clock,
            &profiles,
            &presenters,
            &AdviceCatalog::default(),
            ticker,
            Some(3),
        );

        assert_eq!(ticks, 3);
        let seen = sink.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen
            .iter()
            .all(|e| e.overall == OverallVerdict::PerfectDay));
    }

    #[test]
    fn empty_store_falls_back_to_default_profile() {
        // Monday 16:00 day 3: GoodTime under the default kundli.
        let clock = MockClock::fixed(dt(2025, 2, 3, 16, 0));
        let profiles = MockProfilePort::new().with_empty();
        let presenter = CollectingPresenter::new();
        let sink = presenter.sink();
        let presenters: Vec<Box<dyn PresenterPort>> = vec![Box::new(presenter)];

        let (ticker, _stop) = fast_ticker();
        run_advisor(
            &clock,
            &profiles,
            &presenters,
            &AdviceCatalog::default(),
            ticker,
            Some(1),
        );

        assert_eq!(sink.borrow()[0].overall, OverallVerdict::GoodTime);
    }

    #[test]
    fn load_failure_reuses_the_last_known_profile() {
        // Saturday 2025-02-08 16:00. The custom profile marks Saturday
        // lucky and root 8 lucky; under the default kundli the same moment
        // would read as a risky weekday.
        let custom = Profile {
            lucky_days: [Weekday::Sat].into_iter().collect(),
            lucky_roots: BTreeSet::from([8]),
            ..Profile::default()
        };
        let clock = MockClock::fixed(dt(2025, 2, 8, 16, 0));
        let profiles = MockProfilePort::new()
            .with_profile(custom)
            .with_error("store corrupted");
        let presenter = CollectingPresenter::new();
        let sink = presenter.sink();
        let presenters: Vec<Box<dyn PresenterPort>> = vec![Box::new(presenter)];

        let (ticker, _stop) = fast_ticker();
        run_advisor(
            &clock,
            &profiles,
            &presenters,
            &AdviceCatalog::default(),
            ticker,
            Some(3),
        );

        let seen = sink.borrow();
        assert_eq!(seen.len(), 3);
        // Ticks 2 and 3 hit load errors but keep the custom profile.
        assert!(seen.iter().all(|e| e.weekday.tone == Tone::Favorable));
    }

    #[test]
    fn load_failure_before_any_success_uses_the_default() {
        let clock = MockClock::fixed(dt(2025, 2, 3, 16, 0));
        let profiles = MockProfilePort::new().with_error("store corrupted");
        let presenter = CollectingPresenter::new();
        let sink = presenter.sink();
        let presenters: Vec<Box<dyn PresenterPort>> = vec![Box::new(presenter)];

        let (ticker, _stop) = fast_ticker();
        run_advisor(
            &clock,
            &profiles,
            &presenters,
            &AdviceCatalog::default(),
            ticker,
            Some(1),
        );

        assert_eq!(sink.borrow()[0].overall, OverallVerdict::GoodTime);
    }

    #[test]
    fn every_presenter_sees_every_tick() {
        let clock = MockClock::fixed(dt(2024, 2, 14, 9, 30));
        let profiles = MockProfilePort::new().with_profile(Profile::default());
        let first = CollectingPresenter::new();
        let second = CollectingPresenter::new();
        let first_sink = first.sink();
        let second_sink = second.sink();
        let presenters: Vec<Box<dyn PresenterPort>> =
            vec![Box::new(first), Box::new(second)];

        let (ticker, _stop) = fast_ticker();
        run_advisor(
            &clock,
            &profiles,
            &presenters,
            &AdviceCatalog::default(),
            ticker,
            Some(2),
        );

        assert_eq!(first_sink.borrow().len(), 2);
        assert_eq!(second_sink.borrow().len(), 2);
    }

    #[test]
    fn a_failing_presenter_does_not_stop_the_others() {
        let clock = MockClock::fixed(dt(2024, 2, 14, 9, 30));
        let profiles = MockProfilePort::new().with_profile(Profile::default());
        let failing = CollectingPresenter::failing("disk full");
        let healthy = CollectingPresenter::new();
        let healthy_sink = healthy.sink();
        let presenters: Vec<Box<dyn PresenterPort>> =
            vec![Box::new(failing), Box::new(healthy)];

        let (ticker, _stop) = fast_ticker();
        run_advisor(
            &clock,
            &profiles,
            &presenters,
            &AdviceCatalog::default(),
            ticker,
            Some(2),
        );

        assert_eq!(healthy_sink.borrow().len(), 2);
    }
}

mod file_backed_profiles {
    use super::*;

    #[test]
    fn advisor_picks_up_a_profile_replaced_between_ticks() {
        // Simulates the external fetch replacing the stored profile: write
        // a custom profile into the store the advisor is watching, then
        // confirm a fresh load sees it.
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProfileAdapter::new(dir.path().join("profile.json"));

        assert_eq!(store.load().unwrap(), None);

        let custom = Profile {
            lucky_roots: BTreeSet::from([7]),
            unlucky_roots: BTreeSet::from([1]),
            lucky_days: [Weekday::Sun].into_iter().collect(),
        };
        store.save(&custom).unwrap();
        assert_eq!(store.load().unwrap(), Some(custom.clone()));

        // Day 7 (root 7) on Sunday 2025-02-16: lucky under the custom
        // profile only.
        let eval = evaluate(dt(2025, 2, 16, 16, 0), &custom);
        assert_eq!(eval.weekday.tone, Tone::Favorable);
        assert_eq!(eval.date.tone, Tone::Favorable);

        let under_default = evaluate(dt(2025, 2, 16, 16, 0), &Profile::default());
        assert_eq!(under_default.weekday.tone, Tone::NeutralModerate);
        assert_eq!(under_default.date.tone, Tone::NeutralModerate);
    }
}
