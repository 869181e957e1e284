#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use muhurta::domain::error::MuhurtaError;
use muhurta::domain::evaluator::Evaluation;
use muhurta::domain::profile::Profile;
use muhurta::ports::clock_port::ClockPort;
use muhurta::ports::presenter_port::PresenterPort;
use muhurta::ports::profile_port::ProfilePort;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub fn dt(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

/// Clock pinned to one instant.
pub struct MockClock {
    pub now: NaiveDateTime,
}

impl MockClock {
    pub fn fixed(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl ClockPort for MockClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Profile port answering each `load` from a scripted queue; the last
/// scripted answer repeats once the queue drains. `save` calls are
/// captured for inspection.
pub struct MockProfilePort {
    loads: RefCell<VecDeque<Result<Option<Profile>, String>>>,
    last: RefCell<Result<Option<Profile>, String>>,
    pub saved: RefCell<Vec<Profile>>,
}

impl MockProfilePort {
    pub fn new() -> Self {
        Self {
            loads: RefCell::new(VecDeque::new()),
            last: RefCell::new(Ok(None)),
            saved: RefCell::new(Vec::new()),
        }
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        self.push_load(Ok(Some(profile)));
        self
    }

    pub fn with_empty(self) -> Self {
        self.push_load(Ok(None));
        self
    }

    pub fn with_error(self, reason: &str) -> Self {
        self.push_load(Err(reason.to_string()));
        self
    }

    fn push_load(&self, result: Result<Option<Profile>, String>) {
        *self.last.borrow_mut() = result.clone();
        self.loads.borrow_mut().push_back(result);
    }
}

impl ProfilePort for MockProfilePort {
    fn load(&self) -> Result<Option<Profile>, MuhurtaError> {
        let result = self
            .loads
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.last.borrow().clone());
        result.map_err(|reason| MuhurtaError::ProfileParse {
            file: "mock".to_string(),
            reason,
        })
    }

    fn save(&self, profile: &Profile) -> Result<(), MuhurtaError> {
        self.saved.borrow_mut().push(profile.clone());
        Ok(())
    }
}

/// Presenter that records everything it is handed.
pub struct CollectingPresenter {
    seen: Rc<RefCell<Vec<Evaluation>>>,
    fail_with: Option<String>,
}

impl CollectingPresenter {
    pub fn new() -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
            fail_with: Some(reason.to_string()),
        }
    }

    /// Shared handle onto the collected evaluations, usable after the
    /// presenter has been boxed away.
    pub fn sink(&self) -> Rc<RefCell<Vec<Evaluation>>> {
        self.seen.clone()
    }
}

impl PresenterPort for CollectingPresenter {
    fn present(&self, evaluation: &Evaluation) -> Result<(), MuhurtaError> {
        self.seen.borrow_mut().push(evaluation.clone());
        match &self.fail_with {
            Some(reason) => Err(MuhurtaError::LogWrite {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
