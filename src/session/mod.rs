use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

/// Source of wall-clock time for the session timer and fresh seeds.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Timer and operation counter for one matrix.
///
/// A session starts on the first accepted row selection and is replaced
/// whenever a new matrix is generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSession {
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    operations: u32,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock. Returns false if the session was already running.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        self.operations = 0;
        true
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn operations(&self) -> u32 {
        self.operations
    }

    /// Counts one applied operation and returns the new total.
    pub fn record_operation(&mut self) -> u32 {
        self.operations += 1;
        self.operations
    }

    /// Stops the clock and returns the final elapsed time.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Duration {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.finished_at.get_or_insert(now);
        self.elapsed(now)
    }

    /// Time since the first selection, frozen once the session finishes.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match self.started_at {
            Some(start) => {
                let end = self.finished_at.unwrap_or(now);
                (end - start).max(Duration::zero())
            }
            None => Duration::zero(),
        }
    }
}

/// `MM:SS` readout for the live timer. Minutes keep counting past 99.
pub fn format_clock(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
