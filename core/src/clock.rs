use web_time::{Instant, SystemTime, UNIX_EPOCH};

/// Time source for a single game.
pub trait Clock {
    /// Starts counting. Calling it again while running keeps the original start.
    fn start(&mut self);

    /// Freezes the elapsed time.
    fn stop(&mut self);

    /// Whole seconds counted so far, 0 before `start`.
    fn elapsed_seconds(&self) -> u32;

    fn is_running(&self) -> bool;
}

/// Wall clock backed by [`Instant`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for Stopwatch {
    fn start(&mut self) {
        if self.started_at.is_none() {
            let now = Instant::now();
            log::debug!("clock started");
            self.started_at.replace(now);
        }
    }

    fn stop(&mut self) {
        if self.started_at.is_some() && self.stopped_at.is_none() {
            self.stopped_at.replace(Instant::now());
            log::debug!("clock stopped at {}s", self.elapsed_seconds());
        }
    }

    fn elapsed_seconds(&self) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let end = self.stopped_at.unwrap_or_else(Instant::now);
        let secs = end.saturating_duration_since(started_at).as_secs();
        u32::try_from(secs).unwrap_or(u32::MAX)
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }
}

/// Clock that only moves when told to, for replays and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    seconds: u32,
    running: bool,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `seconds` if the clock is running, otherwise does nothing.
    pub fn advance(&mut self, seconds: u32) {
        if self.running {
            self.seconds = self.seconds.saturating_add(seconds);
        }
    }
}

impl Clock for ManualClock {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn elapsed_seconds(&self) -> u32 {
        self.seconds
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Seed derived from the current wall-clock time.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
