use std::time::Instant;

/// Source of the current time, abstracted so tests can control the clock.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Production time source backed by [`Instant::now`].
#[derive(Clone, Copy)]
pub struct InstantTimeSrc(());

impl InstantTimeSrc {
    pub fn new() -> Self {
        InstantTimeSrc(())
    }
}

impl TimeSource for InstantTimeSrc {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[cfg(test)]
#[derive(Clone)]
pub struct MockTimeSource {
    current_instant: Instant,
}

#[cfg(test)]
impl MockTimeSource {
    pub fn new(start_instant: Instant) -> Self {
        MockTimeSource {
            current_instant: start_instant,
        }
    }

    pub fn advance_time(&mut self, duration: std::time::Duration) {
        self.current_instant += duration;
    }
}

#[cfg(test)]
impl TimeSource for MockTimeSource {
    fn now(&self) -> Instant {
        self.current_instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_mock_time_only_advances_on_request() {
        let mut time_source = MockTimeSource::new(Instant::now());
        let first = time_source.now();
        assert_eq!(time_source.now(), first);
        time_source.advance_time(Duration::from_millis(100));
        assert_eq!(time_source.now(), first + Duration::from_millis(100));
    }
}
