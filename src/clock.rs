use std::{
    sync::Mutex,
    time::{Duration, SystemTime},
};

/// Source of the current instant.
///
/// Code generation and validation read time only through this trait, so tests
/// can substitute a [`FixedClock`] instead of waiting on the wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// The operating system's wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at a given instant until moved explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: SystemTime,
}

impl FixedClock {
    pub fn new(instant: SystemTime) -> Self {
        Self { instant }
    }

    /// Clock frozen at the given number of seconds after the UNIX epoch
    pub fn at_unix_seconds(seconds: u64) -> Self {
        Self::new(SystemTime::UNIX_EPOCH + Duration::from_secs(seconds))
    }

    ///  Moves the clock forward
    pub fn advance(&mut self, by: Duration) -> &mut Self {
        self.instant += by;

        self
    }

    ///  Moves the clock to an absolute instant
    pub fn set(&mut self, instant: SystemTime) -> &mut Self {
        self.instant = instant;

        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.instant
    }
}

/// A clock that moves forward by a fixed tick every time it is read.
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<SystemTime>,
    tick: Duration,
}

impl SteppingClock {
    pub fn new(start: SystemTime, tick: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            tick,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> SystemTime {
        // a poisoned lock still holds a valid instant
        let mut next = self.next.lock().unwrap_or_else(|e| e.into_inner());
        let now = *next;
        *next += self.tick;

        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use pretty_assertions::assert_eq;

    use crate::clock::{Clock, FixedClock, SteppingClock, SystemClock};

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let mut clock = FixedClock::at_unix_seconds(120);
        assert_eq!(clock.now(), clock.now());

        clock.advance(Duration::from_secs(30));
        assert_eq!(
            SystemTime::UNIX_EPOCH + Duration::from_secs(150),
            clock.now()
        );

        clock.set(SystemTime::UNIX_EPOCH);
        assert_eq!(SystemTime::UNIX_EPOCH, clock.now());
    }

    #[test]
    fn stepping_clock_ticks_on_every_read() {
        let clock = SteppingClock::new(SystemTime::UNIX_EPOCH, Duration::from_secs(30));

        let reads: Vec<_> = (0..3).map(|_| clock.now()).collect();

        assert_eq!(
            vec![
                SystemTime::UNIX_EPOCH,
                SystemTime::UNIX_EPOCH + Duration::from_secs(30),
                SystemTime::UNIX_EPOCH + Duration::from_secs(60),
            ],
            reads
        );
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now() > SystemTime::UNIX_EPOCH);
    }
}
