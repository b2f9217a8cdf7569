// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Cancellable repeating intervals.

use std::time::Duration;

use tracing::debug;

use crate::Clock;

/// Handle to one armed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken(u64);

/// A repeating tick source polled from a single control flow.
pub trait TickSource {
    /// Arm a repeating interval. Any interval armed earlier on this source is
    /// cancelled first.
    fn arm(&mut self, interval: Duration) -> CancelToken;

    /// Cancel an interval. Once this returns, `token` is never yielded again.
    fn cancel(&mut self, token: CancelToken);

    /// Yield the armed token when its interval has elapsed.
    ///
    /// Firings missed while the caller was not polling collapse into one, so
    /// a single poll yields at most one token.
    fn next_due(&mut self) -> Option<CancelToken>;

    fn is_armed(&self) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct ArmedInterval {
    token: CancelToken,
    interval: Duration,
    next_fire: Duration,
}

/// [`TickSource`] on top of any [`Clock`]. Holds at most one armed interval.
#[derive(Debug, Clone)]
pub struct ClockTickSource<C: Clock> {
    clock: C,
    next_token: u64,
    armed: Option<ArmedInterval>,
}

impl<C: Clock> ClockTickSource<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_token: 0,
            armed: None,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> TickSource for ClockTickSource<C> {
    fn arm(&mut self, interval: Duration) -> CancelToken {
        if let Some(previous) = self.armed.take() {
            debug!("[TICK] replacing armed interval {:?}", previous.token);
        }
        // a zero interval would make next_due yield forever
        let interval = interval.max(Duration::from_millis(1));
        let token = CancelToken(self.next_token);
        self.next_token += 1;
        self.armed = Some(ArmedInterval {
            token,
            interval,
            next_fire: self.clock.now() + interval,
        });
        token
    }

    fn cancel(&mut self, token: CancelToken) {
        if self.armed.map(|armed| armed.token) == Some(token) {
            self.armed = None;
        }
    }

    fn next_due(&mut self) -> Option<CancelToken> {
        let now = self.clock.now();
        let armed = self.armed.as_mut()?;
        if now < armed.next_fire {
            return None;
        }
        // overdue firings coalesce; the cadence restarts from now
        armed.next_fire = now + armed.interval;
        Some(armed.token)
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    #[test]
    fn test_fires_once_per_elapsed_interval() {
        let clock = ManualClock::new();
        let mut source = ClockTickSource::new(clock.clone());
        let token = source.arm(Duration::from_millis(200));

        clock.advance_ms(199);
        assert_eq!(source.next_due(), None);

        clock.advance_ms(1);
        assert_eq!(source.next_due(), Some(token));
        assert_eq!(source.next_due(), None);

        clock.advance_ms(200);
        assert_eq!(source.next_due(), Some(token));
        assert_eq!(source.next_due(), None);
    }

    #[test]
    fn test_missed_firings_collapse_into_one() {
        let clock = ManualClock::new();
        let mut source = ClockTickSource::new(clock.clone());
        let token = source.arm(Duration::from_millis(200));

        // three intervals elapse unpolled
        clock.advance_ms(600);
        assert_eq!(source.next_due(), Some(token));
        assert_eq!(source.next_due(), None);

        // the next firing is one full interval after the late poll
        clock.advance_ms(199);
        assert_eq!(source.next_due(), None);
        clock.advance_ms(1);
        assert_eq!(source.next_due(), Some(token));
    }

    #[test]
    fn test_cancel_is_immediate() {
        let clock = ManualClock::new();
        let mut source = ClockTickSource::new(clock.clone());
        let token = source.arm(Duration::from_millis(200));
        clock.advance_ms(1000);
        source.cancel(token);
        assert!(!source.is_armed());
        assert_eq!(source.next_due(), None);
    }

    #[test]
    fn test_rearm_replaces_previous() {
        let clock = ManualClock::new();
        let mut source = ClockTickSource::new(clock.clone());
        let first = source.arm(Duration::from_millis(200));
        let second = source.arm(Duration::from_millis(500));
        assert_ne!(first, second);

        clock.advance_ms(500);
        assert_eq!(source.next_due(), Some(second));
        assert_eq!(source.next_due(), None);

        // cancelling a stale token leaves the live one armed
        source.cancel(first);
        assert!(source.is_armed());
    }
}
