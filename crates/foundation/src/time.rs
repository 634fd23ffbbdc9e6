use serde::{Deserialize, Serialize};

/// Host-supplied timestamp in milliseconds (e.g. `performance.now()`).
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(pub f64);

impl Time {
    pub fn from_ms(ms: f64) -> Self {
        Time(ms)
    }

    pub fn ms(self) -> f64 {
        self.0
    }

    pub fn after(self, ms: f64) -> Self {
        Time(self.0 + ms)
    }

    /// Milliseconds elapsed since `earlier`, never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

/// A closed window of host time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn starting_at(start: Time, duration_ms: f64) -> Self {
        Self {
            start,
            end: start.after(duration_ms.max(0.0)),
        }
    }

    pub fn instant(t: Time) -> Self {
        Self { start: t, end: t }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Linear progress in `[0, 1]`; zero-length spans are always complete.
    pub fn progress(&self, now: Time) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return 1.0;
        }
        (now.since(self.start) / d).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Time) -> bool {
        now.0 >= self.end.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn progress_is_clamped() {
        let span = TimeSpan::starting_at(Time(100.0), 900.0);
        assert_eq!(span.progress(Time(0.0)), 0.0);
        assert_eq!(span.progress(Time(550.0)), 0.5);
        assert_eq!(span.progress(Time(5_000.0)), 1.0);
        assert!(!span.is_finished(Time(999.0)));
        assert!(span.is_finished(Time(1_000.0)));
    }

    #[test]
    fn instant_span_is_complete() {
        let span = TimeSpan::instant(Time(42.0));
        assert_eq!(span.duration(), 0.0);
        assert_eq!(span.progress(Time(0.0)), 1.0);
    }
}
