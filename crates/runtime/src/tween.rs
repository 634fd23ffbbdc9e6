use foundation::time::{Time, TimeSpan};

use crate::easing::Easing;

/// A value path parameterised over eased progress `t` in `[0, 1]`.
pub trait Interpolate {
    type Value: Clone;

    fn value_at(&self, t: f64) -> Self::Value;
}

/// One timed run of an interpolator.
#[derive(Debug, Clone)]
pub struct Tween<I> {
    interp: I,
    span: TimeSpan,
    easing: Easing,
}

impl<I: Interpolate> Tween<I> {
    pub fn new(interp: I, start: Time, duration_ms: f64, easing: Easing) -> Self {
        Self {
            interp,
            span: TimeSpan::starting_at(start, duration_ms),
            easing,
        }
    }

    pub fn span(&self) -> TimeSpan {
        self.span
    }

    pub fn sample(&self, now: Time) -> I::Value {
        self.interp
            .value_at(self.easing.apply(self.span.progress(now)))
    }

    pub fn is_finished(&self, now: Time) -> bool {
        self.span.is_finished(now)
    }
}

/// Result of advancing an `Animation`.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample<T> {
    Running(T),
    Finished(T),
}

impl<T> Sample<T> {
    pub fn value(&self) -> &T {
        match self {
            Sample::Running(v) | Sample::Finished(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Sample::Running(v) | Sample::Finished(v) => v,
        }
    }
}

/// A single animation slot. Starting a new tween replaces the running one.
#[derive(Debug, Clone)]
pub struct Animation<I> {
    active: Option<Tween<I>>,
}

impl<I> Default for Animation<I> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<I: Interpolate> Animation<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, tween: Tween<I>) {
        self.active = Some(tween);
    }

    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Samples the running tween; the slot clears once it reports `Finished`.
    pub fn tick(&mut self, now: Time) -> Option<Sample<I::Value>> {
        let tween = self.active.as_ref()?;
        let value = tween.sample(now);
        if tween.is_finished(now) {
            self.active = None;
            Some(Sample::Finished(value))
        } else {
            Some(Sample::Running(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Animation, Interpolate, Sample, Tween};
    use crate::easing::Easing;
    use foundation::time::Time;

    struct Lerp(f64, f64);

    impl Interpolate for Lerp {
        type Value = f64;

        fn value_at(&self, t: f64) -> f64 {
            self.0 + (self.1 - self.0) * t
        }
    }

    #[test]
    fn tween_samples_along_eased_progress() {
        let tween = Tween::new(Lerp(0.0, 100.0), Time(1000.0), 900.0, Easing::Linear);
        assert_eq!(tween.sample(Time(1000.0)), 0.0);
        assert_eq!(tween.sample(Time(1450.0)), 50.0);
        assert_eq!(tween.sample(Time(5000.0)), 100.0);
        assert!(!tween.is_finished(Time(1899.0)));
        assert!(tween.is_finished(Time(1900.0)));
    }

    #[test]
    fn animation_finishes_once_then_goes_idle() {
        let mut anim = Animation::new();
        anim.start(Tween::new(Lerp(0.0, 1.0), Time(0.0), 100.0, Easing::CubicInOut));
        assert_eq!(anim.tick(Time(50.0)), Some(Sample::Running(0.5)));
        assert_eq!(anim.tick(Time(100.0)), Some(Sample::Finished(1.0)));
        assert_eq!(anim.tick(Time(150.0)), None);
        assert!(!anim.is_running());
    }

    #[test]
    fn last_write_wins() {
        let mut anim = Animation::new();
        anim.start(Tween::new(Lerp(0.0, 10.0), Time(0.0), 100.0, Easing::Linear));
        anim.start(Tween::new(Lerp(5.0, 6.0), Time(0.0), 100.0, Easing::Linear));
        assert_eq!(anim.tick(Time(100.0)).map(Sample::into_value), Some(6.0));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut anim = Animation::new();
        anim.start(Tween::new(Lerp(0.0, 3.0), Time(10.0), 0.0, Easing::CubicInOut));
        assert_eq!(anim.tick(Time(10.0)), Some(Sample::Finished(3.0)));
        assert!(!anim.cancel());
    }
}
