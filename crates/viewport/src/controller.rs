use foundation::bounds::Aabb2;
use foundation::time::Time;
use formats::content::ZoomSettings;
use runtime::easing::Easing;
use runtime::tween::{Animation, Sample, Tween};

use crate::fit::{FitOptions, fit_bounds};
use crate::interpolate::ZoomInterpolator;
use crate::transform::ZoomTransform;

/// How a new target transform is applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Motion {
    Animated,
    Immediate,
}

/// Owns the displayed zoom transform and its animation.
///
/// Requests are last-write-wins: a new target replaces any running
/// animation and starts from the transform currently on screen.
#[derive(Debug, Clone)]
pub struct ZoomController {
    settings: ZoomSettings,
    size: [f64; 2],
    translate_extent: Aabb2,
    current: ZoomTransform,
    target: ZoomTransform,
    pending: Option<ZoomInterpolator>,
    animation: Animation<ZoomInterpolator>,
}

impl ZoomController {
    pub fn new(settings: ZoomSettings, size: [f64; 2], world_bounds: Aabb2) -> Self {
        let mut controller = Self {
            settings,
            size,
            translate_extent: Aabb2::empty(),
            current: ZoomTransform::IDENTITY,
            target: ZoomTransform::IDENTITY,
            pending: None,
            animation: Animation::new(),
        };
        controller.set_viewport(size, world_bounds);
        controller
    }

    /// Updates the viewport after a resize. Does not move the map.
    pub fn set_viewport(&mut self, size: [f64; 2], world_bounds: Aabb2) {
        self.size = size;
        self.translate_extent = if world_bounds.is_empty() {
            Aabb2::from_size(size[0], size[1])
        } else {
            world_bounds.padded(self.settings.translate_padding)
        };
    }

    pub fn settings(&self) -> &ZoomSettings {
        &self.settings
    }

    pub fn size(&self) -> [f64; 2] {
        self.size
    }

    /// Transform currently on screen.
    pub fn transform(&self) -> ZoomTransform {
        self.current
    }

    /// Where the map is heading (equals `transform()` when idle).
    pub fn target(&self) -> ZoomTransform {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.pending.is_some() || self.animation.is_running()
    }

    pub fn translate_extent(&self) -> Aabb2 {
        self.translate_extent
    }

    pub fn fit_options(&self, padding: Option<f64>) -> FitOptions {
        FitOptions {
            padding: padding.unwrap_or(self.settings.padding),
            min_scale: self.settings.min_scale,
            max_scale: self.settings.max_scale,
            scale_cap: self.settings.fit_scale_cap,
        }
    }

    /// Transform fitting `bounds` into the viewport.
    pub fn fit(&self, bounds: Aabb2, padding: Option<f64>) -> ZoomTransform {
        fit_bounds(bounds, self.size, self.fit_options(padding))
    }

    pub fn zoom_to(&mut self, target: ZoomTransform, motion: Motion) {
        self.target = target;
        match motion {
            Motion::Immediate => self.jump(target),
            Motion::Animated if self.settings.duration_ms <= 0.0 || target == self.current => {
                self.jump(target)
            }
            Motion::Animated => {
                self.animation.cancel();
                self.pending = Some(ZoomInterpolator::new(self.current, target, self.size));
                tracing::trace!(k = target.k, x = target.x, y = target.y, "zoom animation queued");
            }
        }
    }

    fn jump(&mut self, target: ZoomTransform) {
        self.pending = None;
        self.animation.cancel();
        self.current = target;
        self.target = target;
    }

    /// Advances the animation to `now`. Returns whether the transform moved.
    ///
    /// A queued animation starts on the first tick after it was requested.
    pub fn tick(&mut self, now: Time) -> bool {
        if let Some(interp) = self.pending.take() {
            self.animation.start(Tween::new(
                interp,
                now,
                self.settings.duration_ms,
                Easing::CubicInOut,
            ));
        }
        let Some(sample) = self.animation.tick(now) else {
            return false;
        };
        let moved = *sample.value() != self.current;
        if let Sample::Finished(_) = sample {
            tracing::trace!("zoom animation finished");
        }
        self.current = sample.into_value();
        moved
    }

    /// Manual drag. Cancels any animation.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> ZoomTransform {
        let moved = ZoomTransform::new(self.current.k, self.current.x + dx, self.current.y + dy);
        self.settle_manual(moved)
    }

    /// Manual zoom by `factor` around the screen point `anchor`. Cancels any
    /// animation.
    pub fn zoom_at(&mut self, anchor: [f64; 2], factor: f64) -> ZoomTransform {
        if !(factor.is_finite() && factor > 0.0) {
            return self.current;
        }
        let k = (self.current.k * factor).clamp(self.settings.min_scale, self.settings.max_scale);
        let [px, py] = self.current.invert(anchor);
        let zoomed = ZoomTransform::new(k, anchor[0] - px * k, anchor[1] - py * k);
        self.settle_manual(zoomed)
    }

    fn settle_manual(&mut self, t: ZoomTransform) -> ZoomTransform {
        let constrained = t.constrain(self.size, self.translate_extent);
        self.jump(constrained);
        constrained
    }

    /// Boundary stroke width at the current scale.
    pub fn stroke_width(&self) -> f64 {
        stroke_width(self.settings.stroke_width, self.current.k)
    }
}

pub fn stroke_width(base: f64, k: f64) -> f64 {
    if k > 0.0 { base / k.sqrt() } else { base }
}
