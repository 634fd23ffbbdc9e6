use foundation::bounds::Aabb2;

use crate::transform::ZoomTransform;

/// Scale limits applied to automatic fits.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitOptions {
    /// Fraction of the viewport the target may occupy.
    pub padding: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub scale_cap: Option<f64>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: 0.9,
            min_scale: 1.0,
            max_scale: 10.0,
            scale_cap: Some(8.0),
        }
    }
}

/// Transform that centres `bounds` (projected pixels) in a `size` viewport.
///
/// Degenerate bounds (a point, a line, nothing) yield the identity, which is
/// the world view because the projection is already fitted to the world.
pub fn fit_bounds(bounds: Aabb2, size: [f64; 2], opts: FitOptions) -> ZoomTransform {
    let [w, h] = size;
    if bounds.is_degenerate() || !(w > 0.0 && h > 0.0) {
        return ZoomTransform::IDENTITY;
    }

    let fill = (bounds.width() / w).max(bounds.height() / h);
    let mut k = opts.padding / fill;
    if let Some(cap) = opts.scale_cap {
        k = k.min(cap);
    }
    let k = k.clamp(opts.min_scale, opts.max_scale.max(opts.min_scale));
    let [cx, cy] = bounds.center();
    ZoomTransform::new(k, w / 2.0 - k * cx, h / 2.0 - k * cy)
}
