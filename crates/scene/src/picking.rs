use foundation::math::precision::stable_total_cmp_f64;

use crate::projector::ProjectedFeature;

/// Even-odd containment over all rings of one polygon (holes excluded).
pub fn point_in_polygon(p: [f64; 2], rings: &[Vec<[f64; 2]>]) -> bool {
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let [xi, yi] = ring[i];
            let [xj, yj] = ring[j];
            if (yi > p[1]) != (yj > p[1]) && p[0] < (xj - xi) * (p[1] - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

/// Topmost feature under `p` (features later in draw order win).
///
/// `p` is in the same projected space as the features, i.e. already
/// inverse-transformed from screen space by the caller.
pub fn pick_feature(features: &[ProjectedFeature], p: [f64; 2]) -> Option<&ProjectedFeature> {
    features.iter().rev().find(|f| {
        f.bounds.contains(p) && f.polygons.iter().any(|rings| point_in_polygon(p, rings))
    })
}

/// A pickable screen-space point such as a marker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointTarget<'a> {
    pub id: &'a str,
    pub position: [f64; 2],
}

/// Nearest target within `radius` pixels of `p`.
///
/// Ordering contract: on equal distance the earlier target wins.
pub fn pick_point<'a>(targets: &[PointTarget<'a>], p: [f64; 2], radius: f64) -> Option<&'a str> {
    let mut best: Option<(f64, &'a str)> = None;
    for target in targets {
        let dx = target.position[0] - p[0];
        let dy = target.position[1] - p[1];
        let d = (dx * dx + dy * dy).sqrt();
        if d.is_nan() || d > radius {
            continue;
        }
        best = match best {
            Some((bd, _)) if stable_total_cmp_f64(d, bd).is_lt() => Some((d, target.id)),
            None => Some((d, target.id)),
            keep => keep,
        };
    }
    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::{PointTarget, pick_feature, pick_point, point_in_polygon};
    use crate::projector::{ProjectedFeature, path_data};
    use foundation::bounds::Aabb2;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<[f64; 2]> {
        vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]
    }

    fn feature(code: &str, rings: Vec<Vec<[f64; 2]>>) -> ProjectedFeature {
        let polygons = vec![rings];
        ProjectedFeature {
            code: Some(code.to_string()),
            name: None,
            bounds: Aabb2::from_points(polygons.iter().flatten().flatten().copied()),
            path: path_data(&polygons),
            polygons,
        }
    }

    #[test]
    fn holes_are_outside() {
        let rings = vec![rect(0.0, 0.0, 10.0, 10.0), rect(4.0, 4.0, 6.0, 6.0)];
        assert!(point_in_polygon([2.0, 2.0], &rings));
        assert!(!point_in_polygon([5.0, 5.0], &rings));
        assert!(!point_in_polygon([12.0, 5.0], &rings));
    }

    #[test]
    fn later_features_are_on_top() {
        let features = vec![
            feature("A", vec![rect(0.0, 0.0, 10.0, 10.0)]),
            feature("B", vec![rect(5.0, 5.0, 15.0, 15.0)]),
        ];
        let code = |p: [f64; 2]| pick_feature(&features, p).and_then(|f| f.code.clone());
        assert_eq!(code([7.0, 7.0]).as_deref(), Some("B"));
        assert_eq!(code([2.0, 2.0]).as_deref(), Some("A"));
        assert_eq!(code([20.0, 20.0]), None);
    }

    #[test]
    fn point_pick_prefers_nearest_then_first() {
        let targets = [
            PointTarget { id: "a", position: [0.0, 0.0] },
            PointTarget { id: "b", position: [10.0, 0.0] },
            PointTarget { id: "c", position: [10.0, 0.0] },
        ];
        assert_eq!(pick_point(&targets, [8.0, 0.0], 20.0), Some("b"));
        assert_eq!(pick_point(&targets, [1.0, 0.0], 20.0), Some("a"));
        assert_eq!(pick_point(&targets, [100.0, 0.0], 20.0), None);
        assert_eq!(pick_point(&targets, [f64::NAN, 0.0], 20.0), None);
    }
}
