// Mapping domain model - polar samples and screen-space conversion
use serde::Deserialize;

/// One lidar-like reading: distance in millimeters from the vehicle origin,
/// bearing in degrees. Arrives from the backend, is converted once, then
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PolarSample {
    pub distance: f64,
    pub angle: f64,
}

impl PolarSample {
    pub fn new(distance: f64, angle: f64) -> Self {
        Self { distance, angle }
    }
}

/// A position on the rendering surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

/// Pixels per unit distance: the canvas spans the full range twice over
/// (max_range in every direction from the centered origin).
pub fn scale_factor(canvas_width: f64, max_range: f64) -> f64 {
    canvas_width / (2.0 * max_range)
}

/// Convert a polar sample to screen coordinates around `origin`. The y axis
/// is inverted to match screen conventions (y grows downward).
pub fn polar_to_cartesian(sample: PolarSample, origin: CanvasPoint, scale: f64) -> CanvasPoint {
    let theta = sample.angle.to_radians();
    let r = sample.distance * scale;
    CanvasPoint {
        x: origin.x + r * theta.cos(),
        y: origin.y - r * theta.sin(),
    }
}

/// Inverse of [`polar_to_cartesian`]. Angle is normalized to [0, 360).
pub fn cartesian_to_polar(point: CanvasPoint, origin: CanvasPoint, scale: f64) -> PolarSample {
    let dx = point.x - origin.x;
    let dy = origin.y - point.y;
    let distance = (dx * dx + dy * dy).sqrt() / scale;
    let mut angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    PolarSample { distance, angle }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: CanvasPoint = CanvasPoint { x: 250.0, y: 250.0 };

    #[test]
    fn test_zero_distance_collapses_to_origin() {
        let scale = scale_factor(500.0, 1000.0);
        for angle in [0.0, 45.0, 90.0, 180.0, 270.0, 359.0] {
            let p = polar_to_cartesian(PolarSample::new(0.0, angle), ORIGIN, scale);
            assert!((p.x - ORIGIN.x).abs() < 1e-9);
            assert!((p.y - ORIGIN.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cardinal_directions() {
        let scale = scale_factor(500.0, 1000.0);
        // 500 mm at 90 degrees is straight up: above the origin on screen.
        let up = polar_to_cartesian(PolarSample::new(500.0, 90.0), ORIGIN, scale);
        assert!((up.x - 250.0).abs() < 1e-9);
        assert!((up.y - 125.0).abs() < 1e-9);

        let right = polar_to_cartesian(PolarSample::new(500.0, 0.0), ORIGIN, scale);
        assert!((right.x - 375.0).abs() < 1e-9);
        assert!((right.y - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let scale = scale_factor(500.0, 1000.0);
        for &distance in &[1.0, 250.0, 999.0] {
            for &angle in &[0.0, 30.0, 90.0, 179.5, 200.0, 315.0] {
                let sample = PolarSample::new(distance, angle);
                let back =
                    cartesian_to_polar(polar_to_cartesian(sample, ORIGIN, scale), ORIGIN, scale);
                assert!((back.distance - distance).abs() < 1e-6, "distance for {sample:?}");
                assert!((back.angle - angle).abs() < 1e-6, "angle for {sample:?}");
            }
        }
    }

    #[test]
    fn test_deserialize_backend_shape() {
        // The backend stores distance as an integer and angle as an integer.
        let sample: PolarSample = serde_json::from_str(r#"{"distance":500,"angle":90}"#).unwrap();
        assert_eq!(sample, PolarSample::new(500.0, 90.0));
    }
}
