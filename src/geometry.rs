use kurbo::{Affine, Point};
use crate::error::RadialError;

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / std::f64::consts::PI)
}

/// Angle in degrees subtended by a chord of length `chord` on a circle of `radius`.
pub fn arc_angle(radius: f64, chord: f64) -> Result<f64, RadialError> {
    let half = chord / 2.0;
    if !(radius > 0.0) || !(half >= 0.0) || half > radius {
        return Err(RadialError::InvalidGeometry { radius, chord });
    }
    // asin can land a hair above 1.0 when half == radius after rounding
    let ratio = (half / radius).min(1.0);
    Ok(2.0 * radians_to_degrees(ratio.asin()))
}

/// Chord length spanned by `angle` degrees on a circle of `radius`. Inverse of [`arc_angle`].
pub fn arc_distance(radius: f64, angle: f64) -> f64 {
    2.0 * radius * (degrees_to_radians(angle) / 2.0).sin()
}

/// Transform that places a node whose unrotated origin is `position` at that point rotated
/// `angle` degrees around `pivot`, with the node turned by the same angle.
///
/// Screen space is y-down, so positive angles turn clockwise on screen.
pub fn rotate_around_point(position: Point, pivot: Point, angle: f64) -> Affine {
    let theta = degrees_to_radians(angle);
    Affine::translate(pivot.to_vec2())
        * Affine::rotate(theta)
        * Affine::translate(position.to_vec2() - pivot.to_vec2())
}

/// Rotation in degrees encoded by an affine transform, in `(-180, 180]`.
pub fn transform_angle(transform: Affine) -> f64 {
    let [a, b, _, _, _, _] = transform.as_coeffs();
    radians_to_degrees(b.atan2(a))
}

pub fn transform_origin(transform: Affine) -> Point {
    let c = transform.as_coeffs();
    Point::new(c[4], c[5])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn degree_radian_conversions_are_inverse() {
        for d in [-720.0, -90.0, 0.0, 1.0, 45.0, 180.0, 359.5, 1080.0] {
            assert!(close(radians_to_degrees(degrees_to_radians(d)), d));
        }
        assert!(close(degrees_to_radians(180.0), std::f64::consts::PI));
    }

    #[test]
    fn arc_distance_inverts_arc_angle() {
        for radius in [0.5, 1.0, 10.0, 320.0, 4096.0] {
            for step in 0..=20 {
                let distance = 2.0 * radius * step as f64 / 20.0;
                let angle = arc_angle(radius, distance).unwrap();
                assert!(close(arc_distance(radius, angle), distance), "r={radius} d={distance}");
            }
        }
    }

    #[test]
    fn chord_equal_to_diameter_is_half_turn() {
        assert!(close(arc_angle(5.0, 10.0).unwrap(), 180.0));
        assert_eq!(arc_angle(5.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn out_of_domain_chord_is_rejected() {
        assert_eq!(arc_angle(5.0, 10.5), Err(RadialError::InvalidGeometry { radius: 5.0, chord: 10.5 }));
        assert!(arc_angle(5.0, -1.0).is_err());
        assert!(arc_angle(0.0, 0.0).is_err());
        assert!(arc_angle(5.0, f64::NAN).is_err());
    }

    #[test]
    fn positive_rotation_turns_clockwise_on_screen() {
        let t = rotate_around_point(Point::new(10.0, 0.0), Point::ORIGIN, 90.0);
        let origin = transform_origin(t);
        assert!(close(origin.x, 0.0) && close(origin.y, 10.0), "{origin:?}");
        // the node's own +x axis now points down the screen
        let tip = t * Point::new(1.0, 0.0);
        assert!(close(tip.x, 0.0) && close(tip.y, 11.0), "{tip:?}");
        assert!(close(transform_angle(t), 90.0));
    }

    #[test]
    fn rotation_about_offset_pivot() {
        let pivot = Point::new(50.0, 50.0);
        let t = rotate_around_point(Point::new(100.0, 50.0), pivot, 180.0);
        let origin = transform_origin(t);
        assert!(close(origin.x, 0.0) && close(origin.y, 50.0), "{origin:?}");

        let identity = rotate_around_point(Point::new(12.0, 7.0), pivot, 0.0);
        assert_eq!(transform_origin(identity), Point::new(12.0, 7.0));
    }
}
