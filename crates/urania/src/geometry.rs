//! Angle arithmetic shared by every stage of chart computation.

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Shortest angular distance between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    diff.min(360.0 - diff)
}

/// Signed shortest arc travelled from `from` to `to`, in (-180, 180].
pub fn signed_arc(from: f64, to: f64) -> f64 {
    let diff = normalize_degrees(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Convert a tropical longitude to the sidereal frame.
pub fn to_sidereal(tropical: f64, ayanamsa: f64) -> f64 {
    normalize_degrees(tropical - ayanamsa + 360.0)
}

/// Midpoint of two longitudes along the shorter arc.
///
/// When the raw separation exceeds 180 degrees the smaller longitude is
/// lifted by a full turn before averaging, so 350 and 10 meet at 0 rather
/// than at 180.
pub fn calculate_midpoint(lon1: f64, lon2: f64) -> f64 {
    let a = normalize_degrees(lon1);
    let b = normalize_degrees(lon2);
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if high - low > 180.0 {
        normalize_degrees((low + 360.0 + high) / 2.0)
    } else {
        normalize_degrees((low + high) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-1e-18), 0.0);
    }

    #[test]
    fn test_angular_separation_wraps() {
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((angular_separation(0.0, 180.0) - 180.0).abs() < 1e-9);
        assert!((angular_separation(100.0, 278.0) - 178.0).abs() < 1e-9);
    }

    #[test]
    fn test_signed_arc() {
        assert!((signed_arc(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((signed_arc(10.0, 350.0) + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint_wraparound() {
        let mid = calculate_midpoint(350.0, 10.0);
        assert!(mid < 1e-9 || (360.0 - mid) < 1e-9, "got {}", mid);
        assert!((calculate_midpoint(10.0, 50.0) - 30.0).abs() < 1e-9);
        assert!((calculate_midpoint(300.0, 100.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint_is_symmetric() {
        let samples = [0.0, 15.5, 89.9, 179.0, 181.0, 270.25, 359.9];
        for &a in &samples {
            for &b in &samples {
                let ab = calculate_midpoint(a, b);
                let ba = calculate_midpoint(b, a);
                assert!((ab - ba).abs() < 1e-9, "{} {} -> {} vs {}", a, b, ab, ba);
                assert!((0.0..360.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_to_sidereal() {
        assert!((to_sidereal(10.0, 24.0) - 346.0).abs() < 1e-9);
        assert!((to_sidereal(100.0, 24.0) - 76.0).abs() < 1e-9);
    }
}
