use ndarray::Array2;
use ordered_float::OrderedFloat;

/// Rescales a surface by its own maximum, ignoring undefined cells when
/// finding it. After rescaling, undefined cells become zero and stay zero,
/// and negatives are clamped. A surface with no positive maximum is already
/// all-zero as far as the cube is concerned, not a fault.
pub fn normalize_surface(mut surface: Array2<f64>) -> Array2<f64> {
    let max = surface
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .map(OrderedFloat)
        .max();

    match max {
        Some(OrderedFloat(m)) if m > 0.0 => {
            surface.mapv_inplace(|v| {
                if v.is_finite() {
                    (v / m).max(0.0)
                } else {
                    0.0
                }
            });
        }
        _ => {
            surface.mapv_inplace(|v| if v.is_finite() { v.max(0.0) } else { 0.0 });
        }
    }
    surface
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn maximum_becomes_exactly_one() {
        let surface = array![[0.1, 0.4], [0.2, f64::NAN]];
        let normed = normalize_surface(surface);
        assert_relative_eq!(normed[[0, 1]], 1.0);
        assert_relative_eq!(normed[[0, 0]], 0.25);
        assert_relative_eq!(normed[[1, 1]], 0.0);
    }

    #[test]
    fn negatives_are_clamped() {
        let surface = array![[-0.2, 0.5]];
        let normed = normalize_surface(surface);
        assert_relative_eq!(normed[[0, 0]], 0.0);
        assert_relative_eq!(normed[[0, 1]], 1.0);
    }

    #[test]
    fn zero_maximum_skips_division() {
        let surface = array![[0.0, 0.0], [f64::NAN, -0.1]];
        let normed = normalize_surface(surface);
        assert!(normed.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn all_undefined_becomes_all_zero() {
        let surface = Array2::from_elem((2, 2), f64::NAN);
        let normed = normalize_surface(surface);
        assert!(normed.iter().all(|&v| v == 0.0));
    }
}
