use ndarray::Array2;

/// Sliding-window sample standard deviation, NaN-ignoring. Windows are
/// `window` × `window` (odd), truncated at the field edges. A window with
/// fewer than two defined cells yields NaN. Output is always in the input's
/// row/column order, whatever orientation the rows encode.
pub fn focal_std(field: &Array2<f64>, window: usize) -> Array2<f64> {
    assert!(window % 2 == 1, "focal window must be odd");
    let half = (window / 2) as isize;
    let (nrow, ncol) = field.dim();

    Array2::from_shape_fn((nrow, ncol), |(i, j)| {
        let mut sum = 0.0;
        let mut count = 0usize;
        for di in -half..=half {
            for dj in -half..=half {
                let r = i as isize + di;
                let c = j as isize + dj;
                if r < 0 || c < 0 || r >= nrow as isize || c >= ncol as isize {
                    continue;
                }
                let v = field[[r as usize, c as usize]];
                if v.is_finite() {
                    sum += v;
                    count += 1;
                }
            }
        }
        if count < 2 {
            return f64::NAN;
        }
        let mean = sum / count as f64;

        let mut ss = 0.0;
        for di in -half..=half {
            for dj in -half..=half {
                let r = i as isize + di;
                let c = j as isize + dj;
                if r < 0 || c < 0 || r >= nrow as isize || c >= ncol as isize {
                    continue;
                }
                let v = field[[r as usize, c as usize]];
                if v.is_finite() {
                    ss += (v - mean) * (v - mean);
                }
            }
        }
        (ss / (count - 1) as f64).sqrt()
    })
}
