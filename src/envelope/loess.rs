//! Local linear regression with tricube weights, used to smooth the tag's
//! min/max temperature profiles onto the reference grid's depth levels.

use ordered_float::OrderedFloat;

/// Prediction with its standard error at one target location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub value: f64,
    pub std_err: f64,
}

/// Minimum number of observations required for a fit.
pub const MIN_OBSERVATIONS: usize = 3;

fn tricube(u: f64) -> f64 {
    if u >= 1.0 {
        0.0
    } else {
        let t = 1.0 - u * u * u;
        t * t * t
    }
}

/// Fits a local linear regression of `ys` on `xs` and evaluates it at each
/// target. `span` is the fraction of points entering each local fit
/// (floored at 2 points). Inputs must be finite; the caller filters.
///
/// Fails on degenerate inputs: too few points, no spread in `xs`, or a
/// singular weighted system at some target.
pub fn fit_predict(
    xs: &[f64],
    ys: &[f64],
    targets: &[f64],
    span: f64,
) -> Result<Vec<Prediction>, String> {
    assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n < MIN_OBSERVATIONS {
        return Err(format!("{} observation(s), need at least {}", n, MIN_OBSERVATIONS));
    }
    let spread = xs.iter().any(|&x| x != xs[0]);
    if !spread {
        return Err("all observations at a single depth".to_string());
    }

    let k = ((span * n as f64).ceil() as usize).clamp(2, n);

    targets
        .iter()
        .map(|&x0| predict_at(xs, ys, x0, k))
        .collect()
}

fn predict_at(xs: &[f64], ys: &[f64], x0: f64, k: usize) -> Result<Prediction, String> {
    // bandwidth = distance to the k-th nearest point
    let mut dists = xs.iter().map(|&x| (x - x0).abs()).collect::<Vec<_>>();
    dists.sort_by_key(|&d| OrderedFloat(d));
    let h = dists[k - 1].max(1e-12);

    // weights shrink with distance; the ratio is clamped just below 1 so the
    // k-th nearest point keeps a nonzero weight when it sits exactly at h
    let w = xs
        .iter()
        .map(|&x| tricube(((x - x0).abs() / h).min(1.0 - 1e-9)))
        .collect::<Vec<_>>();

    // weighted normal equations in the centered basis (x - x0), so the
    // intercept is the prediction at x0
    let (mut sw, mut sx, mut sxx, mut sy, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for ((&x, &y), &wi) in xs.iter().zip(ys).zip(&w) {
        let xc = x - x0;
        sw += wi;
        sx += wi * xc;
        sxx += wi * xc * xc;
        sy += wi * y;
        sxy += wi * xc * y;
    }

    let det = sw * sxx - sx * sx;
    if det.abs() <= 1e-12 * (sw * sxx).abs().max(1e-300) || !det.is_finite() {
        return Err(format!("singular local system at depth {}", x0));
    }

    let intercept = (sxx * sy - sx * sxy) / det;
    let slope = (sw * sxy - sx * sy) / det;

    // weighted residual variance over the points in the local window
    let mut rss = 0.0;
    let mut l_sq = 0.0;
    for ((&x, &y), &wi) in xs.iter().zip(ys).zip(&w) {
        let xc = x - x0;
        let resid = y - (intercept + slope * xc);
        rss += wi * resid * resid;
        // hat-vector entry carrying y_i into the intercept
        let l = wi * (sxx - xc * sx) / det;
        l_sq += l * l;
    }
    let dof = (sw - 2.0).max(1e-9);
    let sigma_sq = rss / dof;
    let std_err = (sigma_sq * l_sq).sqrt();

    if !intercept.is_finite() || !std_err.is_finite() {
        return Err(format!("non-finite fit at depth {}", x0));
    }

    Ok(Prediction {
        value: intercept,
        std_err,
    })
}
