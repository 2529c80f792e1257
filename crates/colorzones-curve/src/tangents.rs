//! Knot slopes for each interpolation style.
//!
//! The open variants take an extended node list `ext` whose first and last
//! entries are virtual neighbors; they return one slope per real node,
//! i.e. for `ext[1..ext.len() - 1]`.

use crate::curve::ControlPoint;
use crate::solve;

fn secant(a: ControlPoint, b: ControlPoint) -> f32 {
    (b.y - a.y) / (b.x - a.x)
}

/// Natural cubic spline (zero curvature at the virtual ends).
pub(crate) fn natural_spline(ext: &[ControlPoint]) -> Vec<f32> {
    let n = ext.len();
    let h: Vec<f32> = ext.windows(2).map(|w| w[1].x - w[0].x).collect();
    let delta: Vec<f32> = ext.windows(2).map(|w| secant(w[0], w[1])).collect();

    // Unknowns are the interior second derivatives M[1..n-1].
    let interior = n - 2;
    let mut sub = vec![0.0_f32; interior];
    let mut diag = vec![0.0_f32; interior];
    let mut sup = vec![0.0_f32; interior];
    let mut rhs = vec![0.0_f32; interior];
    for j in 0..interior {
        let i = j + 1;
        sub[j] = h[i - 1];
        diag[j] = 2.0 * (h[i - 1] + h[i]);
        sup[j] = h[i];
        rhs[j] = 6.0 * (delta[i] - delta[i - 1]);
    }
    let inner = solve::tridiagonal(&sub, &diag, &sup, &rhs);

    let mut m2 = Vec::with_capacity(n);
    m2.push(0.0);
    m2.extend(inner);
    m2.push(0.0);

    (1..n - 1)
        .map(|i| delta[i] - h[i] * (2.0 * m2[i] + m2[i + 1]) / 6.0)
        .collect()
}

/// Cyclic cubic spline over one period of distinct nodes.
///
/// The node after `base[m - 1]` is `base[0]` shifted by one period. Returns
/// one slope per base node.
pub(crate) fn periodic_spline(base: &[ControlPoint]) -> Vec<f32> {
    let m = base.len();
    let next = |i: usize| (i + 1) % m;
    let h: Vec<f32> = (0..m)
        .map(|i| {
            if i + 1 < m {
                base[i + 1].x - base[i].x
            } else {
                base[0].x + 1.0 - base[i].x
            }
        })
        .collect();
    let delta: Vec<f32> = (0..m).map(|i| (base[next(i)].y - base[i].y) / h[i]).collect();

    let mut a = vec![0.0_f32; m * m];
    let mut b = vec![0.0_f32; m];
    for i in 0..m {
        let prev = (i + m - 1) % m;
        a[i * m + prev] += h[prev];
        a[i * m + i] += 2.0 * (h[prev] + h[i]);
        a[i * m + next(i)] += h[i];
        b[i] = 6.0 * (delta[i] - delta[prev]);
    }
    let m2 = solve::dense(a, b);

    (0..m)
        .map(|i| delta[i] - h[i] * (2.0 * m2[i] + m2[next(i)]) / 6.0)
        .collect()
}

/// Centripetal (alpha = 1/2) Catmull-Rom tangents, expressed as dy/dx.
///
/// The parametric tangent's x component is always positive for strictly
/// increasing x, so the ratio is well defined.
pub(crate) fn catmull_rom(ext: &[ControlPoint]) -> Vec<f32> {
    ext.windows(3)
        .map(|w| {
            let (p0, p1, p2) = (w[0], w[1], w[2]);
            let d0 = (p1.x - p0.x).hypot(p1.y - p0.y).sqrt();
            let d1 = (p2.x - p1.x).hypot(p2.y - p1.y).sqrt();
            let vx = (p1.x - p0.x) / d0 - (p2.x - p0.x) / (d0 + d1) + (p2.x - p1.x) / d1;
            let vy = (p1.y - p0.y) / d0 - (p2.y - p0.y) / (d0 + d1) + (p2.y - p1.y) / d1;
            vy / vx
        })
        .collect()
}

/// Fritsch-Carlson monotone tangents.
///
/// Slopes are zero at local extrema and scaled into the `α² + β² ≤ 9`
/// region on every real segment, which keeps each segment monotone.
pub(crate) fn fritsch_carlson(ext: &[ControlPoint]) -> Vec<f32> {
    let delta: Vec<f32> = ext.windows(2).map(|w| secant(w[0], w[1])).collect();
    let mut m: Vec<f32> = delta
        .windows(2)
        .map(|d| {
            if d[0] * d[1] <= 0.0 {
                0.0
            } else {
                0.5 * (d[0] + d[1])
            }
        })
        .collect();

    // m[j] belongs to ext[j + 1]; the segment m[j] -> m[j + 1] has secant delta[j + 1].
    for j in 0..m.len() - 1 {
        let d = delta[j + 1];
        if d == 0.0 {
            m[j] = 0.0;
            m[j + 1] = 0.0;
            continue;
        }
        let alpha = m[j] / d;
        let beta = m[j + 1] / d;
        let r = alpha * alpha + beta * beta;
        if r > 9.0 {
            let tau = 3.0 / r.sqrt();
            m[j] = tau * alpha * d;
            m[j + 1] = tau * beta * d;
        }
    }
    m
}
