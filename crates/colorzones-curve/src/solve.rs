//! Small linear solvers for spline second derivatives.

/// Thomas algorithm for a tridiagonal system.
///
/// `sub[0]` and `sup[n - 1]` are ignored. The spline systems solved here are
/// strictly diagonally dominant, so no pivoting is needed.
pub(crate) fn tridiagonal(sub: &[f32], diag: &[f32], sup: &[f32], rhs: &[f32]) -> Vec<f32> {
    let n = diag.len();
    if n == 0 {
        return Vec::new();
    }
    let mut c = vec![0.0_f32; n];
    let mut d = vec![0.0_f32; n];
    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - sub[i] * c[i - 1];
        c[i] = sup[i] / denom;
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / denom;
    }
    let mut x = d;
    for i in (0..n - 1).rev() {
        x[i] -= c[i] * x[i + 1];
    }
    x
}

/// Gaussian elimination with partial pivoting on a row-major `n x n` matrix.
///
/// Used for the cyclic spline system, which has at most
/// [`MAX_NODES`](crate::MAX_NODES) unknowns.
pub(crate) fn dense(mut a: Vec<f32>, mut b: Vec<f32>) -> Vec<f32> {
    let n = b.len();
    debug_assert_eq!(a.len(), n * n);
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i * n + col].abs().total_cmp(&a[j * n + col].abs()))
            .unwrap_or(col);
        if pivot != col {
            for k in 0..n {
                a.swap(col * n + k, pivot * n + k);
            }
            b.swap(col, pivot);
        }
        let p = a[col * n + col];
        for row in col + 1..n {
            let f = a[row * n + col] / p;
            if f == 0.0 {
                continue;
            }
            for k in col..n {
                a[row * n + k] -= f * a[col * n + k];
            }
            b[row] -= f * b[col];
        }
    }
    let mut x = vec![0.0_f32; n];
    for row in (0..n).rev() {
        let tail: f32 = (row + 1..n).map(|k| a[row * n + k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row * n + row];
    }
    x
}
