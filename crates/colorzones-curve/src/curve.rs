use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::tangents;

/// Fewest control points a curve may have.
pub const MIN_NODES: usize = 2;
/// Most control points a curve may have.
pub const MAX_NODES: usize = 20;

/// First and last nodes closer than this to a full period apart are the same
/// point on a periodic axis.
const SEAM_EPSILON: f32 = 1e-6;

/// A user-placed node. `x` is the selector position, `y` the output value
/// (0.5 is neutral).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f32,
    pub y: f32,
}

impl ControlPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How knot slopes are chosen between control points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterpolationStyle {
    /// Global C2 spline. Smooth, but may ring with closely spaced nodes.
    CubicSpline,
    /// Local cubic with centripetal knot spacing; no cusps near close nodes.
    CentripetalCatmullRom,
    /// Fritsch-Carlson monotone cubic; never overshoots between nodes.
    #[default]
    MonotoneHermite,
}

impl InterpolationStyle {
    /// Stable integer code used by the parameter blob.
    pub fn code(self) -> i32 {
        match self {
            Self::CubicSpline => 0,
            Self::CentripetalCatmullRom => 1,
            Self::MonotoneHermite => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::CubicSpline),
            1 => Some(Self::CentripetalCatmullRom),
            2 => Some(Self::MonotoneHermite),
            _ => None,
        }
    }
}

/// Behavior at the ends of the unit interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    /// Flat extrapolation beyond the first and last control points.
    Clamped,
    /// `x = 0` and `x = 1` are identified; the curve wraps continuously.
    Periodic,
}

/// Position, value and slope (dy/dx) of one Hermite knot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Knot {
    pub x: f32,
    pub y: f32,
    pub m: f32,
}

/// A validated, immutable curve.
///
/// Every style is evaluated as a piecewise cubic Hermite between consecutive
/// knots; the style only decides the knot slopes. The curve passes exactly
/// through each control point.
#[derive(Clone, Debug)]
pub struct Curve {
    points: Vec<ControlPoint>,
    style: InterpolationStyle,
    boundary: Boundary,
    knots: Vec<Knot>,
}

impl Curve {
    /// Validate `points` and precompute knot slopes.
    ///
    /// Fails when there are fewer than [`MIN_NODES`] or more than
    /// [`MAX_NODES`] points, a coordinate is outside `[0, 1]`, or x is not
    /// strictly increasing. Points are never re-sorted.
    pub fn build(
        points: &[ControlPoint],
        style: InterpolationStyle,
        boundary: Boundary,
    ) -> CurveResult<Self> {
        validate(points)?;
        let knots = match boundary {
            Boundary::Clamped => clamped_knots(points, style),
            Boundary::Periodic => periodic_knots(points, style),
        };
        Ok(Self {
            points: points.to_vec(),
            style,
            boundary,
            knots,
        })
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    pub fn style(&self) -> InterpolationStyle {
        self.style
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Evaluate the curve at `x`.
    pub fn sample(&self, x: f32) -> f32 {
        match self.locate(x) {
            Location::Flat(y) => y,
            Location::Segment(i, x) => {
                let (k0, k1) = (self.knots[i], self.knots[i + 1]);
                let h = k1.x - k0.x;
                let t = (x - k0.x) / h;
                let t2 = t * t;
                let t3 = t2 * t;
                let h01 = 3.0 * t2 - 2.0 * t3;
                let h10 = t3 - 2.0 * t2 + t;
                let h11 = t3 - t2;
                // Difference form keeps constant segments exact.
                k0.y + (k1.y - k0.y) * h01 + h * (h10 * k0.m + h11 * k1.m)
            }
        }
    }

    /// First derivative dy/dx at `x`. Zero in the flat extrapolated region.
    pub fn slope(&self, x: f32) -> f32 {
        match self.locate(x) {
            Location::Flat(_) => 0.0,
            Location::Segment(i, x) => {
                let (k0, k1) = (self.knots[i], self.knots[i + 1]);
                let h = k1.x - k0.x;
                let t = (x - k0.x) / h;
                let t2 = t * t;
                let d01 = 6.0 * (t - t2);
                let d10 = 3.0 * t2 - 4.0 * t + 1.0;
                let d11 = 3.0 * t2 - 2.0 * t;
                (k1.y - k0.y) / h * d01 + d10 * k0.m + d11 * k1.m
            }
        }
    }

    /// `n` evenly spaced samples over `[0, 1]`, both ends included.
    pub fn sample_dense(&self, n: usize) -> Vec<f32> {
        match n {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => {
                let step = 1.0 / (n - 1) as f32;
                (0..n).map(|k| self.sample(k as f32 * step)).collect()
            }
        }
    }

    fn locate(&self, x: f32) -> Location {
        let first = self.knots[0];
        let last = self.knots[self.knots.len() - 1];
        let x = match self.boundary {
            Boundary::Clamped => {
                if x.is_nan() || x <= first.x {
                    return Location::Flat(first.y);
                }
                if x >= last.x {
                    return Location::Flat(last.y);
                }
                x
            }
            Boundary::Periodic => {
                if x >= first.x && x < last.x {
                    x
                } else {
                    first.x + (x - first.x).rem_euclid(1.0)
                }
            }
        };
        let upper = self.knots.partition_point(|k| k.x <= x);
        let i = upper.clamp(1, self.knots.len() - 1) - 1;
        Location::Segment(i, x)
    }
}

enum Location {
    Flat(f32),
    Segment(usize, f32),
}

fn validate(points: &[ControlPoint]) -> CurveResult<()> {
    if points.len() < MIN_NODES || points.len() > MAX_NODES {
        return Err(CurveError::InvalidCurveDefinition(format!(
            "expected {MIN_NODES}..={MAX_NODES} nodes, got {}",
            points.len()
        )));
    }
    let unit = 0.0..=1.0;
    for (i, p) in points.iter().enumerate() {
        if !unit.contains(&p.x) || !unit.contains(&p.y) {
            return Err(CurveError::InvalidCurveDefinition(format!(
                "node {i} ({}, {}) lies outside the unit square",
                p.x, p.y
            )));
        }
    }
    for (i, pair) in points.windows(2).enumerate() {
        if pair[1].x <= pair[0].x {
            return Err(CurveError::InvalidCurveDefinition(format!(
                "node {} x={} does not exceed node {i} x={}",
                i + 1,
                pair[1].x,
                pair[0].x
            )));
        }
    }
    Ok(())
}

/// Real nodes plus one virtual neighbor on each side that repeats the
/// endpoint value, so end tangents flatten out.
fn clamped_knots(points: &[ControlPoint], style: InterpolationStyle) -> Vec<Knot> {
    let n = points.len();
    let mut ext = Vec::with_capacity(n + 2);
    ext.push(ControlPoint::new(points[n - 2].x - 1.0, points[0].y));
    ext.extend_from_slice(points);
    ext.push(ControlPoint::new(points[1].x + 1.0, points[n - 1].y));

    let slopes = match style {
        InterpolationStyle::CubicSpline => tangents::natural_spline(&ext),
        InterpolationStyle::CentripetalCatmullRom => tangents::catmull_rom(&ext),
        InterpolationStyle::MonotoneHermite => tangents::fritsch_carlson(&ext),
    };
    to_knots(points, &slopes)
}

/// One period of distinct nodes, closed by the first node's twin at `x + 1`.
fn periodic_knots(points: &[ControlPoint], style: InterpolationStyle) -> Vec<Knot> {
    let n = points.len();
    let base = if points[n - 1].x - points[0].x >= 1.0 - SEAM_EPSILON {
        &points[..n - 1]
    } else {
        points
    };
    let m = base.len();
    let twin = ControlPoint::new(base[0].x + 1.0, base[0].y);

    if m == 1 {
        return to_knots(&[base[0], twin], &[0.0, 0.0]);
    }

    let mut real = base.to_vec();
    real.push(twin);

    let mut slopes = match style {
        InterpolationStyle::CubicSpline => {
            let mut s = tangents::periodic_spline(base);
            s.push(s[0]);
            s
        }
        InterpolationStyle::CentripetalCatmullRom | InterpolationStyle::MonotoneHermite => {
            let mut ext = Vec::with_capacity(m + 3);
            ext.push(ControlPoint::new(base[m - 1].x - 1.0, base[m - 1].y));
            ext.extend_from_slice(&real);
            ext.push(ControlPoint::new(base[1].x + 1.0, base[1].y));
            if style == InterpolationStyle::MonotoneHermite {
                tangents::fritsch_carlson(&ext)
            } else {
                tangents::catmull_rom(&ext)
            }
        }
    };

    // Both ends of the seam are one knot; keep the gentler slope so
    // monotone limits on either side still hold.
    let (head, tail) = (slopes[0], slopes[m]);
    let seam = if head.abs() <= tail.abs() { head } else { tail };
    slopes[0] = seam;
    slopes[m] = seam;

    to_knots(&real, &slopes)
}

fn to_knots(points: &[ControlPoint], slopes: &[f32]) -> Vec<Knot> {
    points
        .iter()
        .zip(slopes)
        .map(|(p, &m)| Knot { x: p.x, y: p.y, m })
        .collect()
}
