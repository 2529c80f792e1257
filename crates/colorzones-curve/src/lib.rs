//! Spline curves over the unit interval and their lookup tables.
//!
//! A [`Curve`] is built from 2 to 20 control points and one of three
//! interpolation styles. Clamped curves extrapolate flat outside their
//! control points; periodic curves wrap around `x = 0 / x = 1`, which is what
//! a hue axis needs. [`lut::bake`] discretizes a curve into a dense table.

mod curve;
mod error;
pub mod lut;
mod solve;
mod tangents;

pub use curve::{Boundary, ControlPoint, Curve, InterpolationStyle, MAX_NODES, MIN_NODES};
pub use error::{CurveError, CurveResult};
