// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::Write;

use float_cmp::ApproxEqUlps;

use crate::Transform;

/// A path's absolute segment.
///
/// Unlike the SVG spec, can contain only `M`, `L`, `C`, `Q` and `Z` segments.
/// All other segments will be converted into this one.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Quadratic {
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    ClosePath,
}

/// An SVG path data container.
///
/// All segments are in absolute coordinates.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct PathData(pub Vec<PathSegment>);

impl PathData {
    /// Creates a new path.
    #[inline]
    pub fn new() -> Self {
        PathData(Vec::new())
    }

    /// Parses a path data string.
    ///
    /// Relative, shorthand and arc segments are converted into absolute ones.
    /// Arcs become cubic curves.
    ///
    /// Like in the SVG spec, everything after the first error is ignored.
    /// Use [`PathData::try_parse`] to find out whether it happened.
    pub fn parse(text: &str) -> Self {
        match Self::try_parse(text) {
            Ok(path) => path,
            Err(Truncated(path)) => path,
        }
    }

    /// Parses a path data string, reporting the first error.
    ///
    /// On error, the segments before it are returned inside [`Truncated`].
    pub fn try_parse(text: &str) -> Result<Self, Truncated<Self>> {
        let mut path = PathData::new();
        for segment in svgtypes::SimplifyingPathParser::from(text) {
            let segment = match segment {
                Ok(v) => v,
                Err(_) => return Err(Truncated(path)),
            };

            let segment = match segment {
                svgtypes::SimplePathSegment::MoveTo { x, y } => PathSegment::MoveTo { x, y },
                svgtypes::SimplePathSegment::LineTo { x, y } => PathSegment::LineTo { x, y },
                svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    PathSegment::Quadratic { x1, y1, x, y }
                }
                svgtypes::SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => PathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                },
                svgtypes::SimplePathSegment::ClosePath => PathSegment::ClosePath,
            };

            path.0.push(segment);
        }

        Ok(path)
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks that the path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies the transform to every coordinate.
    pub fn transform(&mut self, ts: &Transform) {
        for seg in &mut self.0 {
            match seg {
                PathSegment::MoveTo { x, y } => {
                    ts.apply_to(x, y);
                }
                PathSegment::LineTo { x, y } => {
                    ts.apply_to(x, y);
                }
                PathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    ts.apply_to(x1, y1);
                    ts.apply_to(x2, y2);
                    ts.apply_to(x, y);
                }
                PathSegment::Quadratic { x1, y1, x, y } => {
                    ts.apply_to(x1, y1);
                    ts.apply_to(x, y);
                }
                PathSegment::ClosePath => {}
            }
        }
    }

    /// Writes the path as an SVG path data string.
    pub fn to_svg_string(&self, precision: u8) -> String {
        let mut buf = String::new();
        for seg in &self.0 {
            match *seg {
                PathSegment::MoveTo { x, y } => {
                    buf.push_str("M ");
                    write_coords(&[x, y], precision, &mut buf);
                }
                PathSegment::LineTo { x, y } => {
                    buf.push_str("L ");
                    write_coords(&[x, y], precision, &mut buf);
                }
                PathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    buf.push_str("C ");
                    write_coords(&[x1, y1, x2, y2, x, y], precision, &mut buf);
                }
                PathSegment::Quadratic { x1, y1, x, y } => {
                    buf.push_str("Q ");
                    write_coords(&[x1, y1, x, y], precision, &mut buf);
                }
                PathSegment::ClosePath => {
                    buf.push_str("Z ");
                }
            }
        }

        buf.pop();
        buf
    }
}

fn write_coords(coords: &[f64], precision: u8, buf: &mut String) {
    for n in coords {
        write_num(*n, buf, precision);
        buf.push(' ');
    }
}

/// A value that was parsed only up to the first error.
#[derive(Clone, PartialEq, Debug)]
pub struct Truncated<T>(pub T);

/// Parses a `points` attribute value.
///
/// An odd trailing coordinate is ignored.
pub fn parse_points(text: &str) -> Vec<(f64, f64)> {
    match try_parse_points(text) {
        Ok(points) => points,
        Err(Truncated(points)) => points,
    }
}

/// Parses a `points` attribute value, reporting the first error.
///
/// An invalid number or an odd trailing coordinate is an error.
pub fn try_parse_points(text: &str) -> Result<Vec<(f64, f64)>, Truncated<Vec<(f64, f64)>>> {
    let mut points = Vec::new();
    let mut x = None;
    for n in svgtypes::NumberListParser::from(text) {
        let n = match n {
            Ok(v) => v,
            Err(_) => return Err(Truncated(points)),
        };

        match x.take() {
            Some(x) => points.push((x, n)),
            None => x = Some(n),
        }
    }

    if x.is_some() {
        return Err(Truncated(points));
    }

    Ok(points)
}

/// Writes points as `x,y x,y ...`.
pub fn write_points(points: &[(f64, f64)], precision: u8) -> String {
    let mut buf = String::new();
    for &(x, y) in points {
        write_num(x, &mut buf, precision);
        buf.push(',');
        write_num(y, &mut buf, precision);
        buf.push(' ');
    }

    buf.pop();
    buf
}

const POW_VEC: &[f64] = &[
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
    1_000_000_000.0,
    10_000_000_000.0,
    100_000_000_000.0,
    1_000_000_000_000.0,
];

/// Writes a number with the specified precision.
pub(crate) fn write_num(num: f64, buf: &mut String, precision: u8) {
    // If number is an integer, it's faster to write it as i64.
    if num.fract().approx_eq_ulps(&0.0, 4) {
        if num.abs() < i64::MAX as f64 {
            write!(buf, "{}", num as i64).unwrap();
        } else {
            // Do not saturate.
            write!(buf, "{}", num).unwrap();
        }

        return;
    }

    // Round numbers up to the specified precision to prevent writing
    // ugly numbers like 29.999999999999996.
    let p = POW_VEC[(precision as usize).min(POW_VEC.len() - 1)];
    let v = (num * p).round() / p;

    if v == 0.0 {
        // Do not write `-0`.
        buf.push('0');
    } else {
        write!(buf, "{}", v).unwrap();
    }
}
