// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use float_cmp::ApproxEq;

/// Representation of the [`<transform>`] type.
///
/// Maps `(x, y)` into `(a*x + c*y + e, b*x + d*y + f)`.
///
/// [`<transform>`]: https://www.w3.org/TR/SVG2/coords.html#InterfaceSVGTransform
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl From<svgtypes::Transform> for Transform {
    fn from(ts: svgtypes::Transform) -> Self {
        Transform::new(ts.a, ts.b, ts.c, ts.d, ts.e, ts.f)
    }
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a new translate transform.
    #[inline]
    pub fn new_translate(x: f64, y: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Constructs a new scale transform.
    #[inline]
    pub fn new_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a new rotate transform.
    #[inline]
    pub fn new_rotate(angle: f64) -> Self {
        let v = angle.to_radians();
        let a = v.cos();
        let b = v.sin();
        let c = -b;
        let d = a;
        Transform::new(a, b, c, d, 0.0, 0.0)
    }

    /// Constructs a new skew transform along then X axis.
    #[inline]
    pub fn new_skew_x(angle: f64) -> Self {
        let c = angle.to_radians().tan();
        Transform::new(1.0, 0.0, c, 1.0, 0.0, 0.0)
    }

    /// Parses a `transform` attribute value.
    ///
    /// Returns `None` when the value is malformed.
    pub fn from_attribute(text: &str) -> Option<Self> {
        let ts = svgtypes::Transform::from_str(text).ok()?;
        let ts = Transform::from(ts);
        if ts.is_finite() {
            Some(ts)
        } else {
            None
        }
    }

    /// Returns a transform that applies `inner` first and then `self`.
    ///
    /// In SVG terms, `self` is the parent's transform and `inner` is the child's one.
    #[inline]
    pub fn pre_concat(&self, inner: &Transform) -> Transform {
        multiply(self, inner)
    }

    /// Appends transform to the current transform.
    #[inline]
    pub fn append(&mut self, other: &Transform) {
        *self = multiply(self, other);
    }

    /// Returns `true` if the transform is default, aka `(1 0 0 1 0 0)`.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.is_identity(0.0)
    }

    /// Returns `true` if every coefficient is within `tolerance`
    /// of the corresponding identity coefficient.
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.fuzzy_eq(&Transform::default(), tolerance)
    }

    /// Compares two transforms coefficient-wise using an absolute tolerance.
    pub fn fuzzy_eq(&self, other: &Transform, tolerance: f64) -> bool {
        is_equal(self.a, other.a, tolerance)
            && is_equal(self.b, other.b, tolerance)
            && is_equal(self.c, other.c, tolerance)
            && is_equal(self.d, other.d, tolerance)
            && is_equal(self.e, other.e, tolerance)
            && is_equal(self.f, other.f, tolerance)
    }

    /// Returns `true` if all coefficients are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.e.is_finite()
            && self.f.is_finite()
    }

    /// Returns transform's scale part.
    #[inline]
    pub fn get_scale(&self) -> (f64, f64) {
        let x_scale = (self.a * self.a + self.c * self.c).sqrt();
        let y_scale = (self.b * self.b + self.d * self.d).sqrt();
        (x_scale, y_scale)
    }

    /// Returns a single scale factor for one-dimensional lengths, like `stroke-width`.
    ///
    /// This is `sqrt(|a*d|)`. Exact for uniform scales, a geometric mean otherwise.
    #[inline]
    pub fn scale_factor(&self) -> f64 {
        (self.a * self.d).abs().sqrt()
    }

    /// Returns a transform that keeps only the vertical scale, aka `(1 0 0 d 0 0)`.
    #[inline]
    pub fn vertical_only(&self) -> Transform {
        Transform::new_scale(1.0, self.d)
    }

    /// Returns the inverted transform.
    ///
    /// Returns `None` when the transform is not invertible.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det.approx_eq(0.0, (f64::EPSILON, 4)) || !det.is_finite() {
            return None;
        }

        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        let e = -(a * self.e + c * self.f);
        let f = -(b * self.e + d * self.f);
        Some(Transform::new(a, b, c, d, e, f))
    }

    /// Applies transform to selected coordinates.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let new_x = self.a * x + self.c * y + self.e;
        let new_y = self.b * x + self.d * y + self.f;
        (new_x, new_y)
    }

    /// Applies transform to selected coordinates.
    #[inline]
    pub fn apply_to(&self, x: &mut f64, y: &mut f64) {
        let tx = *x;
        let ty = *y;
        *x = self.a * tx + self.c * ty + self.e;
        *y = self.b * tx + self.d * ty + self.f;
    }
}

#[inline(never)]
fn multiply(ts1: &Transform, ts2: &Transform) -> Transform {
    Transform {
        a: ts1.a * ts2.a + ts1.c * ts2.b,
        b: ts1.b * ts2.a + ts1.d * ts2.b,
        c: ts1.a * ts2.c + ts1.c * ts2.d,
        d: ts1.b * ts2.c + ts1.d * ts2.d,
        e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
        f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
    }
}

/// Compares two numbers using an absolute tolerance.
#[inline]
pub(crate) fn is_equal(a: f64, b: f64, tolerance: f64) -> bool {
    a.approx_eq(b, (tolerance, 0))
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}
