// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use rwsvgtree::{AId, Document, EId, Node, NodeId};
use svgtypes::{Length, LengthUnit};

use crate::path::{try_parse_points, write_num, write_points, PathData, Truncated};
use crate::style::scale_node_style;
use crate::transform::is_equal;
use crate::{Options, Transform};

/// A shape kind.
///
/// Decides how a transform is applied to an element.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum ShapeKind {
    /// Any element with a `d` attribute.
    Path,
    Polygon,
    Polyline,
    Line,
    Circle,
    Ellipse,
    Text,
    Tspan,
    Rect,
    Image,
    Use,
    /// Containers and everything else without own geometry.
    Other,
}

impl ShapeKind {
    /// Classifies an element.
    pub fn from_node(node: Node) -> Self {
        if node.has_attribute(AId::D) {
            return ShapeKind::Path;
        }

        match node.tag_name() {
            Some(EId::Path) => ShapeKind::Path,
            Some(EId::Polygon) => ShapeKind::Polygon,
            Some(EId::Polyline) => ShapeKind::Polyline,
            Some(EId::Line) => ShapeKind::Line,
            Some(EId::Circle) => ShapeKind::Circle,
            Some(EId::Ellipse) => ShapeKind::Ellipse,
            Some(EId::Text) => ShapeKind::Text,
            Some(EId::Tspan) => ShapeKind::Tspan,
            Some(EId::Rect) => ShapeKind::Rect,
            Some(EId::Image) => ShapeKind::Image,
            Some(EId::Use) => ShapeKind::Use,
            _ => ShapeKind::Other,
        }
    }
}

/// An approximation details.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Approximation {
    /// A circle or an ellipse was mapped to an axis-aligned ellipse
    /// with the specified radii, while the exact result is rotated or skewed.
    ///
    /// Circles keep only `rx`.
    Ellipse {
        /// Best-effort horizontal radius.
        rx: f64,
        /// Best-effort vertical radius.
        ry: f64,
    },
    /// Only the text anchor was moved. Rotation and skew were ignored.
    TextAnchor,
}

/// A transform application outcome.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ShapeOutcome {
    /// The shape was transformed exactly.
    Exact,
    /// The shape was transformed approximately.
    Approximate(Approximation),
    /// The shape was left untouched.
    Unsupported,
}

struct InvalidAttribute(AId);

/// Applies a transform to the element's geometry.
///
/// `ts` is the complete transform, already including element's own one.
/// The `transform` attribute itself is not touched.
pub fn transform_shape(
    doc: &mut Document,
    id: NodeId,
    kind: ShapeKind,
    ts: &Transform,
    opt: &Options,
) -> ShapeOutcome {
    if ts.is_identity(opt.tolerance) {
        return ShapeOutcome::Exact;
    }

    let stroke_scale = [("stroke-width", ts.scale_factor())];

    let result = match kind {
        ShapeKind::Path => {
            transform_path(doc, id, ts, opt);
            scale_node_style(doc, id, &stroke_scale, opt);
            Ok(ShapeOutcome::Exact)
        }
        ShapeKind::Polygon | ShapeKind::Polyline => {
            transform_points(doc, id, ts, opt);
            scale_node_style(doc, id, &stroke_scale, opt);
            Ok(ShapeOutcome::Exact)
        }
        ShapeKind::Line => {
            let res = transform_line(doc, id, ts, opt);
            scale_node_style(doc, id, &stroke_scale, opt);
            res.map(|_| ShapeOutcome::Exact)
        }
        ShapeKind::Circle | ShapeKind::Ellipse => {
            let res = transform_ellipse(doc, id, kind == ShapeKind::Circle, ts, opt);
            scale_node_style(doc, id, &stroke_scale, opt);
            res
        }
        ShapeKind::Text | ShapeKind::Tspan => {
            let res = transform_text_anchor(doc, id, ts, opt);
            let font_scale = ts.vertical_only().get_scale().1;
            scale_node_style(
                doc,
                id,
                &[stroke_scale[0], ("font-size", font_scale)],
                opt,
            );
            res.map(|_| ShapeOutcome::Approximate(Approximation::TextAnchor))
        }
        ShapeKind::Rect | ShapeKind::Image | ShapeKind::Use => Ok(ShapeOutcome::Unsupported),
        ShapeKind::Other => {
            scale_node_style(doc, id, &stroke_scale, opt);
            Ok(ShapeOutcome::Exact)
        }
    };

    match result {
        Ok(outcome) => outcome,
        Err(InvalidAttribute(aid)) => {
            let node = doc.node(id);
            log::warn!(
                "{} '{}' has an invalid '{}' value. Skipped.",
                node.tag_name_str(),
                node.element_id(),
                aid
            );

            match kind {
                ShapeKind::Text | ShapeKind::Tspan => {
                    ShapeOutcome::Approximate(Approximation::TextAnchor)
                }
                _ => ShapeOutcome::Exact,
            }
        }
    }
}

fn transform_path(doc: &mut Document, id: NodeId, ts: &Transform, opt: &Options) {
    let node = doc.node(id);
    let mut path = match node.attribute(AId::D).map(PathData::try_parse) {
        Some(Ok(path)) => path,
        Some(Err(Truncated(path))) => {
            warn_truncated(node, AId::D);
            path
        }
        None => return,
    };

    if path.is_empty() {
        return;
    }

    path.transform(ts);
    let text = path.to_svg_string(opt.coordinates_precision);
    doc.node_mut(id).set_attribute(AId::D, text);
}

fn transform_points(doc: &mut Document, id: NodeId, ts: &Transform, opt: &Options) {
    let node = doc.node(id);
    let mut points = match node.attribute(AId::Points).map(try_parse_points) {
        Some(Ok(points)) => points,
        Some(Err(Truncated(points))) => {
            warn_truncated(node, AId::Points);
            points
        }
        None => return,
    };

    if points.is_empty() {
        return;
    }

    for (x, y) in &mut points {
        ts.apply_to(x, y);
    }

    let text = write_points(&points, opt.coordinates_precision);
    doc.node_mut(id).set_attribute(AId::Points, text);
}

fn warn_truncated(node: Node, aid: AId) {
    log::warn!(
        "{} '{}' has an invalid '{}' value. Only the part before the error is used.",
        node.tag_name_str(),
        node.element_id(),
        aid
    );
}

fn transform_line(
    doc: &mut Document,
    id: NodeId,
    ts: &Transform,
    opt: &Options,
) -> Result<(), InvalidAttribute> {
    let node = doc.node(id);
    let mut x1 = length_attribute(node, AId::X1)?.unwrap_or(0.0);
    let mut y1 = length_attribute(node, AId::Y1)?.unwrap_or(0.0);
    let mut x2 = length_attribute(node, AId::X2)?.unwrap_or(0.0);
    let mut y2 = length_attribute(node, AId::Y2)?.unwrap_or(0.0);

    ts.apply_to(&mut x1, &mut y1);
    ts.apply_to(&mut x2, &mut y2);

    let p = opt.coordinates_precision;
    let mut node = doc.node_mut(id);
    node.set_attribute(AId::X1, num_to_string(x1, p));
    node.set_attribute(AId::Y1, num_to_string(y1, p));
    node.set_attribute(AId::X2, num_to_string(x2, p));
    node.set_attribute(AId::Y2, num_to_string(y2, p));
    Ok(())
}

fn transform_ellipse(
    doc: &mut Document,
    id: NodeId,
    is_circle: bool,
    ts: &Transform,
    opt: &Options,
) -> Result<ShapeOutcome, InvalidAttribute> {
    let node = doc.node(id);
    let cx = length_attribute(node, AId::Cx)?.unwrap_or(0.0);
    let cy = length_attribute(node, AId::Cy)?.unwrap_or(0.0);
    let (rx, ry) = if is_circle {
        let r = length_attribute(node, AId::R)?.unwrap_or(0.0);
        (r, r)
    } else {
        resolve_rx_ry(node)?
    };

    // Map the bounding box corners.
    let p1 = ts.apply(cx - rx, cy - ry);
    let p2 = ts.apply(cx + rx, cy - ry);
    let p3 = ts.apply(cx + rx, cy + ry);

    let new_cx = (p1.0 + p3.0) / 2.0;
    let new_cy = (p1.1 + p3.1) / 2.0;
    let edge_x = distance(p1, p2);
    let edge_y = distance(p2, p3);

    let tolerance = opt.tolerance;
    let is_axis_aligned = is_equal(p1.1, p2.1, tolerance) && is_equal(p2.0, p3.0, tolerance);
    let is_perpendicular = if edge_x > 0.0 && edge_y > 0.0 {
        let dot = (p2.0 - p1.0) * (p3.0 - p2.0) + (p2.1 - p1.1) * (p3.1 - p2.1);
        is_equal(dot / (edge_x * edge_y), 0.0, tolerance)
    } else {
        true
    };
    let is_similar = is_equal(edge_x, edge_y, tolerance) && is_perpendicular;

    let is_exact = if is_circle {
        is_similar
    } else {
        is_axis_aligned || is_similar
    };

    let p = opt.coordinates_precision;
    let mut node = doc.node_mut(id);
    node.set_attribute(AId::Cx, num_to_string(new_cx, p));
    node.set_attribute(AId::Cy, num_to_string(new_cy, p));
    if is_circle {
        node.set_attribute(AId::R, num_to_string(edge_x / 2.0, p));
    } else {
        node.set_attribute(AId::Rx, num_to_string(edge_x / 2.0, p));
        node.set_attribute(AId::Ry, num_to_string(edge_y / 2.0, p));
    }

    if is_exact {
        Ok(ShapeOutcome::Exact)
    } else {
        Ok(ShapeOutcome::Approximate(Approximation::Ellipse {
            rx: edge_x / 2.0,
            ry: edge_y / 2.0,
        }))
    }
}

fn resolve_rx_ry(node: Node) -> Result<(f64, f64), InvalidAttribute> {
    let mut rx_opt = length_attribute(node, AId::Rx)?;
    let mut ry_opt = length_attribute(node, AId::Ry)?;

    // Remove negative values first.
    if let Some(v) = rx_opt {
        if v.is_sign_negative() {
            rx_opt = None;
        }
    }
    if let Some(v) = ry_opt {
        if v.is_sign_negative() {
            ry_opt = None;
        }
    }

    // Resolve.
    Ok(match (rx_opt, ry_opt) {
        (None, None) => (0.0, 0.0),
        (Some(rx), None) => (rx, rx),
        (None, Some(ry)) => (ry, ry),
        (Some(rx), Some(ry)) => (rx, ry),
    })
}

fn transform_text_anchor(
    doc: &mut Document,
    id: NodeId,
    ts: &Transform,
    opt: &Options,
) -> Result<(), InvalidAttribute> {
    let node = doc.node(id);
    let x = length_attribute(node, AId::X)?;
    let y = length_attribute(node, AId::Y)?;
    if x.is_none() && y.is_none() {
        return Ok(());
    }

    let (x, y) = ts.apply(x.unwrap_or(0.0), y.unwrap_or(0.0));

    let p = opt.coordinates_precision;
    let mut node = doc.node_mut(id);
    node.set_attribute(AId::X, num_to_string(x, p));
    node.set_attribute(AId::Y, num_to_string(y, p));
    Ok(())
}

/// Parses a user space coordinate.
///
/// Only plain numbers and `px` lengths are allowed.
fn length_attribute(node: Node, aid: AId) -> Result<Option<f64>, InvalidAttribute> {
    let text = match node.attribute(aid) {
        Some(v) => v,
        None => return Ok(None),
    };

    match Length::from_str(text.trim()) {
        Ok(Length {
            number,
            unit: LengthUnit::None | LengthUnit::Px,
        }) if number.is_finite() => Ok(Some(number)),
        _ => Err(InvalidAttribute(aid)),
    }
}

fn distance(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    (p2.0 - p1.0).hypot(p2.1 - p1.1)
}

fn num_to_string(num: f64, precision: u8) -> String {
    let mut buf = String::new();
    write_num(num, &mut buf, precision);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(svg: &str) -> Document {
        let text = format!("<svg xmlns='http://www.w3.org/2000/svg'>{}</svg>", svg);
        Document::parse_str(&text).unwrap()
    }

    fn apply(doc: &mut Document, elem_id: &str, ts: Transform) -> ShapeOutcome {
        let node = doc.element_by_id(elem_id).unwrap();
        let id = node.id();
        let kind = ShapeKind::from_node(node);
        transform_shape(doc, id, kind, &ts, &Options::default())
    }

    fn attr<'a>(doc: &'a Document, elem_id: &str, aid: AId) -> Option<&'a str> {
        doc.element_by_id(elem_id).unwrap().attribute(aid)
    }

    #[test]
    fn classify() {
        let doc = parse(
            "<g id='g1' d='M 0 0'/><path id='p1'/><rect id='r1'/><g id='g2'/><switch id='s1'/>",
        );
        let kind = |id| ShapeKind::from_node(doc.element_by_id(id).unwrap());
        assert_eq!(kind("g1"), ShapeKind::Path);
        assert_eq!(kind("p1"), ShapeKind::Path);
        assert_eq!(kind("r1"), ShapeKind::Rect);
        assert_eq!(kind("g2"), ShapeKind::Other);
        assert_eq!(kind("s1"), ShapeKind::Other);
    }

    #[test]
    fn identity_is_noop() {
        let mut doc = parse("<rect id='r1' x='1'/><path id='p1' d='m 1 1 h 10' style='stroke-width:3'/>");
        let ts = Transform::new(1.000001, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(apply(&mut doc, "r1", ts), ShapeOutcome::Exact);
        assert_eq!(apply(&mut doc, "p1", ts), ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "p1", AId::D), Some("m 1 1 h 10"));
        assert_eq!(attr(&doc, "p1", AId::Style), Some("stroke-width:3"));
    }

    #[test]
    fn path() {
        let mut doc = parse("<path id='p1' d='m 10 20 l 10 0' style='stroke-width:1px'/>");
        let outcome = apply(&mut doc, "p1", Transform::new(2.0, 0.0, 0.0, 2.0, 10.0, 0.0));
        assert_eq!(outcome, ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "p1", AId::D), Some("M 30 40 L 50 40"));
        assert_eq!(attr(&doc, "p1", AId::Style), Some("stroke-width:2px"));
    }

    #[test]
    fn invalid_path_is_kept() {
        let mut doc = parse("<path id='p1' d='qwe'/>");
        apply(&mut doc, "p1", Transform::new_translate(1.0, 1.0));
        assert_eq!(attr(&doc, "p1", AId::D), Some("qwe"));
    }

    #[test]
    fn partially_invalid_path() {
        let mut doc = parse(
            "<path id='p1' d='M 0 0 L 1 1 L 2 x 5 5'/><polygon id='p2' points='1,1 2,2 3'/>",
        );
        let ts = Transform::new_translate(1.0, 0.0);
        assert_eq!(apply(&mut doc, "p1", ts), ShapeOutcome::Exact);
        assert_eq!(apply(&mut doc, "p2", ts), ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "p1", AId::D), Some("M 1 0 L 2 1"));
        assert_eq!(attr(&doc, "p2", AId::Points), Some("2,1 3,2"));
    }

    #[test]
    fn polyline() {
        let mut doc = parse("<polyline id='p1' points='0,0 10 20'/><polygon id='p2' points='1,1'/>");
        let ts = Transform::new_translate(5.0, -5.0);
        assert_eq!(apply(&mut doc, "p1", ts), ShapeOutcome::Exact);
        assert_eq!(apply(&mut doc, "p2", ts), ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "p1", AId::Points), Some("5,-5 15,15"));
        assert_eq!(attr(&doc, "p2", AId::Points), Some("6,-4"));
    }

    #[test]
    fn line() {
        let mut doc = parse("<line id='l1' x1='1' y1='2' x2='3px'/>");
        let outcome = apply(&mut doc, "l1", Transform::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0));
        assert_eq!(outcome, ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "l1", AId::X1), Some("-2"));
        assert_eq!(attr(&doc, "l1", AId::Y1), Some("1"));
        assert_eq!(attr(&doc, "l1", AId::X2), Some("0"));
        assert_eq!(attr(&doc, "l1", AId::Y2), Some("3"));
    }

    #[test]
    fn line_with_units_is_kept() {
        let mut doc = parse("<line id='l1' x1='1mm' y1='2'/>");
        apply(&mut doc, "l1", Transform::new_translate(1.0, 1.0));
        assert_eq!(attr(&doc, "l1", AId::X1), Some("1mm"));
        assert_eq!(attr(&doc, "l1", AId::Y1), Some("2"));
    }

    #[test]
    fn circle_uniform_scale() {
        let mut doc = parse("<circle id='c1' cx='10' cy='20' r='5' style='stroke-width:1'/>");
        let outcome = apply(&mut doc, "c1", Transform::new(2.0, 0.0, 0.0, 2.0, 1.0, 0.0));
        assert_eq!(outcome, ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "c1", AId::Cx), Some("21"));
        assert_eq!(attr(&doc, "c1", AId::Cy), Some("40"));
        assert_eq!(attr(&doc, "c1", AId::R), Some("10"));
        assert_eq!(attr(&doc, "c1", AId::Style), Some("stroke-width:2"));
    }

    #[test]
    fn circle_rotation() {
        let mut doc = parse("<circle id='c1' cx='10' r='5'/>");
        let outcome = apply(&mut doc, "c1", Transform::new_rotate(90.0));
        assert_eq!(outcome, ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "c1", AId::Cx), Some("0"));
        assert_eq!(attr(&doc, "c1", AId::Cy), Some("10"));
        assert_eq!(attr(&doc, "c1", AId::R), Some("5"));
    }

    #[test]
    fn circle_skew() {
        let mut doc = parse("<circle id='c1' r='5'/>");
        let outcome = apply(&mut doc, "c1", Transform::new(1.0, 0.5, 0.0, 2.0, 0.0, 0.0));
        match outcome {
            ShapeOutcome::Approximate(Approximation::Ellipse { rx, ry }) => {
                assert!((rx - ry).abs() > 1e-5);
            }
            _ => panic!("unexpected outcome: {:?}", outcome),
        }
        assert!(attr(&doc, "c1", AId::R).is_some());
    }

    #[test]
    fn ellipse_anisotropic_scale() {
        let mut doc = parse("<ellipse id='e1' cx='1' cy='1' rx='2' ry='3'/>");
        let outcome = apply(&mut doc, "e1", Transform::new_scale(3.0, 0.5));
        assert_eq!(outcome, ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "e1", AId::Cx), Some("3"));
        assert_eq!(attr(&doc, "e1", AId::Cy), Some("0.5"));
        assert_eq!(attr(&doc, "e1", AId::Rx), Some("6"));
        assert_eq!(attr(&doc, "e1", AId::Ry), Some("1.5"));
    }

    #[test]
    fn ellipse_auto_radius() {
        let mut doc = parse("<ellipse id='e1' rx='2'/><ellipse id='e2' rx='-1' ry='4'/>");
        apply(&mut doc, "e1", Transform::new_scale(2.0, 2.0));
        apply(&mut doc, "e2", Transform::new_scale(2.0, 2.0));
        assert_eq!(attr(&doc, "e1", AId::Ry), Some("4"));
        assert_eq!(attr(&doc, "e2", AId::Rx), Some("8"));
        assert_eq!(attr(&doc, "e2", AId::Ry), Some("8"));
    }

    #[test]
    fn ellipse_rotation() {
        let mut doc = parse("<ellipse id='e1' rx='2' ry='3'/>");
        let outcome = apply(&mut doc, "e1", Transform::new_rotate(45.0));
        assert!(matches!(
            outcome,
            ShapeOutcome::Approximate(Approximation::Ellipse { .. })
        ));
    }

    #[test]
    fn text() {
        let mut doc = parse(
            "<text id='t1' x='10' style='font-size:10px;stroke-width:1px'>Text</text>\
             <tspan id='t2'>Text</tspan>",
        );
        let ts = Transform::new(3.0, 0.0, 0.0, 2.0, 1.0, 1.0);
        let outcome = apply(&mut doc, "t1", ts);
        assert_eq!(outcome, ShapeOutcome::Approximate(Approximation::TextAnchor));
        assert_eq!(attr(&doc, "t1", AId::X), Some("31"));
        assert_eq!(attr(&doc, "t1", AId::Y), Some("1"));
        assert_eq!(
            attr(&doc, "t1", AId::Style),
            Some("font-size:20px;stroke-width:2.44948974px")
        );

        let outcome = apply(&mut doc, "t2", ts);
        assert_eq!(outcome, ShapeOutcome::Approximate(Approximation::TextAnchor));
        assert_eq!(attr(&doc, "t2", AId::X), None);
        assert_eq!(attr(&doc, "t2", AId::Y), None);
    }

    #[test]
    fn text_with_list_is_kept() {
        let mut doc = parse("<text id='t1' x='10 20 30' y='5'>Text</text>");
        let outcome = apply(&mut doc, "t1", Transform::new_translate(1.0, 1.0));
        assert_eq!(outcome, ShapeOutcome::Approximate(Approximation::TextAnchor));
        assert_eq!(attr(&doc, "t1", AId::X), Some("10 20 30"));
        assert_eq!(attr(&doc, "t1", AId::Y), Some("5"));
    }

    #[test]
    fn unsupported() {
        let mut doc = parse(
            "<rect id='r1' x='1' y='2' width='3' height='4' style='stroke-width:1'/>\
             <image id='i1' width='1' height='1'/><use id='u1'/>",
        );
        let ts = Transform::new_scale(2.0, 2.0);
        assert_eq!(apply(&mut doc, "r1", ts), ShapeOutcome::Unsupported);
        assert_eq!(apply(&mut doc, "i1", ts), ShapeOutcome::Unsupported);
        assert_eq!(apply(&mut doc, "u1", ts), ShapeOutcome::Unsupported);
        assert_eq!(attr(&doc, "r1", AId::X), Some("1"));
        assert_eq!(attr(&doc, "r1", AId::Width), Some("3"));
        assert_eq!(attr(&doc, "r1", AId::Style), Some("stroke-width:1"));
    }

    #[test]
    fn container_stroke() {
        let mut doc = parse("<g id='g1' style='stroke-width:1;fill:red'/>");
        let outcome = apply(&mut doc, "g1", Transform::new_scale(4.0, 4.0));
        assert_eq!(outcome, ShapeOutcome::Exact);
        assert_eq!(attr(&doc, "g1", AId::Style), Some("stroke-width:4;fill:red"));
    }
}
