// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use rwsvgtree::{AId, Attribute, Document, EId, NodeId};

use crate::shapes::{transform_shape, Approximation, ShapeKind, ShapeOutcome};
use crate::warning::{Warning, WarningKind, WarningSink};
use crate::{Options, Transform};

/// Fuses transforms in the whole document or in the selected elements.
///
/// When `Options::selection` is empty, the root element is processed.
/// Otherwise each selected element is processed from the identity transform,
/// ignoring transforms of its ancestors. Unknown IDs are skipped.
pub fn fuse_document(doc: &mut Document, opt: &Options, sink: &mut dyn WarningSink) {
    if opt.selection.is_empty() {
        let id = doc.root_element().id();
        fuse_node(doc, id, Transform::default(), opt, sink);
        return;
    }

    for elem_id in &opt.selection {
        match doc.element_by_id(elem_id).map(|n| n.id()) {
            Some(id) => fuse_node(doc, id, Transform::default(), opt, sink),
            None => log::warn!("Element '{}' not found. Skipped.", elem_id),
        }
    }
}

/// Fuses transforms of the element and its descendants.
///
/// `ts` is the transform inherited from ancestors.
/// After this call, no element in the subtree has a `transform` attribute.
pub fn fuse_node(
    doc: &mut Document,
    id: NodeId,
    ts: Transform,
    opt: &Options,
    sink: &mut dyn WarningSink,
) {
    if !doc.node(id).is_element() {
        return;
    }

    let transform = doc.node_mut(id).remove_attribute(AId::Transform);
    let local = match transform {
        Some(text) => match Transform::from_attribute(&text) {
            Some(ts) => ts,
            None => {
                let node = doc.node(id);
                log::warn!(
                    "{} '{}' has an invalid 'transform' value: '{}'. Ignored.",
                    node.tag_name_str(),
                    node.element_id(),
                    text
                );
                Transform::default()
            }
        },
        None => Transform::default(),
    };

    let ts = ts.pre_concat(&local);

    if opt.strip_editor_data && doc.node(id).tag_name() == Some(EId::Path) {
        doc.node_mut(id).retain_attributes(|attr| !is_editor_attribute(attr));
    }

    let kind = ShapeKind::from_node(doc.node(id));
    let outcome = transform_shape(doc, id, kind, &ts, opt);
    let warning = {
        let node = doc.node(id);
        let make = |kind| Warning::new(kind, node.tag_name_str(), node.element_id());
        match outcome {
            ShapeOutcome::Exact => None,
            ShapeOutcome::Approximate(Approximation::Ellipse { rx, ry }) => {
                Some(make(WarningKind::ApproximateShape).with_radii(rx, ry))
            }
            ShapeOutcome::Approximate(Approximation::TextAnchor) => {
                Some(make(WarningKind::TextTransform))
            }
            ShapeOutcome::Unsupported => Some(make(WarningKind::UnsupportedShape)),
        }
    };

    if let Some(warning) = warning {
        sink.warn(warning);
    }

    // Children are collected first, because the tree is borrowed mutably later.
    let children: Vec<NodeId> = doc
        .node(id)
        .children()
        .filter(|n| n.is_element())
        .map(|n| n.id())
        .collect();

    for child in children {
        fuse_node(doc, child, ts, opt, sink);
    }
}

/// Checks that an attribute belongs to Inkscape or Sodipodi.
fn is_editor_attribute(attr: &Attribute) -> bool {
    let is_editor = |s: &str| s.contains("sodipodi") || s.contains("inkscape");

    if let Some(ref ns) = attr.name.namespace {
        if is_editor(ns) {
            return true;
        }
    }

    is_editor(&attr.name.to_string())
}
