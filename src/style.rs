// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use float_cmp::ApproxEqUlps;
use rwsvgtree::{AId, Document, NodeId};
use svgtypes::{Length, LengthUnit};

use crate::path::write_num;
use crate::Options;

/// A single style declaration.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

/// A parsed `style` attribute.
///
/// Keeps declarations in their original order. Unknown properties are kept as is.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Style(pub Vec<Declaration>);

impl Style {
    /// Parses a `style` attribute value.
    ///
    /// Malformed declarations are skipped.
    pub fn parse(text: &str) -> Self {
        let mut list = Vec::new();
        for declaration in simplecss::DeclarationTokenizer::from(text) {
            list.push(Declaration {
                name: declaration.name.to_string(),
                value: declaration.value.to_string(),
                important: declaration.important,
            });
        }

        Style(list)
    }

    /// Returns a property value.
    ///
    /// When a property is set multiple times, the last one wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Sets a property value.
    ///
    /// Replaces the last declaration with the same name or appends a new one.
    pub fn set(&mut self, name: &str, value: String) {
        match self.0.iter_mut().rev().find(|d| d.name == name) {
            Some(d) => d.value = value,
            None => self.0.push(Declaration {
                name: name.to_string(),
                value,
                important: false,
            }),
        }
    }

    /// Checks that the style has no declarations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ";")?;
            }

            write!(f, "{}:{}", d.name, d.value)?;
            if d.important {
                write!(f, " !important")?;
            }
        }

        Ok(())
    }
}

/// Scales a length property by `factor`.
///
/// Only unitless and `px` values are scaled. The result is clamped to `min`
/// and written back with the same unit and the specified precision.
///
/// Returns `true` when the property was changed.
pub fn scale_length(style: &mut Style, name: &str, factor: f64, min: f64, precision: u8) -> bool {
    let value = match style.get(name) {
        Some(v) => v,
        None => return false,
    };

    let length = match Length::from_str(value.trim()) {
        Ok(v) => v,
        Err(_) => return false,
    };

    let suffix = match length.unit {
        LengthUnit::None => "",
        LengthUnit::Px => "px",
        _ => return false,
    };

    if !length.number.is_finite() || length.number.is_sign_negative() {
        return false;
    }

    let new_number = (length.number * factor).max(min);
    if new_number.approx_eq_ulps(&length.number, 4) {
        return false;
    }

    let mut text = String::new();
    write_num(new_number, &mut text, precision);
    text.push_str(suffix);
    style.set(name, text);
    true
}

/// Scales length properties inside the node's `style` attribute.
///
/// The attribute is rewritten only when at least one property was changed.
pub(crate) fn scale_node_style(
    doc: &mut Document,
    id: NodeId,
    properties: &[(&str, f64)],
    opt: &Options,
) {
    let mut style = match doc.node(id).attribute(AId::Style) {
        Some(text) => Style::parse(text),
        None => return,
    };

    let mut changed = false;
    for &(name, factor) in properties {
        changed |= scale_length(
            &mut style,
            name,
            factor,
            opt.min_length,
            opt.coordinates_precision,
        );
    }

    if changed {
        doc.node_mut(id).set_attribute(AId::Style, style.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let style = Style::parse("fill:red; stroke-width: 4px !important;font-family:'Noto Sans'");
        assert_eq!(style.0.len(), 3);
        assert_eq!(style.get("fill"), Some("red"));
        assert_eq!(style.get("stroke-width"), Some("4px"));
        assert!(style.0[1].important);
        assert_eq!(style.get("stroke"), None);
    }

    #[test]
    fn write() {
        let style = Style::parse("fill:red; stroke-width: 4px !important");
        assert_eq!(style.to_string(), "fill:red;stroke-width:4px !important");
        assert_eq!(Style::default().to_string(), "");
    }

    #[test]
    fn set_keeps_order() {
        let mut style = Style::parse("fill:red;stroke:blue");
        style.set("fill", "green".to_string());
        style.set("opacity", "0.5".to_string());
        assert_eq!(style.to_string(), "fill:green;stroke:blue;opacity:0.5");
    }

    macro_rules! test_scale {
        ($name:ident, $text:expr, $factor:expr, $result:expr) => (
            #[test]
            fn $name() {
                let mut style = Style::parse($text);
                scale_length(&mut style, "stroke-width", $factor, 0.1, 8);
                assert_eq!(style.to_string(), $result);
            }
        )
    }

    test_scale!(scale_px, "stroke-width:4px", 2.0, "stroke-width:8px");
    test_scale!(scale_unitless, "stroke-width:1.5", 3.0, "stroke-width:4.5");
    test_scale!(scale_fract, "stroke-width:1px", 1.0 / 3.0, "stroke-width:0.33333333px");
    test_scale!(scale_min, "stroke-width:1px", 0.001, "stroke-width:0.1px");
    test_scale!(scale_zero, "stroke-width:0", 2.0, "stroke-width:0.1");
    test_scale!(skip_mm, "stroke-width:1mm", 2.0, "stroke-width:1mm");
    test_scale!(skip_percent, "stroke-width:5%", 2.0, "stroke-width:5%");
    test_scale!(skip_negative, "stroke-width:-1px", 2.0, "stroke-width:-1px");
    test_scale!(skip_invalid, "stroke-width:qwe", 2.0, "stroke-width:qwe");
    test_scale!(skip_missing, "fill:red", 2.0, "fill:red");

    #[test]
    fn unchanged_is_reported() {
        let mut style = Style::parse("stroke-width:4px");
        assert!(!scale_length(&mut style, "stroke-width", 1.0, 0.1, 8));
        assert!(scale_length(&mut style, "stroke-width", 2.0, 0.1, 8));
    }

    #[test]
    fn scale_node() {
        let svg = "<svg xmlns='http://www.w3.org/2000/svg'>\
                   <text id='t1' style='font-size:10px;stroke-width:2px;fill:red'/>\
                   <path id='p1' style='fill:red'/></svg>";
        let mut doc = Document::parse_str(svg).unwrap();
        let opt = Options::default();

        let id = doc.element_by_id("t1").unwrap().id();
        scale_node_style(&mut doc, id, &[("stroke-width", 3.0), ("font-size", 2.0)], &opt);
        assert_eq!(
            doc.node(id).attribute(AId::Style),
            Some("font-size:20px;stroke-width:6px;fill:red")
        );

        let id = doc.element_by_id("p1").unwrap().id();
        scale_node_style(&mut doc, id, &[("stroke-width", 3.0)], &opt);
        assert_eq!(doc.node(id).attribute(AId::Style), Some("fill:red"));
    }
}
