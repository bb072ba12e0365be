// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::path::write_num;

/// A warning kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WarningKind {
    /// A circle or an ellipse was converted using a best-effort approximation.
    ApproximateShape,
    /// Only the anchor point of a text element was transformed.
    TextTransform,
    /// A shape cannot hold a transform without being converted to a path.
    UnsupportedShape,
}

/// A non-fatal problem found during fusion.
#[derive(Clone, PartialEq, Debug)]
pub struct Warning {
    /// The warning kind.
    pub kind: WarningKind,
    /// Element's tag name.
    pub tag: String,
    /// Element's `id` attribute. Can be empty.
    pub id: String,
    /// Best-effort radii written to an approximated circle or ellipse.
    pub radii: Option<(f64, f64)>,
}

impl Warning {
    pub(crate) fn new(kind: WarningKind, tag: &str, id: &str) -> Self {
        Warning {
            kind,
            tag: tag.to_string(),
            id: id.to_string(),
            radii: None,
        }
    }

    pub(crate) fn with_radii(mut self, rx: f64, ry: f64) -> Self {
        self.radii = Some((rx, ry));
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = if self.id.is_empty() {
            self.tag.clone()
        } else {
            format!("{} ({})", self.tag, self.id)
        };

        match self.kind {
            WarningKind::ApproximateShape => {
                write!(
                    f,
                    "Shape {} is approximate only, try converting it to a path first",
                    name
                )?;

                if let Some((rx, ry)) = self.radii {
                    let mut buf = String::new();
                    buf.push_str(" (best-effort radii: rx=");
                    write_num(rx, &mut buf, 3);
                    buf.push_str(", ry=");
                    write_num(ry, &mut buf, 3);
                    buf.push(')');
                    f.write_str(&buf)?;
                }

                Ok(())
            }
            WarningKind::TextTransform => write!(
                f,
                "Only scale and translate transforms will be applied to shape {}",
                name
            ),
            WarningKind::UnsupportedShape => write!(
                f,
                "Shape {} not yet supported, try converting it to a path first",
                name
            ),
        }
    }
}

/// A warnings receiver.
pub trait WarningSink {
    /// Receives a warning.
    fn warn(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// A sink that forwards warnings to the `log` crate.
#[derive(Clone, Copy, Default, Debug)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
    }
}
