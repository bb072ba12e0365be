// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Transform fusion options.
#[derive(Clone, Debug)]
pub struct Options {
    /// A list of element IDs to process.
    ///
    /// Each element is processed together with its descendants,
    /// starting from the identity transform.
    /// The whole document is processed when empty.
    ///
    /// Default: empty
    pub selection: Vec<String>,

    /// An absolute tolerance used for all floating-point comparisons.
    ///
    /// Transforms that are equal to the identity within this tolerance
    /// are removed without touching the shape.
    ///
    /// Default: 1e-5
    pub tolerance: f64,

    /// The smallest `stroke-width` produced by scaling.
    ///
    /// Default: 0.1
    pub min_length: f64,

    /// Numbers precision for rewritten coordinates.
    ///
    /// Range: 2..=8
    ///
    /// Default: 8
    pub coordinates_precision: u8,

    /// Removes `sodipodi:*` and `inkscape:*` attributes from `path` elements.
    ///
    /// Such attributes describe the original editor shape (like a star or a spiral)
    /// and would regenerate the path without the baked transform.
    ///
    /// Default: true
    pub strip_editor_data: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            selection: Vec::new(),
            tolerance: 1e-5,
            min_length: 0.1,
            coordinates_precision: 8,
            strip_editor_data: true,
        }
    }
}
