// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgbake` bakes [SVG] transforms into the shapes geometry.

Many consumers, like plotters, laser cutters and simple renderers, ignore
or mishandle the `transform` attribute. `svgbake` walks the document, composes
transforms from the root down to each element and applies them directly
to element's coordinates, so the resulting document has no transforms at all.

## Features

- Paths, polylines, polygons and lines are transformed exactly.
  Path data is rewritten using only absolute *MoveTo*, *LineTo*, *CurveTo*,
  *Quadratic* and *ClosePath* segments. Arcs are converted into curves
- Circles and ellipses are transformed exactly under translate, uniform scale
  and rotation. Ellipses also support a non-uniform scale.
  Other transforms produce a best-effort approximation and a warning
- `stroke-width` is scaled by the transform's scale factor
- Text anchors are moved and `font-size` is scaled by the vertical scale
- Inkscape and Sodipodi attributes are removed from paths,
  so the editor will not regenerate the original geometry

## Limitations

- `rect`, `image` and `use` are not supported and must be converted into paths first
- Rotated and skewed text is not supported
- Only unitless and `px` lengths are transformed
- Gradients, patterns and clip paths defined in user space are not adjusted

[SVG]: https://en.wikipedia.org/wiki/Scalable_Vector_Graphics
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

mod fuser;
mod options;
mod path;
mod shapes;
mod style;
mod transform;
mod warning;

pub use rwsvgtree;

pub use fuser::{fuse_document, fuse_node};
pub use options::Options;
pub use path::{parse_points, try_parse_points, write_points, PathData, PathSegment, Truncated};
pub use shapes::{transform_shape, Approximation, ShapeKind, ShapeOutcome};
pub use style::{scale_length, Declaration, Style};
pub use transform::Transform;
pub use warning::{LogSink, Warning, WarningKind, WarningSink};
