use xmlwriter::XmlWriter;

use crate::{Document, Node, NodeKind};

pub use xmlwriter::Indent;

/// XML writing options.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Use single quote marks instead of double quote.
    ///
    /// # Examples
    ///
    /// Before:
    ///
    /// ```text
    /// <rect fill="red"/>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <rect fill='red'/>
    /// ```
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// # Examples
    ///
    /// `Indent::None`
    /// Before:
    ///
    /// ```text
    /// <svg>
    ///     <rect fill="red"/>
    /// </svg>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <svg><rect fill="red"/></svg>
    /// ```
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// # Examples
    ///
    /// `Indent::Spaces(2)`
    ///
    /// Before:
    ///
    /// ```text
    /// <svg>
    ///     <rect fill="red" stroke="black"/>
    /// </svg>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <svg>
    ///     <rect
    ///       fill="red"
    ///       stroke="black"/>
    /// </svg>
    /// ```
    ///
    /// Default: `None`
    pub attributes_indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            use_single_quote: false,
            indent: Indent::Spaces(4),
            attributes_indent: Indent::None,
        }
    }
}

impl Document {
    /// Writes the document back to SVG.
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        let mut xml = XmlWriter::new(xmlwriter::Options {
            use_single_quote: opt.use_single_quote,
            indent: opt.indent,
            attributes_indent: opt.attributes_indent,
        });

        write_children(self.root(), false, &mut xml);

        xml.end_document()
    }
}

fn write_children(parent: Node, preserve_whitespaces: bool, xml: &mut XmlWriter) {
    for node in parent.children() {
        match node.d.kind {
            NodeKind::Element { ref name, .. } => {
                xml.start_element(&name.to_string());

                for ns in node.namespaces() {
                    match ns.prefix {
                        Some(ref prefix) => {
                            xml.write_attribute(&format!("xmlns:{}", prefix), &escape(&ns.uri))
                        }
                        None => xml.write_attribute("xmlns", &escape(&ns.uri)),
                    }
                }

                for attr in node.attributes() {
                    xml.write_attribute(&attr.name.to_string(), &escape(&attr.value));
                }

                // Indention inside text elements would change the rendered text.
                let preserve = !preserve_whitespaces
                    && node.tag_name().map(|t| t.is_text_content()).unwrap_or(false);
                if preserve {
                    xml.set_preserve_whitespaces(true);
                }

                if node.has_children() {
                    write_children(node, preserve_whitespaces || preserve, xml);
                }

                xml.end_element();

                if preserve {
                    xml.set_preserve_whitespaces(false);
                }
            }
            NodeKind::Text(ref text) => {
                xml.write_text(&text.replace('&', "&amp;"));
            }
            NodeKind::Comment(ref text) => {
                xml.write_comment(text);
            }
            NodeKind::Root => {}
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}
