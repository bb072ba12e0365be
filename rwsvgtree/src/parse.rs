use std::collections::HashMap;

use crate::{
    AId, Attribute, Document, EId, Error, Namespace, NodeData, NodeId, NodeKind, QName,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";

impl Document {
    /// Parses a [`Document`] from raw data.
    ///
    /// GZip compressed data (SVGZ) is decompressed first.
    pub fn parse_data(data: &[u8]) -> Result<Document, Error> {
        if data.starts_with(&[0x1f, 0x8b]) {
            let data = decompress_svgz(data)?;
            let text = std::str::from_utf8(&data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::parse_str(text)
        } else {
            let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::parse_str(text)
        }
    }

    /// Parses a [`Document`] from a string.
    pub fn parse_str(text: &str) -> Result<Document, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let xml = roxmltree::Document::parse_with_options(text, xml_opt)?;
        Self::parse_tree(&xml)
    }

    /// Parses a [`Document`] from a [`roxmltree::Document`].
    pub fn parse_tree(xml: &roxmltree::Document) -> Result<Document, Error> {
        parse(xml)
    }

    pub(crate) fn append(&mut self, parent_id: NodeId, kind: NodeKind) -> NodeId {
        let new_child_id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent_id),
            next_sibling: None,
            children: None,
            kind,
        });

        let last_child_id = self.nodes[parent_id.get_usize()].children.map(|(_, id)| id);

        if let Some(id) = last_child_id {
            self.nodes[id.get_usize()].next_sibling = Some(new_child_id);
        }

        self.nodes[parent_id.get_usize()].children = Some(
            if let Some((first_child_id, _)) = self.nodes[parent_id.get_usize()].children {
                (first_child_id, new_child_id)
            } else {
                (new_child_id, new_child_id)
            },
        );

        new_child_id
    }
}

/// Decompresses an SVGZ file.
pub fn decompress_svgz(data: &[u8]) -> Result<Vec<u8>, Error> {
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut decoded = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut decoded)
        .map_err(|_| Error::MalformedGZip)?;
    Ok(decoded)
}

fn parse(xml: &roxmltree::Document) -> Result<Document, Error> {
    let mut doc = Document {
        nodes: Vec::new(),
        links: HashMap::new(),
    };

    // Add a root node.
    doc.nodes.push(NodeData {
        parent: None,
        next_sibling: None,
        children: None,
        kind: NodeKind::Root,
    });

    let root_id = doc.root().id();
    parse_xml_node_children(xml.root(), root_id, None, &mut doc)?;

    // Check that the root element is `svg`.
    match doc.root().first_element_child() {
        Some(child) => {
            if child.tag_name() != Some(EId::Svg) {
                return Err(Error::NoRootSvg);
            }
        }
        None => return Err(Error::NoRootSvg),
    }

    // Collect all elements with `id` attribute.
    let mut links = HashMap::new();
    for node in doc.descendants() {
        if let Some(id) = node.attribute(AId::Id) {
            if links.contains_key(id) {
                log::warn!("Element ID '{}' is not unique. Only the first one will be used.", id);
            } else {
                links.insert(id.to_string(), node.id());
            }
        }
    }
    doc.links = links;

    Ok(doc)
}

fn parse_xml_node_children(
    parent: roxmltree::Node,
    parent_id: NodeId,
    parent_tag: Option<EId>,
    doc: &mut Document,
) -> Result<(), Error> {
    for node in parent.children() {
        parse_xml_node(node, parent_id, parent_tag, doc)?;
    }

    Ok(())
}

fn parse_xml_node(
    node: roxmltree::Node,
    parent_id: NodeId,
    parent_tag: Option<EId>,
    doc: &mut Document,
) -> Result<(), Error> {
    if doc.nodes.len() > 1_000_000 {
        return Err(Error::ElementsLimitReached);
    }

    match node.node_type() {
        roxmltree::NodeType::Element => {
            let name = parse_qname(node, node.tag_name().namespace(), node.tag_name().name());
            let tag_name = parse_tag_name(node);

            let attributes = node
                .attributes()
                .map(|attr| Attribute {
                    name: parse_qname(node, attr.namespace(), attr.name()),
                    value: attr.value().to_string(),
                })
                .collect();

            let kind = NodeKind::Element {
                name,
                tag_name,
                attributes,
                namespaces: declared_namespaces(node),
            };

            let node_id = doc.append(parent_id, kind);
            parse_xml_node_children(node, node_id, tag_name, doc)?;
        }
        roxmltree::NodeType::Text => {
            let text = node.text().unwrap_or_default();
            // Formatting whitespaces are regenerated during writing.
            let is_text_content = parent_tag.map(|t| t.is_text_content()).unwrap_or(false);
            if is_text_content || !text.trim().is_empty() {
                doc.append(parent_id, NodeKind::Text(text.to_string()));
            }
        }
        roxmltree::NodeType::Comment => {
            let text = node.text().unwrap_or_default();
            doc.append(parent_id, NodeKind::Comment(text.to_string()));
        }
        roxmltree::NodeType::Root | roxmltree::NodeType::PI => {}
    }

    Ok(())
}

fn parse_tag_name(node: roxmltree::Node) -> Option<EId> {
    match node.tag_name().namespace() {
        None | Some(SVG_NS) => EId::from_str(node.tag_name().name()),
        _ => None,
    }
}

fn parse_qname(node: roxmltree::Node, namespace: Option<&str>, local: &str) -> QName {
    let prefix = match namespace {
        Some(XML_NAMESPACE_NS) => Some("xml".to_string()),
        Some(uri) => node.lookup_prefix(uri).map(|p| p.to_string()),
        None => None,
    };

    QName {
        prefix,
        namespace: namespace.map(|ns| ns.to_string()),
        local: local.to_string(),
    }
}

/// Collects namespaces that are in scope of the `node`, but not of its parent.
fn declared_namespaces(node: roxmltree::Node) -> Vec<Namespace> {
    let parent = node.parent_element();
    let is_inherited = |prefix: Option<&str>, uri: &str| match parent {
        Some(parent) => parent
            .namespaces()
            .any(|ns| ns.name() == prefix && ns.uri() == uri),
        None => false,
    };

    node.namespaces()
        .filter(|ns| ns.uri() != XML_NAMESPACE_NS)
        .filter(|ns| !is_inherited(ns.name(), ns.uri()))
        .map(|ns| Namespace {
            prefix: ns.name().map(|p| p.to_string()),
            uri: ns.uri().to_string(),
        })
        .collect()
}
