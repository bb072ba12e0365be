use rwsvgtree::{AId, Document, EId, WriteOptions};

#[test]
fn parse_simple_case() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g id='g1' transform='translate(10 20)'>
            <rect id='rect1' width='10' height='10'/>
        </g>
    </svg>
    ";

    let doc = Document::parse_str(svg).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name(), Some(EId::Svg));

    let g = doc.element_by_id("g1").unwrap();
    assert_eq!(g.tag_name(), Some(EId::G));
    assert_eq!(g.attribute(AId::Transform), Some("translate(10 20)"));
    assert_eq!(g.children().count(), 1);

    let rect = g.first_element_child().unwrap();
    assert_eq!(rect.element_id(), "rect1");
    assert_eq!(rect.parent_element(), Some(g));
}

#[test]
fn root_must_be_svg() {
    let svg = "<html xmlns='http://www.w3.org/1999/xhtml'/>";
    assert!(matches!(
        Document::parse_str(svg),
        Err(rwsvgtree::Error::NoRootSvg)
    ));
}

#[test]
fn malformed_xml() {
    assert!(matches!(
        Document::parse_str("<svg"),
        Err(rwsvgtree::Error::ParsingFailed(_))
    ));
}

#[test]
fn not_utf8() {
    assert!(matches!(
        Document::parse_data(&[0x3c, 0xff, 0xfe]),
        Err(rwsvgtree::Error::NotAnUtf8Str)
    ));
}

#[test]
fn malformed_gzip() {
    assert!(matches!(
        Document::parse_data(&[0x1f, 0x8b, 0x00]),
        Err(rwsvgtree::Error::MalformedGZip)
    ));
}

#[test]
fn svgz() {
    use std::io::Write;

    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><circle id='c1' r='5'/></svg>";
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(svg.as_bytes()).unwrap();
    let data = encoder.finish().unwrap();

    let doc = Document::parse_data(&data).unwrap();
    let circle = doc.element_by_id("c1").unwrap();
    assert_eq!(circle.tag_name(), Some(EId::Circle));
    assert_eq!(circle.attribute(AId::R), Some("5"));
}

#[test]
fn unprefixed_elements_are_svg() {
    let doc = Document::parse_str("<svg><path d='M 0 0'/></svg>").unwrap();
    let path = doc.root_element().first_element_child().unwrap();
    assert_eq!(path.tag_name(), Some(EId::Path));
}

#[test]
fn foreign_elements_are_kept() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:sodipodi='http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd'>
        <sodipodi:namedview id='base'/>
    </svg>
    ";

    let doc = Document::parse_str(svg).unwrap();
    let view = doc.root_element().first_element_child().unwrap();
    assert_eq!(view.tag_name(), None);
    assert_eq!(view.name().unwrap().to_string(), "sodipodi:namedview");
    assert_eq!(view.element_id(), "base");
}

#[test]
fn edit_attributes() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><circle id='c1' cx='1' r='2'/></svg>";
    let mut doc = Document::parse_str(svg).unwrap();
    let id = doc.element_by_id("c1").unwrap().id();

    {
        let mut node = doc.node_mut(id);
        node.set_attribute(AId::Cx, "10");
        node.set_attribute(AId::Cy, "20");
        assert_eq!(node.remove_attribute(AId::R), Some("2".to_string()));
        assert_eq!(node.remove_attribute(AId::R), None);
    }

    let node = doc.node(id);
    assert_eq!(node.attribute(AId::Cx), Some("10"));
    assert_eq!(node.attribute(AId::Cy), Some("20"));
    assert!(!node.has_attribute(AId::R));

    // The order is preserved.
    let names: Vec<_> = node.attributes().iter().map(|a| a.name.to_string()).collect();
    assert_eq!(names, ["id", "cx", "cy"]);
}

#[test]
fn retain_attributes() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'>
        <path id='p1' inkscape:label='Path' d='M 0 0'/>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let id = doc.element_by_id("p1").unwrap().id();
    doc.node_mut(id)
        .retain_attributes(|attr| attr.name.namespace.is_none());

    let node = doc.node(id);
    assert_eq!(node.attributes().len(), 2);
    assert_eq!(node.attribute(AId::D), Some("M 0 0"));
}

#[test]
fn write_simple_case() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
    <!-- comment -->
    <g id='g1'><use xlink:href='#g1'/></g>
</svg>";

    let doc = Document::parse_str(svg).unwrap();
    let output = doc.to_string(&WriteOptions::default());

    assert!(output.contains("xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(output.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
    assert!(output.contains("<use xlink:href=\"#g1\"/>"));

    let doc2 = Document::parse_str(&output).unwrap();
    let comment = doc2.root_element().first_child().unwrap();
    assert_eq!(comment.text().trim(), "comment");
    let g = doc2.element_by_id("g1").unwrap();
    assert_eq!(g.first_element_child().unwrap().tag_name(), Some(EId::Use));
}

#[test]
fn write_preserves_text() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><text x='1'>Hello <tspan>&amp; world</tspan></text></svg>";

    let doc = Document::parse_str(svg).unwrap();
    let mut opt = WriteOptions::default();
    opt.indent = rwsvgtree::Indent::None;
    let output = doc.to_string(&opt);

    assert!(output.contains("<text x=\"1\">Hello <tspan>&amp; world</tspan></text>"));
}

#[test]
fn write_and_parse_again() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'>
        <g inkscape:groupmode='layer' style='fill:red'>
            <path d='M 10 20 L 30 40' xml:space='preserve'/>
        </g>
    </svg>
    ";

    let doc = Document::parse_str(svg).unwrap();
    let output = doc.to_string(&WriteOptions::default());
    let doc2 = Document::parse_str(&output).unwrap();

    let first: Vec<_> = doc.descendants().map(|n| format!("{:?}", n)).collect();
    let second: Vec<_> = doc2.descendants().map(|n| format!("{:?}", n)).collect();
    assert_eq!(first, second);
}
