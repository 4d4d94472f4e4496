use std::fmt::Write;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use quick_xml::escape::escape;

use crate::model::InfoNode;

/// Characters escaped in the fragment part of a `content src`.
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a toc.ncx document for an assembled outline.
///
/// The root becomes the first `navPoint`; its descendants nest beneath it in
/// tree order. Each entry links to `{topic}#{node name}`.
pub fn render_ncx(root: &InfoNode, topic: &str) -> String {
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content=""#,
    );
    ncx.push_str(&escape(topic));
    let _ = write!(
        ncx,
        r#""/>
    <meta name="dtb:depth" content="{}"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>"#,
        root.depth()
    );
    ncx.push_str(&escape(label(root)));
    ncx.push_str(
        r#"</text>
  </docTitle>
  <navMap>
"#,
    );

    let mut play_order = 1;
    write_nav_point(&mut ncx, root, topic, &mut play_order, 2);

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

fn label(node: &InfoNode) -> &str {
    if node.title.is_empty() {
        &node.name
    } else {
        &node.title
    }
}

fn write_nav_point(
    ncx: &mut String,
    node: &InfoNode,
    topic: &str,
    play_order: &mut usize,
    indent: usize,
) {
    let indent_str = "  ".repeat(indent);
    let href = format!("{}#{}", topic, utf8_percent_encode(&node.name, FRAGMENT));

    let _ = writeln!(
        ncx,
        "{indent_str}<navPoint id=\"navPoint-{order}\" playOrder=\"{order}\">",
        order = play_order
    );
    let _ = writeln!(
        ncx,
        "{indent_str}  <navLabel><text>{}</text></navLabel>",
        escape(label(node))
    );
    let _ = writeln!(ncx, "{indent_str}  <content src=\"{}\"/>", escape(&href));

    *play_order += 1;

    for child in &node.children {
        write_nav_point(ncx, child, topic, play_order, indent + 1);
    }

    let _ = writeln!(ncx, "{indent_str}</navPoint>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_points_nest_in_order() {
        let tree = InfoNode::new("Top")
            .with_title("Tom & Jerry")
            .with_child(InfoNode::new("Chase Scenes").with_child(InfoNode::new("Cat")))
            .with_child(InfoNode::new("Mouse"));

        let ncx = render_ncx(&tree, "cartoon");

        assert!(ncx.contains("<text>Tom &amp; Jerry</text>"));
        assert!(ncx.contains(r#"<meta name="dtb:depth" content="3"/>"#));
        assert!(ncx.contains(r#"<content src="cartoon#Chase%20Scenes"/>"#));

        let order: Vec<_> = ["#Top\"", "#Chase%20Scenes\"", "#Cat\"", "#Mouse\""]
            .iter()
            .map(|needle| ncx.find(needle).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(ncx.contains(r#"playOrder="4""#));
        assert_eq!(ncx.matches("<navPoint ").count(), 4);
        assert_eq!(ncx.matches("</navPoint>").count(), 4);
    }
}
