use std::fmt::Write;

use crate::model::InfoNode;

/// Render `root` as an outline, two spaces of indent per level.
pub fn render_text(root: &InfoNode) -> String {
    let mut out = String::new();
    write_outline(&mut out, root, 0);
    out
}

fn write_outline(out: &mut String, node: &InfoNode, depth: usize) {
    let label = if node.title.is_empty() {
        &node.name
    } else {
        &node.title
    };
    let _ = writeln!(out, "{}{}", "  ".repeat(depth), label);
    for child in &node.children {
        write_outline(out, child, depth + 1);
    }
}
