//! Info node header lines.
//!
//! A node starts with a line like
//!
//! ```text
//! File: grep.info,  Node: Usage,  Next: Performance,  Prev: Invoking,  Up: Top
//! ```
//!
//! Values run to the next comma. Names that contain commas or colons are
//! wrapped in DEL (`0x7f`) bytes by newer versions of makeinfo.

const QUOTE: char = '\x7f';

/// Fields of one node header. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NodeHeader {
    pub file: String,
    pub node: String,
    pub next: String,
    pub prev: String,
    pub up: String,
}

/// True when `line` looks like a node header rather than a tag table or
/// other auxiliary block.
pub(crate) fn is_header_line(line: &str) -> bool {
    line.trim_start().starts_with("File:")
}

/// Parse a header line. Returns `None` when it has no `Node:` field.
pub(crate) fn parse_header(line: &str) -> Option<NodeHeader> {
    let mut header = NodeHeader::default();
    let mut has_node = false;
    let mut rest = line.trim();

    while let Some((key, after)) = rest.split_once(':') {
        let (value, tail) = take_value(after.trim_start());
        match key.trim() {
            "File" => header.file = value,
            "Node" => {
                header.node = value;
                has_node = true;
            }
            "Next" => header.next = value,
            "Prev" | "Previous" => header.prev = value,
            "Up" => header.up = value,
            _ => {}
        }
        rest = tail.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
    }

    has_node.then_some(header)
}

/// Split one field value off the front of `s`.
fn take_value(s: &str) -> (String, &str) {
    if let Some(quoted) = s.strip_prefix(QUOTE) {
        return match quoted.find(QUOTE) {
            Some(end) => (quoted[..end].to_string(), &quoted[end + 1..]),
            None => (normalize(quoted), ""),
        };
    }
    match s.find(',') {
        Some(end) => (normalize(&s[..end]), &s[end..]),
        None => (normalize(s), ""),
    }
}

/// Collapse internal whitespace, the way Info readers match node names.
pub(crate) fn normalize(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header() {
        let header = parse_header(
            "File: grep.info,  Node: Usage,  Next: Performance,  Prev: Invoking,  Up: Top",
        )
        .unwrap();
        assert_eq!(
            header,
            NodeHeader {
                file: "grep.info".into(),
                node: "Usage".into(),
                next: "Performance".into(),
                prev: "Invoking".into(),
                up: "Top".into(),
            }
        );
    }

    #[test]
    fn test_top_node_and_previous_spelling() {
        let header =
            parse_header("File: sed.info,  Node: Top,  Next: Introduction,  Previous: (dir),  Up: (dir)")
                .unwrap();
        assert_eq!(header.node, "Top");
        assert_eq!(header.prev, "(dir)");
        assert_eq!(header.up, "(dir)");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let header = parse_header("File: x.info,  Node: Leaf,  Up: Top").unwrap();
        assert_eq!(header.next, "");
        assert_eq!(header.prev, "");
    }

    #[test]
    fn test_quoted_names_keep_commas() {
        let line = "File: x.info,  Node: \x7fa, b: c\x7f,  Prev: \x7fx, y\x7f,  Up: Top";
        let header = parse_header(line).unwrap();
        assert_eq!(header.node, "a, b: c");
        assert_eq!(header.prev, "x, y");
        assert_eq!(header.up, "Top");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let header = parse_header("File: x.info,  Node: Two   Words,  Up:  Top ").unwrap();
        assert_eq!(header.node, "Two Words");
        assert_eq!(header.up, "Top");
    }

    #[test]
    fn test_header_without_node() {
        assert!(parse_header("File: x.info,  Up: Top").is_none());
        assert!(is_header_line("File: x.info,  Up: Top"));
        assert!(!is_header_line("Tag Table:"));
    }
}
