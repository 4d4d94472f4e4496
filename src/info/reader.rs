//! GNU Info file reader.
//!
//! An Info file is a sequence of blocks separated by the unit separator byte
//! (`0x1f`). Each node block opens with a header line (see [`super::header`])
//! followed by the node text; the first line of text is usually the title,
//! underlined with `*`, `=`, `-` or `.`. Large manuals are split: the main
//! file then carries an `Indirect:` table naming the sub-files that hold the
//! nodes, plus a `Tag Table:` of byte offsets that this reader does not need.

use std::collections::VecDeque;
use std::path::PathBuf;

use bstr::ByteSlice;
use encoding_rs::{Encoding, UTF_8};
use memchr::memchr;
use tracing::{debug, trace};

use super::decode::{decode, detect_encoding, read_info_file};
use super::header::{is_header_line, normalize, parse_header};
use super::path::locate_sibling;
use super::{Fields, InfoPath, NodeReader};
use crate::error::ReaderError;
use crate::model::InfoNode;

const SEPARATOR: u8 = 0x1f;

/// One loaded file and the read position inside it.
struct Chunk {
    path: PathBuf,
    data: Vec<u8>,
    pos: usize,
}

impl Chunk {
    fn load(path: PathBuf) -> Result<Self, ReaderError> {
        let data = read_info_file(&path).map_err(|source| ReaderError::Io {
            path: path.clone(),
            source,
        })?;
        // Text before the first separator is the file preamble.
        let pos = memchr(SEPARATOR, &data).unwrap_or(data.len());
        trace!(path = %path.display(), bytes = data.len(), "info file loaded");
        Ok(Self { path, data, pos })
    }

    /// Next block, without its leading separator.
    fn next_block(&mut self) -> Option<&[u8]> {
        if self.pos >= self.data.len() {
            return None;
        }
        let start = self.pos + 1;
        let end = memchr(SEPARATOR, self.data.get(start..)?)
            .map_or(self.data.len(), |offset| start + offset);
        self.pos = end;
        Some(&self.data[start..end])
    }
}

/// A [`NodeReader`] over GNU Info documents.
pub struct InfoReader {
    path: InfoPath,
    encoding: &'static Encoding,
    main: Option<PathBuf>,
    current: Option<Chunk>,
    indirect: VecDeque<String>,
}

impl InfoReader {
    pub fn new(path: InfoPath) -> Self {
        Self {
            path,
            encoding: UTF_8,
            main: None,
            current: None,
            indirect: VecDeque::new(),
        }
    }

    /// Load the next indirect sub-file. Returns `false` when none are left.
    fn advance_file(&mut self) -> Result<bool, ReaderError> {
        let Some(name) = self.indirect.pop_front() else {
            self.current = None;
            return Ok(false);
        };
        let main = self.main.as_deref().ok_or(ReaderError::NotOpen)?;
        let path = locate_sibling(main, &name).ok_or_else(|| ReaderError::Io {
            path: main.with_file_name(&name),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "indirect file missing"),
        })?;
        self.current = Some(Chunk::load(path)?);
        Ok(true)
    }
}

impl Default for InfoReader {
    fn default() -> Self {
        Self::new(InfoPath::default())
    }
}

/// What a block turned out to be.
enum Block {
    Node(InfoNode),
    Indirect(Vec<String>),
    Skip,
}

fn classify(
    block: &[u8],
    encoding: &'static Encoding,
    fields: Fields,
) -> Result<Block, ReaderError> {
    let mut lines = block.lines().skip_while(|line| {
        line.iter().all(|b| b.is_ascii_whitespace() || *b == 0x0c)
    });
    let Some(first) = lines.next() else {
        return Ok(Block::Skip);
    };
    let first = decode(encoding, first);

    if first.trim_start().starts_with("Indirect:") {
        let files = lines
            .filter_map(|line| line.split_once_str(":"))
            .map(|(name, _offset)| decode(encoding, name.trim_ascii()).into_owned())
            .filter(|name| !name.is_empty())
            .collect();
        return Ok(Block::Indirect(files));
    }
    if !is_header_line(&first) {
        return Ok(Block::Skip);
    }

    let header = parse_header(&first).ok_or_else(|| ReaderError::Malformed(first.to_string()))?;

    let mut node = InfoNode::default();
    if fields.contains(Fields::NAME) {
        node.name = header.node.clone();
    }
    if fields.contains(Fields::TITLE) {
        node.title = find_title(lines, encoding).unwrap_or(header.node);
    }
    if fields.contains(Fields::NEIGHBOURS) {
        node.up = header.up;
        node.prev = header.prev;
        node.next = header.next;
    }
    Ok(Block::Node(node))
}

/// The first text line when it is followed by an underline.
fn find_title<'a>(
    lines: impl Iterator<Item = &'a [u8]>,
    encoding: &'static Encoding,
) -> Option<String> {
    let mut lines = lines.skip_while(|line| line.trim_ascii().is_empty());
    let candidate = lines.next()?;
    let underline = lines.next()?.trim_ascii();

    let marker = *underline.first()?;
    let is_underline =
        matches!(marker, b'*' | b'=' | b'-' | b'.') && underline.iter().all(|&b| b == marker);
    if !is_underline {
        return None;
    }
    let title = normalize(&decode(encoding, candidate));
    (!title.is_empty()).then_some(title)
}

impl NodeReader for InfoReader {
    fn open(&mut self, topic: &str) -> Result<(), ReaderError> {
        self.main = None;
        self.current = None;
        self.indirect.clear();
        self.encoding = UTF_8;

        let main = self
            .path
            .locate(topic)
            .ok_or_else(|| ReaderError::TopicNotFound(topic.to_string()))?;
        let chunk = Chunk::load(main.clone())?;
        self.encoding = detect_encoding(&chunk.data);
        debug!(topic, path = %main.display(), encoding = self.encoding.name(), "info topic opened");

        self.main = Some(main);
        self.current = Some(chunk);
        Ok(())
    }

    fn next_node(&mut self, fields: Fields) -> Result<Option<InfoNode>, ReaderError> {
        if self.main.is_none() {
            return Err(ReaderError::NotOpen);
        }
        loop {
            let encoding = self.encoding;
            let Some(chunk) = self.current.as_mut() else {
                return Ok(None);
            };
            let block = match chunk.next_block() {
                Some(block) => classify(block, encoding, fields)?,
                None => {
                    if self.advance_file()? {
                        continue;
                    }
                    return Ok(None);
                }
            };
            match block {
                Block::Node(node) => return Ok(Some(node)),
                Block::Indirect(files) => {
                    trace!(path = %chunk.path.display(), files = files.len(), "indirect table");
                    self.indirect.extend(files);
                }
                Block::Skip => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    const GREP: &str = "This is grep.info, produced by makeinfo.\n\
\x1f\n\
File: grep.info,  Node: Top,  Next: Introduction,  Up: (dir)\n\
\n\
grep\n\
****\n\
\n\
* Menu:\n\
\x1f\n\
File: grep.info,  Node: Introduction,  Next: Invoking,  Prev: Top,  Up: Top\n\
\n\
1 Introduction\n\
**************\n\
\n\
Given one or more patterns...\n\
\x1f\n\
File: grep.info,  Node: Invoking,  Prev: Introduction,  Up: Top\n\
\n\
2 Invoking 'grep'\n\
=================\n\
\x1f\n\
Tag Table:\n\
Node: Top42\n\
\x1f\n\
End Tag Table\n";

    fn read_all(reader: &mut InfoReader, fields: Fields) -> Vec<InfoNode> {
        std::iter::from_fn(|| reader.next_node(fields).unwrap()).collect()
    }

    fn reader_for(dir: &Path) -> InfoReader {
        InfoReader::new(InfoPath::new([dir]))
    }

    #[test]
    fn test_reads_nodes_and_skips_tag_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("grep.info"), GREP).unwrap();

        let mut reader = reader_for(dir.path());
        reader.open("grep").unwrap();
        let nodes = read_all(&mut reader, Fields::all());

        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Top", "Introduction", "Invoking"]);
        assert_eq!(nodes[0].title, "grep");
        assert_eq!(nodes[0].up, "(dir)");
        assert_eq!(nodes[1].title, "1 Introduction");
        assert_eq!(nodes[1].prev, "Top");
        assert_eq!(nodes[1].next, "Invoking");
        assert_eq!(nodes[2].title, "2 Invoking 'grep'");
    }

    #[test]
    fn test_title_falls_back_to_node_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("t.info"),
            "\x1f\nFile: t.info,  Node: Plain,  Up: (dir)\n\nJust some text.\nMore text.\n",
        )
        .unwrap();

        let mut reader = reader_for(dir.path());
        reader.open("t").unwrap();
        assert_eq!(read_all(&mut reader, Fields::all())[0].title, "Plain");
    }

    #[test]
    fn test_requested_fields_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("grep.info"), GREP).unwrap();

        let mut reader = reader_for(dir.path());
        reader.open("grep").unwrap();
        let nodes = read_all(&mut reader, Fields::NAME);
        assert_eq!(nodes[1], InfoNode::new("Introduction"));
    }

    #[test]
    fn test_indirect_sub_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("big.info"),
            "This is big.info\n\x1f\nIndirect:\nbig.info-1: 100\nbig.info-2: 2000\n\x1f\nTag Table:\n(Indirect)\nNode: Top100\n\x1f\nEnd Tag Table\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("big.info-1"),
            "This is big.info\n\x1f\nFile: big.info,  Node: Top,  Next: A,  Up: (dir)\n\x1f\nFile: big.info,  Node: A,  Up: Top\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("big.info-2"),
            "This is big.info\n\x1f\nFile: big.info,  Node: B,  Prev: A,  Up: Top\n",
        )
        .unwrap();

        let mut reader = reader_for(dir.path());
        reader.open("big").unwrap();
        let names: Vec<_> = read_all(&mut reader, Fields::all())
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, ["Top", "A", "B"]);
    }

    #[test]
    fn test_missing_indirect_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("big.info"),
            "\x1f\nIndirect:\nbig.info-1: 100\n",
        )
        .unwrap();

        let mut reader = reader_for(dir.path());
        reader.open("big").unwrap();
        let err = reader.next_node(Fields::all()).unwrap_err();
        assert!(matches!(err, ReaderError::Io { .. }));
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_header_without_node_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.info"), "\x1f\nFile: bad.info,  Up: (dir)\n").unwrap();

        let mut reader = reader_for(dir.path());
        reader.open("bad").unwrap();
        assert!(matches!(
            reader.next_node(Fields::all()),
            Err(ReaderError::Malformed(_))
        ));
    }

    #[test]
    fn test_latin1_titles() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = b"\x1f\nFile: l.info,  Node: Top,  Up: (dir)\n\nCaf\xe9\n****\n".to_vec();
        data.extend_from_slice(b"\x1f\nLocal Variables:\ncoding: iso-8859-1\nEnd:\n");
        fs::write(dir.path().join("l.info"), data).unwrap();

        let mut reader = reader_for(dir.path());
        reader.open("l").unwrap();
        assert_eq!(read_all(&mut reader, Fields::all())[0].title, "Café");
    }

    #[test]
    fn test_unknown_topic_and_unopened_reader() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = reader_for(dir.path());
        assert!(matches!(
            reader.next_node(Fields::all()),
            Err(ReaderError::NotOpen)
        ));
        assert!(matches!(
            reader.open("nothing"),
            Err(ReaderError::TopicNotFound(_))
        ));
    }
}
