//! # infotoc
//!
//! Rebuilds the table of contents of a GNU Info document.
//!
//! Info files store their outline as a flat list of nodes, each naming its
//! parent (`Up:`) and its previous sibling (`Prev:`). This crate streams
//! those records in small batches and reassembles them into one ordered tree,
//! failing as a whole when the references do not describe one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use infotoc::{export, read_toc};
//!
//! let toc = read_toc("grep", "")?;
//! print!("{}", export::render_text(&toc));
//! # Ok::<(), infotoc::Error>(())
//! ```
//!
//! ## Incremental builds
//!
//! [`HierarchyMaker`] reads at most one batch per [`step`](HierarchyMaker::step)
//! so an event loop can interleave builds with other work. The result is
//! handed to a callback, which takes ownership of the tree.
//!
//! ```
//! use infotoc::{HierarchyMaker, InfoNode, MemoryReader, Progress};
//!
//! let reader = MemoryReader::new().with_topic(
//!     "manual",
//!     vec![
//!         InfoNode::new("Top").with_up("(dir)"),
//!         InfoNode::new("Second").with_up("Top").with_prev("First"),
//!         InfoNode::new("First").with_up("Top"),
//!     ],
//! );
//! let mut maker = HierarchyMaker::new(reader);
//! maker.begin_build(1, "manual", "", |report| {
//!     let toc = report.result.expect("well-formed outline");
//!     assert_eq!(toc.children[0].name, "First");
//! });
//! while maker.step() == Progress::Pending {
//!     // other work
//! }
//! ```

pub mod error;
pub mod export;
pub mod hierarchy;
pub mod info;
pub mod model;

pub use error::{BuildError, Error, ReaderError, Result};
pub use hierarchy::{BuildReport, DEFAULT_BATCH_SIZE, HierarchyMaker, MakerConfig, Progress};
pub use info::{Fields, InfoPath, InfoReader, MemoryReader, NodeReader};
pub use model::{DIR_NODE, InfoNode, NodeStore};

/// Build the table of contents of `topic`, searching `INFOPATH`.
///
/// An empty `root` starts from the node whose parent is `(dir)`.
pub fn read_toc(topic: &str, root: &str) -> Result<InfoNode> {
    read_toc_with(InfoPath::from_env(), MakerConfig::default(), topic, root)
}

/// [`read_toc`] with an explicit search path and configuration.
pub fn read_toc_with(
    path: InfoPath,
    config: MakerConfig,
    topic: &str,
    root: &str,
) -> Result<InfoNode> {
    let mut maker: HierarchyMaker<_, u32> =
        HierarchyMaker::with_config(InfoReader::new(path), config);
    Ok(maker.build_blocking(0, topic, root)?)
}
