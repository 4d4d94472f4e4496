//! Incremental hierarchy building.
//!
//! [`HierarchyMaker`] pulls node records from a [`NodeReader`] a batch at a
//! time and, once the stream ends, assembles them into a single ordered tree.
//! It never blocks for a whole document: every call to
//! [`step`](HierarchyMaker::step) reads at most one batch and then hands
//! control back to the caller, which decides when to resume.
//!
//! ```
//! use infotoc::{HierarchyMaker, InfoNode, MemoryReader, Progress};
//!
//! let reader = MemoryReader::new().with_topic(
//!     "demo",
//!     vec![
//!         InfoNode::new("Intro").with_up("Top"),
//!         InfoNode::new("Top").with_up("(dir)"),
//!     ],
//! );
//! let mut maker = HierarchyMaker::new(reader);
//!
//! maker.begin_build(7, "demo", "", |report| {
//!     assert_eq!(report.request_id, 7);
//!     let tree = report.result.unwrap();
//!     assert_eq!(tree.children[0].name, "Intro");
//! });
//! while maker.step() == Progress::Pending {}
//! ```

mod assemble;
mod siblings;

pub use assemble::{assemble, resolve_children, restore};
pub use siblings::{ChainError, order_siblings};

use std::sync::mpsc;

use tracing::{debug, trace, warn};

use crate::error::{BuildError, ReaderError};
use crate::info::{Fields, NodeReader};
use crate::model::{InfoNode, NodeStore};

/// Records read per [`HierarchyMaker::step`] unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Configuration for a [`HierarchyMaker`].
#[derive(Debug, Clone)]
pub struct MakerConfig {
    /// Maximum records read per step. Never zero.
    pub batch_size: usize,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl MakerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Outcome of a build, delivered exactly once to the callback registered with
/// [`HierarchyMaker::begin_build`].
#[derive(Debug)]
pub struct BuildReport<K> {
    pub request_id: K,
    /// The assembled tree, owned by the receiver.
    pub result: Result<InfoNode, BuildError>,
}

impl<K> BuildReport<K> {
    /// Status code: `0` on success, otherwise [`BuildError::code`].
    pub fn code(&self) -> u32 {
        self.result.as_ref().map_or_else(BuildError::code, |_| 0)
    }
}

/// What a call to [`HierarchyMaker::step`] accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No build is in flight.
    Idle,
    /// A batch was read; call `step` again to continue.
    Pending,
    /// The build finished and its report was delivered.
    Finished,
}

type OnBuilt<K> = Box<dyn FnOnce(BuildReport<K>)>;

enum Stage {
    /// Opening the topic failed; reported on the next step.
    Failed(ReaderError),
    Reading,
    /// Nodes are already stored; assemble on the next step.
    Assembling,
}

struct Build<K> {
    request_id: K,
    root: String,
    stage: Stage,
    cycles: usize,
    on_built: OnBuilt<K>,
}

/// Builds ordered outlines from a [`NodeReader`], one batch per step.
///
/// Only one build is in flight at a time. Starting another one discards the
/// current build, including its partially filled store and its callback.
pub struct HierarchyMaker<R, K = u32> {
    reader: R,
    store: NodeStore,
    config: MakerConfig,
    build: Option<Build<K>>,
}

impl<R: NodeReader, K> HierarchyMaker<R, K> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, MakerConfig::default())
    }

    pub fn with_config(reader: R, config: MakerConfig) -> Self {
        Self {
            reader,
            store: NodeStore::new(),
            config,
            build: None,
        }
    }

    pub fn config(&self) -> &MakerConfig {
        &self.config
    }

    /// True while a build is in flight.
    pub fn is_working(&self) -> bool {
        self.build.is_some()
    }

    /// Nodes currently held outside any delivered tree.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Start building the hierarchy of `topic`.
    ///
    /// An empty `root` means "the node whose parent is `(dir)`". `on_built`
    /// runs exactly once, from within a later [`step`](Self::step), unless
    /// the build is replaced first, in which case it is dropped uncalled.
    pub fn begin_build<F>(&mut self, request_id: K, topic: &str, root: &str, on_built: F)
    where
        F: FnOnce(BuildReport<K>) + 'static,
    {
        self.cancel();
        self.store.clear();

        let stage = match self.reader.open(topic) {
            Ok(()) => Stage::Reading,
            Err(err) => Stage::Failed(err),
        };
        debug!(topic, root, "hierarchy build started");

        self.build = Some(Build {
            request_id,
            root: root.to_string(),
            stage,
            cycles: 0,
            on_built: Box::new(on_built),
        });
    }

    /// Assemble a hierarchy from the nodes already in the store, without
    /// reading anything.
    ///
    /// Meant for trees handed back through [`reclaim`](Self::reclaim). A
    /// build still reading is discarded, together with its partial store.
    pub fn reassemble<F>(&mut self, request_id: K, root: &str, on_built: F)
    where
        F: FnOnce(BuildReport<K>) + 'static,
    {
        if self.cancel() {
            self.store.clear();
        }
        self.build = Some(Build {
            request_id,
            root: root.to_string(),
            stage: Stage::Assembling,
            cycles: 0,
            on_built: Box::new(on_built),
        });
    }

    /// Hand a delivered tree back so its nodes can be reassembled later.
    ///
    /// Returns `false` and drops the tree while a build is reading, since
    /// its nodes would mix with another topic's records.
    pub fn reclaim(&mut self, tree: InfoNode) -> bool {
        if self.is_working() {
            debug!(root = %tree.name, "build in flight, reclaimed tree dropped");
            return false;
        }
        restore(&mut self.store, tree);
        true
    }

    /// Drop the build in flight, if any, without delivering its report.
    fn cancel(&mut self) -> bool {
        match self.build.take() {
            Some(stale) => {
                debug!(
                    cycles = stale.cycles,
                    stored = self.store.len(),
                    "in-flight build discarded"
                );
                true
            }
            None => false,
        }
    }

    /// Advance the build in flight by at most one batch.
    pub fn step(&mut self) -> Progress {
        let Some(build) = self.build.as_mut() else {
            return Progress::Idle;
        };

        match std::mem::replace(&mut build.stage, Stage::Reading) {
            Stage::Failed(err) => {
                warn!(error = %err, "cannot open topic");
                return self.finish(Err(err.into()));
            }
            Stage::Assembling => return self.assemble_stored(),
            Stage::Reading => {}
        }

        build.cycles += 1;
        let cycle = build.cycles;

        for _ in 0..self.config.batch_size {
            match self.reader.next_node(Fields::all()) {
                Ok(Some(node)) => self.store.push(node),
                Ok(None) => {
                    debug!(cycle, nodes = self.store.len(), "end of node stream");
                    return self.assemble_stored();
                }
                Err(err) => {
                    warn!(cycle, code = err.code(), error = %err, "reading nodes failed");
                    return self.finish(Err(err.into()));
                }
            }
        }

        trace!(cycle, stored = self.store.len(), "batch read, yielding");
        Progress::Pending
    }

    /// Step until the build in flight finishes.
    pub fn run_to_completion(&mut self) -> Progress {
        loop {
            match self.step() {
                Progress::Pending => continue,
                done => return done,
            }
        }
    }

    /// Run a whole build and return its result directly.
    pub fn build_blocking(
        &mut self,
        request_id: K,
        topic: &str,
        root: &str,
    ) -> Result<InfoNode, BuildError>
    where
        K: 'static,
    {
        let (tx, rx) = mpsc::channel();
        self.begin_build(request_id, topic, root, move |report| {
            let _ = tx.send(report.result);
        });
        self.run_to_completion();
        rx.try_recv().unwrap_or(Err(BuildError::NoHierarchy))
    }

    fn assemble_stored(&mut self) -> Progress {
        let result = match &self.build {
            Some(build) => assemble(&mut self.store, &build.root),
            None => return Progress::Idle,
        };
        self.finish(result)
    }

    fn finish(&mut self, result: Result<InfoNode, BuildError>) -> Progress {
        let Some(build) = self.build.take() else {
            return Progress::Idle;
        };
        if let Err(err) = &result {
            debug!(code = err.code(), cycles = build.cycles, "hierarchy build failed");
        }
        (build.on_built)(BuildReport {
            request_id: build.request_id,
            result,
        });
        Progress::Finished
    }
}
