//! Core data model for outline reconstruction.
//!
//! This module contains:
//! - [`InfoNode`], one page record of a help document (and, once assembled,
//!   a subtree of the table of contents)
//! - [`NodeStore`], the unordered pool of detached records

mod node;
mod store;

pub use node::{DIR_NODE, InfoNode, Iter};
pub use store::{NodeStore, Take};
