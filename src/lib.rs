//! fsguard: content-hash baselines and change detection for directory trees
//!
//! A baseline records a digest for every regular file under a root. A later
//! check rescans the tree, classifies each path as new, modified or deleted, and
//! appends the findings to a timestamped change log.

pub mod api;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod store;
pub mod tree;
pub mod types;
