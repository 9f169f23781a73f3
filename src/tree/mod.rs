//! Directory tree scanning
//!
//! Walks a root, hashes every regular file and produces a [`crate::types::Snapshot`]
//! keyed by root-relative path.

pub mod hasher;
pub mod path;
pub mod scanner;
pub mod walker;
