//! Property-based tests for determinism and diff guarantees

mod determinism;
mod store_roundtrip;
