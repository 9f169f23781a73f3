//! Integration tests for fsguard

mod baseline_check;
mod cli_flow;
mod store_roundtrip;
