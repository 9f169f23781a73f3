//! Command routing through the CLI run context

use super::test_utils::Fixture;
use fsguard::cli::{Commands, OutputFormat, RunContext, EXIT_CHANGES, EXIT_OK};

#[test]
fn test_check_exit_code_reflects_changes() {
    let fx = Fixture::new();
    fx.write("a.txt", "a");
    let ctx = RunContext::new(fx.config(), false).unwrap();

    ctx.execute(&Commands::Baseline {
        dir: fx.root().to_path_buf(),
    })
    .unwrap();

    let check = Commands::Check {
        dir: fx.root().to_path_buf(),
        format: OutputFormat::Text,
        exit_code: true,
    };
    let clean = ctx.execute(&check).unwrap();
    assert_eq!(clean.exit_code, EXIT_OK);
    assert!(clean.text.contains("No changes detected"));

    fx.write("b.txt", "b");
    let dirty = ctx.execute(&check).unwrap();
    assert_eq!(dirty.exit_code, EXIT_CHANGES);
    assert!(dirty.text.contains("[NEW] b.txt"));
}

#[test]
fn test_show_json_lists_baseline_files() {
    let fx = Fixture::new();
    fx.write("dir/file.txt", "x");
    let ctx = RunContext::new(fx.config(), false).unwrap();
    ctx.execute(&Commands::Baseline {
        dir: fx.root().to_path_buf(),
    })
    .unwrap();

    let out = ctx
        .execute(&Commands::Show {
            format: OutputFormat::Json,
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out.text).unwrap();
    assert_eq!(value["algorithm"], "sha256");
    assert!(value["files"]["dir/file.txt"].is_string());
}

#[test]
fn test_log_on_fresh_state_is_empty() {
    let fx = Fixture::new();
    let ctx = RunContext::new(fx.config(), false).unwrap();
    let out = ctx.execute(&Commands::Log { tail: None }).unwrap();
    assert_eq!(out.text, "Change log is empty.");
}
