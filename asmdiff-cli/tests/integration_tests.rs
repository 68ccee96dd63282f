//! Integration tests for asmdiff CLI
//!
//! Tests end-to-end command behavior using the CLI binary.
//! Uses tempfile for isolated module trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Get the path to the asmdiff binary (built by cargo)
fn asmdiff_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_asmdiff"))
}

/// Run asmdiff with the given args in the specified directory
fn run_asmdiff(dir: &Path, args: &[&str]) -> Output {
    asmdiff_binary()
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute asmdiff command")
}

/// Get stdout as string
fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as string
fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Snapshot of a module with one type per entry, each holding `void Name()` methods
fn module_json(types: &[(&str, &[&str])]) -> String {
    let types: Vec<serde_json::Value> = types
        .iter()
        .map(|(name, methods)| {
            let methods: Vec<serde_json::Value> = methods
                .iter()
                .map(|m| serde_json::json!({ "name": m, "return_type": "System.Void" }))
                .collect();
            serde_json::json!({ "full_name": name, "methods": methods })
        })
        .collect();
    serde_json::json!({ "name": "Sample", "types": types }).to_string()
}

fn write_module(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create module directory");
    }
    fs::write(&path, content).expect("Failed to write module file");
    path
}

/// Two trees: `x.json` on both sides, `y.json` only in the changed tree
fn setup_directory_scenario(root: &Path) {
    write_module(
        root,
        "v1/x.json",
        &module_json(&[("A", &[]), ("B", &["Run"])]),
    );
    write_module(
        root,
        "v2/x.json",
        &module_json(&[("B", &["Run"]), ("C", &[])]),
    );
    write_module(root, "v2/y.json", &module_json(&[("Y", &[])]));
}

// ============================================================================
// Single-file mode
// ============================================================================

#[test]
fn test_single_file_reports_member_changes() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a.json", &module_json(&[("Foo", &["M1", "M2"])]));
    write_module(dir.path(), "b.json", &module_json(&[("Foo", &["M2", "M3"])]));

    let output = run_asmdiff(dir.path(), &["a.json", "b.json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(lines, vec!["  * Foo", "      - M:Foo.M1", "      + M:Foo.M3"]);
}

#[test]
fn test_single_file_reports_type_changes() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a.json", &module_json(&[("A", &[]), ("B", &[])]));
    write_module(dir.path(), "b.json", &module_json(&[("B", &[]), ("C", &[])]));

    let output = run_asmdiff(dir.path(), &["a.json", "b.json"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("  - A"));
    assert!(out.contains("  + C"));
    assert!(!out.contains("B"));
}

#[test]
fn test_identical_files_report_no_differences() {
    let dir = TempDir::new().unwrap();
    let content = module_json(&[("Foo", &["M1"])]);
    write_module(dir.path(), "a.json", &content);
    write_module(dir.path(), "b.json", &content);

    let output = run_asmdiff(dir.path(), &["a.json", "b.json"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("No differences found."));
}

#[test]
fn test_single_file_type_only_change_prints_distinct_keys() {
    let dir = TempDir::new().unwrap();
    let field = |ty: &str| {
        serde_json::json!({
            "name": "Sample",
            "types": [{ "full_name": "Foo", "fields": [{ "name": "count", "field_type": ty }] }]
        })
        .to_string()
    };
    write_module(dir.path(), "a.json", &field("System.Int32"));
    write_module(dir.path(), "b.json", &field("System.Int64"));

    let output = run_asmdiff(dir.path(), &["a.json", "b.json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(
        lines,
        vec![
            "  * Foo",
            "      - F:Foo.count~System.Int32",
            "      + F:Foo.count~System.Int64",
        ]
    );
}

#[test]
fn test_single_file_json_format() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a.json", &module_json(&[("Foo", &["M1"])]));
    write_module(dir.path(), "b.json", &module_json(&[("Foo", &["M2"])]));

    let output = run_asmdiff(dir.path(), &["a.json", "b.json", "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("output should be valid JSON");
    assert_eq!(value["changes"]["module"], "b.json");
    assert_eq!(value["changes"]["types"][0]["full_name"], "Foo");
    assert_eq!(value["changes"]["types"][0]["kind"], "modified");
}

#[test]
fn test_single_file_csv_format() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a.json", &module_json(&[("A", &[])]));
    write_module(dir.path(), "b.json", &module_json(&[]));

    let output = run_asmdiff(dir.path(), &["a.json", "b.json", "--format", "csv"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end(), "module,key,kind\nb.json,A,removed_type");
}

#[test]
fn test_single_file_malformed_input_exits_one() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a.json", "{ not json");
    write_module(dir.path(), "b.json", &module_json(&[]));

    let output = run_asmdiff(dir.path(), &["a.json", "b.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("a.json"));
}

// ============================================================================
// Directory mode
// ============================================================================

#[test]
fn test_directory_scenario() {
    let dir = TempDir::new().unwrap();
    setup_directory_scenario(dir.path());

    let output = run_asmdiff(dir.path(), &["v1", "v2"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("x.json\n  - A\n  + C"));
    assert!(out.contains("Files processed:   1"));
    assert!(out.contains("Types added:       1"));
    assert!(out.contains("Types removed:     1"));
    assert!(out.contains("Breaking changes:  1"));
    assert!(out.contains("y.json missing from original set"));
    assert!(!out.contains("\ny.json\n"));
}

#[test]
fn test_directory_json_summary() {
    let dir = TempDir::new().unwrap();
    setup_directory_scenario(dir.path());

    let output = run_asmdiff(dir.path(), &["v1", "v2", "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["summary"]["files_processed"], 1);
    assert_eq!(value["summary"]["types_added"], 1);
    assert_eq!(value["summary"]["types_removed"], 1);
    assert_eq!(
        value["summary"]["warnings"],
        serde_json::json!(["y.json missing from original set"])
    );
    assert_eq!(value["change_sets"][0]["module"], "x.json");
}

#[test]
fn test_directory_malformed_pair_does_not_stop_batch() {
    let dir = TempDir::new().unwrap();
    setup_directory_scenario(dir.path());
    write_module(dir.path(), "v1/z.json", &module_json(&[]));
    write_module(dir.path(), "v2/z.json", "{ not json");

    let output = run_asmdiff(dir.path(), &["v1", "v2"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Files processed:   2"));
    assert!(out.contains("x.json\n  - A\n  + C"));
    assert!(out.contains("Failures\n  z.json:"));
}

#[test]
fn test_directory_recursion_flag() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "v1/sub/x.json", &module_json(&[("A", &[])]));
    write_module(dir.path(), "v2/sub/x.json", &module_json(&[]));

    let flat = run_asmdiff(dir.path(), &["v1", "v2"]);
    assert!(flat.status.success());
    assert!(stdout(&flat).contains("Files processed:   0"));

    let deep = run_asmdiff(dir.path(), &["v1", "v2", "--recursive"]);
    assert!(deep.status.success());
    let out = stdout(&deep);
    assert!(out.contains("sub/x.json\n  - A"));
    assert!(out.contains("Files processed:   1"));
}

#[test]
fn test_directory_custom_extension() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "v1/Lib.dll", &module_json(&[("A", &[])]));
    write_module(dir.path(), "v2/Lib.DLL", &module_json(&[("A", &[])]));
    write_module(dir.path(), "v1/Lib.dll.json", &module_json(&[]));
    write_module(dir.path(), "v2/Lib.dll.json", &module_json(&[]));

    let output = run_asmdiff(dir.path(), &["v1", "v2", "--ext", "dll"]);

    assert!(output.status.success());
    let out = stdout(&output);
    // Extension matches case-insensitively, path pairing does not
    assert!(out.contains("Files processed:   0"));
    assert!(out.contains("Lib.dll missing from changed set"));
    assert!(out.contains("Lib.DLL missing from original set"));
}

#[test]
fn test_config_file_sets_extension() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "v1/Lib.dll", &module_json(&[("A", &[])]));
    write_module(dir.path(), "v2/Lib.dll", &module_json(&[]));
    fs::write(
        dir.path().join(".asmdiff.toml"),
        "[discovery]\nextension = \"dll\"\n",
    )
    .unwrap();

    let output = run_asmdiff(dir.path(), &["v1", "v2"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Lib.dll\n  - A"));
}

// ============================================================================
// Usage errors
// ============================================================================

#[test]
fn test_mixed_path_kinds_exit_two() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a.json", &module_json(&[]));
    fs::create_dir(dir.path().join("v2")).unwrap();

    let output = run_asmdiff(dir.path(), &["a.json", "v2"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Both paths must be files or both must be directories"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_path_exit_two() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a.json", &module_json(&[]));

    let output = run_asmdiff(dir.path(), &["a.json", "missing.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Path not found: missing.json"));
}

#[test]
fn test_missing_arguments_exit_two() {
    let dir = TempDir::new().unwrap();

    let output = run_asmdiff(dir.path(), &["a.json"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();

    let output = run_asmdiff(dir.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("--recursive"));
    assert!(out.contains("--format"));
}
