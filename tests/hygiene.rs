//! Hygiene: source-level budgets for the map core.
//!
//! Scans `src/` (test files excluded) for patterns that crash the page or
//! swallow errors. Budgets only ever go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Panics. A panic in the WASM client takes the whole map down.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Silent loss.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Output goes through `tracing`.
const MAX_PRINTLN: usize = 0;

const MAX_ALLOW_DEAD_CODE: usize = 0;

/// Numeric casts that clippy's pedantic cast lints flag.
const LOSSY_CASTS: &[&str] = &[" as i64", " as i32", " as u32", " as f64", " as f32"];

/// Modules with no behavior of their own to test.
const UNTESTED_MODULES: &[&str] = &["lib.rs", "consts.rs"];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Per-file count of lines containing `pattern`, skipping files with none.
fn hits(pattern: &str) -> Vec<(String, usize)> {
    source_files()
        .into_iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then_some((file.path, count))
        })
        .collect()
}

fn assert_budget(pattern: &str, max: usize) {
    let hits = hits(pattern);
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits.iter().map(|(path, c)| format!("  {path}: {c}")).collect::<Vec<_>>().join("\n");
    assert!(count <= max, "`{pattern}` budget exceeded: found {count}, max {max}.\n{listing}");
}

#[test]
fn unwrap_budget() {
    assert_budget(".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    assert_budget(".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    assert_budget("panic!(", MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    assert_budget("unreachable!(", MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    assert_budget("todo!(", MAX_TODO);
}

#[test]
fn unimplemented_budget() {
    assert_budget("unimplemented!(", MAX_UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    assert_budget("let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    assert_budget(".ok()", MAX_DOT_OK);
}

#[test]
fn println_budget() {
    assert_budget("println!(", MAX_PRINTLN);
}

#[test]
fn allow_dead_code_budget() {
    assert_budget("#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE);
}

#[test]
fn every_module_has_a_test_file() {
    let missing: Vec<String> = source_files()
        .into_iter()
        .filter_map(|file| {
            let name = Path::new(&file.path).file_name()?.to_string_lossy().to_string();
            if UNTESTED_MODULES.contains(&name.as_str()) {
                return None;
            }
            let test_path = file.path.replace(".rs", "_test.rs");
            (!Path::new(&test_path).exists()).then_some(file.path)
        })
        .collect();
    assert!(missing.is_empty(), "modules without a sibling _test.rs:\n  {}", missing.join("\n  "));
}

#[test]
fn test_modules_are_named_after_their_file() {
    let misnamed: Vec<String> = source_files()
        .into_iter()
        .filter_map(|file| {
            let lines: Vec<&str> = file.content.lines().collect();
            let bad = lines.windows(2).any(|pair| {
                let Some(test_file) = pair[0].trim().strip_prefix("#[path = \"").and_then(|rest| rest.strip_suffix(".rs\"]"))
                else {
                    return false;
                };
                pair[1].trim() != format!("mod {test_file};")
            });
            bad.then_some(file.path)
        })
        .collect();
    assert!(misnamed.is_empty(), "test modules not named after their file:\n  {}", misnamed.join("\n  "));
}

#[test]
fn lossy_casts_are_allowed_explicitly() {
    let unmarked: Vec<String> = source_files()
        .into_iter()
        .filter(|file| {
            let casts = file.content.lines().any(|line| LOSSY_CASTS.iter().any(|cast| line.contains(cast)));
            casts && !file.content.contains("#[allow(clippy::cast_")
        })
        .map(|file| file.path)
        .collect();
    assert!(unmarked.is_empty(), "numeric casts without a clippy cast allow:\n  {}", unmarked.join("\n  "));
}
