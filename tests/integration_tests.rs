//! Integration tests for tidyup
//!
//! These tests verify end-to-end workflows and interactions between modules

use chrono::{Local, TimeZone};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use tidyup::cleaner::{self, CategoryAction, CleanupStats, RunContext, RunOptions};
use tidyup::config::Config;
use tidyup::error::{CleanupError, EXIT_USAGE};
use tidyup::output::OutputMode;
use tidyup::prompt::{Decision, ScriptedDecisions};

fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write_bytes(root: &Path, rel: &str, bytes: usize) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![b'#'; bytes]).unwrap();
}

/// `a/x.pyc` (10 B), `a/y.log` (20 B), `docs/readme.md` (protected by `*.md`)
fn scenario_project() -> TempDir {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "a/x.pyc", 10);
    write_bytes(root, "a/y.log", 20);
    write_bytes(root, "docs/readme.md", 5);
    temp_dir
}

fn scenario_config() -> Config {
    let mut config = Config::default();
    config.protected_patterns = vec!["*.md".to_string()];
    config.cleanup_patterns.clear();
    config
        .cleanup_patterns
        .insert("python_compiled".to_string(), vec!["*.pyc".to_string()]);
    config
}

fn options(dry_run: bool, backup: bool, interactive: bool) -> RunOptions {
    RunOptions {
        dry_run,
        backup,
        interactive,
        output_mode: OutputMode::Quiet,
    }
}

#[test]
fn test_scenario_find_and_dry_run() {
    let temp_dir = scenario_project();
    let root = temp_dir.path();
    let config = scenario_config();
    let mut ctx = RunContext::new(root, &config, options(true, false, true));

    let plan = cleaner::plan_category(&ctx, "python_compiled", &["*.pyc".to_string()]);
    let found: Vec<_> = plan.entries.iter().map(|e| e.entry.relative.clone()).collect();
    assert_eq!(found, vec![Path::new("a/x.pyc").to_path_buf()]);
    assert_eq!(plan.total_size, 10);

    let mut script = ScriptedDecisions::default();
    let report = cleaner::run_cleanup(&mut ctx, &[], &mut script).unwrap();

    assert!(root.join("a/x.pyc").exists());
    assert_eq!(report.stats, CleanupStats::default());
    assert_eq!(report.total_items_found(), 1);
    assert_eq!(report.total_size_found(), 10);
    assert!(script.asked().is_empty());
}

#[test]
fn test_scenario_non_interactive_run() {
    let temp_dir = scenario_project();
    let root = temp_dir.path();
    let config = scenario_config();
    let mut ctx = RunContext::new(root, &config, options(false, false, false));

    let mut script = ScriptedDecisions::default();
    let report = cleaner::run_cleanup(&mut ctx, &["python_compiled".to_string()], &mut script)
        .unwrap();

    assert!(!root.join("a/x.pyc").exists());
    assert!(root.join("a/y.log").exists());
    assert!(root.join("docs/readme.md").exists());
    assert_eq!(report.stats.files_deleted, 1);
    assert_eq!(report.stats.dirs_deleted, 0);
    assert_eq!(report.stats.bytes_freed, 10);
    // Non-interactive runs never ask
    assert!(script.asked().is_empty());
}

#[test]
fn test_unknown_category_aborts_before_any_change() {
    let temp_dir = scenario_project();
    let root = temp_dir.path();
    let config = scenario_config();
    let mut ctx = RunContext::new(root, &config, options(false, false, false));

    let mut script = ScriptedDecisions::default();
    let err = cleaner::run_cleanup(&mut ctx, &["bogus".to_string()], &mut script).unwrap_err();

    match err {
        CleanupError::UnknownCategories { invalid, available } => {
            assert_eq!(invalid, vec!["bogus"]);
            assert_eq!(available, vec!["python_compiled"]);
        }
        other => panic!("expected unknown categories, got {:?}", other),
    }
    assert!(root.join("a/x.pyc").exists());
    assert_eq!(ctx.stats, CleanupStats::default());
}

#[test]
fn test_protected_paths_never_matched_by_any_category() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "README.md", 1);
    write_bytes(root, "docs/guide/index.html", 1);
    write_bytes(root, ".git/objects/aa/bb", 1);
    write_bytes(root, "build/out.bin", 1);
    write_bytes(root, "notes.log", 1);

    let config = Config::default();
    let ctx = RunContext::new(root, &config, options(true, false, false));
    let greedy = vec!["*".to_string(), "*/".to_string(), "**/*".to_string()];

    let plan = cleaner::plan_category(&ctx, "everything", &greedy);
    for planned in &plan.entries {
        assert!(
            !ctx.matcher().is_protected(&planned.entry.path),
            "protected path selected: {}",
            planned.entry.path.display()
        );
    }
    assert!(plan.entries.iter().any(|e| e.entry.relative == Path::new("notes.log")));
}

#[test]
fn test_planning_is_idempotent() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "pkg/__pycache__/m.cpython-311.pyc", 100);
    write_bytes(root, "pkg/build/lib/x.so", 300);
    write_bytes(root, "dist/pkg.whl", 50);
    write_bytes(root, "run.log", 7);

    let config = Config::default();
    let ctx = RunContext::new(root, &config, options(true, false, false));

    let first = cleaner::plan_all(&ctx);
    let second = cleaner::plan_all(&ctx);
    assert_eq!(first, second);

    let build = first.iter().find(|p| p.name == "build").unwrap();
    assert_eq!(build.len(), 2);
    assert_eq!(build.total_size, 350);
}

#[test]
fn test_bytes_freed_matches_reported_size() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "a/__pycache__/x.pyc", 11);
    write_bytes(root, "b/__pycache__/y.pyc", 13);
    write_bytes(root, "b/__pycache__/sub/z.pyc", 17);
    write_bytes(root, ".pytest_cache/v/cache", 19);

    let config = Config::default();
    let mut ctx = RunContext::new(root, &config, options(false, false, false));
    let mut script = ScriptedDecisions::default();

    let report = cleaner::run_cleanup(&mut ctx, &["cache".to_string()], &mut script).unwrap();
    let outcome = &report.outcomes[0];

    assert_eq!(outcome.action, CategoryAction::Cleaned { deleted: 3, failed: 0 });
    assert_eq!(outcome.reported_size(), 60);
    assert_eq!(report.stats.dirs_deleted, 3);
    assert_eq!(report.stats.bytes_freed, outcome.reported_size());
    assert!(!root.join("a/__pycache__").exists());
}

#[test]
fn test_backup_copies_are_byte_identical() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src/__pycache__")).unwrap();
    fs::write(root.join("src/__pycache__/mod.pyc"), [0u8, 1, 2, 254, 255]).unwrap();
    fs::write(root.join("src/app.pyc"), b"compiled").unwrap();

    let config = Config::default();
    let start = Local.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap();
    let mut ctx = RunContext::started_at(root, &config, options(false, true, false), start);
    let mut script = ScriptedDecisions::default();

    let report = cleaner::run_cleanup(
        &mut ctx,
        &["cache".to_string(), "python_compiled".to_string()],
        &mut script,
    )
    .unwrap();

    let backup_root = root.join("cleanup_backups").join("20240517_083000");
    assert_eq!(ctx.backup_root(), backup_root);
    assert_eq!(
        fs::read(backup_root.join("src/__pycache__/mod.pyc")).unwrap(),
        vec![0u8, 1, 2, 254, 255]
    );
    assert_eq!(fs::read(backup_root.join("src/app.pyc")).unwrap(), b"compiled");
    assert!(!root.join("src/__pycache__").exists());
    assert!(!root.join("src/app.pyc").exists());
    assert_eq!(report.stats.files_deleted, 1);
    assert_eq!(report.stats.dirs_deleted, 1);

    // A later run does not pick up the backups as cleanup candidates
    let ctx = RunContext::new(root, &config, options(true, false, false));
    assert!(cleaner::plan_all(&ctx).iter().all(|p| p.is_empty()));
}

#[test]
fn test_backup_failure_leaves_entries_and_run_continues() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "a.pyc", 1);
    write_bytes(root, "b.log", 2);

    let mut config = Config::default();
    config.backup_dir = "blocked".to_string();
    // A file where the backup directory has to go
    write_bytes(root, "blocked", 1);

    let mut ctx = RunContext::new(root, &config, options(false, true, false));
    let mut script = ScriptedDecisions::default();
    let report = cleaner::run_cleanup(
        &mut ctx,
        &["python_compiled".to_string(), "logs".to_string()],
        &mut script,
    )
    .unwrap();

    assert!(root.join("a.pyc").exists());
    assert!(root.join("b.log").exists());
    assert_eq!(report.total_failures(), 2);
    assert_eq!(report.stats, CleanupStats::default());
}

#[test]
fn test_interactive_answers_apply_per_category() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "m.pkl", 4);
    write_bytes(root, "x.log", 8);
    write_bytes(root, "plot.png", 16);

    let config = Config::default();
    let mut ctx = RunContext::new(root, &config, options(false, false, true));
    let mut script =
        ScriptedDecisions::new([Decision::Proceed, Decision::Skip, Decision::Decline]);

    let report = cleaner::run_cleanup(&mut ctx, &[], &mut script).unwrap();

    assert_eq!(script.asked(), ["models", "logs", "results"]);
    assert!(!root.join("m.pkl").exists());
    assert!(root.join("x.log").exists());
    assert!(root.join("plot.png").exists());
    assert_eq!(report.stats.files_deleted, 1);
    assert_eq!(report.stats.bytes_freed, 4);
}

#[test]
fn test_config_file_drives_the_run() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "tmp/a.tmp", 3);
    write_bytes(root, "keep/b.tmp", 3);

    let config_path = Config::default_path(root);
    fs::write(
        &config_path,
        r#"{
            "protected_patterns": ["keep/*"],
            "cleanup_patterns": {"scratch": ["*.tmp"]},
            "interactive": false
        }"#,
    )
    .unwrap();

    let (config, warning) = Config::load(&config_path);
    assert!(warning.is_none());
    assert_eq!(config.backup_dir, "cleanup_backups");

    let mut ctx = RunContext::new(root, &config, options(false, false, config.interactive));
    let mut script = ScriptedDecisions::default();
    let report = cleaner::run_cleanup(&mut ctx, &[], &mut script).unwrap();

    assert!(!root.join("tmp/a.tmp").exists());
    assert!(root.join("keep/b.tmp").exists());
    assert_eq!(report.stats.files_deleted, 1);
}

fn count_entries(root: &Path) -> usize {
    walkdir::WalkDir::new(root).min_depth(1).into_iter().count()
}

#[test]
fn test_empty_patterns_in_config_delete_nothing() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "src/x/main.rs", 12);
    write_bytes(root, "notes.txt", 3);

    let mut config = Config::default();
    config.cleanup_patterns.clear();
    config
        .cleanup_patterns
        .insert("stray".to_string(), vec!["".to_string(), "/".to_string()]);

    let mut ctx = RunContext::new(root, &config, options(false, false, false));
    let mut script = ScriptedDecisions::default();
    let report = cleaner::run_cleanup(&mut ctx, &[], &mut script).unwrap();

    assert_eq!(report.outcomes[0].action, CategoryAction::Empty);
    assert_eq!(report.stats, CleanupStats::default());
    assert!(root.join("src/x/main.rs").exists());
    assert!(root.join("notes.txt").exists());
}

#[test]
fn test_backup_dir_nested_in_category_directory() {
    let temp_dir = create_test_dir();
    let root = temp_dir.path();
    write_bytes(root, "build/lib/a.o", 5);
    write_bytes(root, "pkg/dist/p.whl", 7);

    let mut config = Config::default();
    config.backup_dir = "build/bak".to_string();
    let before = count_entries(root);

    let mut ctx = RunContext::new(root, &config, options(false, true, false));
    let mut script = ScriptedDecisions::default();
    let report = cleaner::run_cleanup(&mut ctx, &["build".to_string()], &mut script).unwrap();

    assert_eq!(report.total_failures(), 0);
    assert_eq!(report.stats.dirs_deleted, 1);
    assert!(root.join("build/lib/a.o").exists());
    assert!(!root.join("pkg/dist").exists());
    let backup_root = ctx.backup_root();
    assert_eq!(fs::read(backup_root.join("pkg/dist/p.whl")).unwrap(), vec![b'#'; 7]);
    // pkg/dist went away; bak, the run dir and its pkg/dist/p.whl copy came in
    assert_eq!(count_entries(root), before - 2 + 5);
}

#[test]
fn test_binary_exits_with_usage_code_for_unknown_category() {
    let temp_dir = scenario_project();
    let root = temp_dir.path();

    let output = Command::new(env!("CARGO_BIN_EXE_tidyup"))
        .arg("--root")
        .arg(root)
        .arg("--no-interactive")
        .arg("bogus")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(EXIT_USAGE as i32));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bogus"));
    assert!(stderr.contains("python_compiled"));
    assert!(root.join("a/x.pyc").exists());
}

#[test]
fn test_binary_list_and_save_config() {
    let temp_dir = scenario_project();
    let root = temp_dir.path();
    let config_path = root.join("conf").join("clean.json");

    let output = Command::new(env!("CARGO_BIN_EXE_tidyup"))
        .arg("--root")
        .arg(root)
        .arg("--config")
        .arg(&config_path)
        .arg("--save-config")
        .output()
        .unwrap();
    assert!(output.status.success());
    let (saved, warning) = Config::load(&config_path);
    assert!(warning.is_none());
    assert_eq!(saved, Config::default());

    let output = Command::new(env!("CARGO_BIN_EXE_tidyup"))
        .env("NO_COLOR", "1")
        .arg("--root")
        .arg(root)
        .arg("--list")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available cleanup categories:"));
    assert!(stdout.contains("python_compiled"));
    assert!(root.join("a/x.pyc").exists());
}
