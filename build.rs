use std::path::{Path, PathBuf};
use std::process::Command;

const MAX_LINES: usize = 750;

const CHECKED_EXTENSIONS: &[&str] = &["rs", "yaml"];

const EXCLUDED_DIRS: &[&str] = &["target", ".git"];

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/main");
    println!("cargo:rerun-if-changed=.git/packed-refs");

    let sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=FOLLOWER_JOURNEY_GIT_SHA={}", sha);

    let root = manifest_root();
    let files = collect_files_to_check(&root);
    for file in &files {
        println!("cargo:rerun-if-changed={}", file.display());
    }

    enforce_line_limits(&root, &files);
    enforce_no_dead_code_allows(&root, &files);
    enforce_serial_for_env_mutations(&root, &files);
}

fn manifest_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set");
    PathBuf::from(manifest_dir)
}

/// Only the crate's own sources and the embedded default config are policed.
fn collect_files_to_check(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_directory(&root.join("src"), &mut files);
    let default_config = root.join("journey.yaml");
    if default_config.is_file() {
        files.push(default_config);
    }
    files.sort();
    files
}

fn walk_directory(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if EXCLUDED_DIRS.contains(&name) {
                    continue;
                }
            }
            walk_directory(&path, files);
        } else if should_check_file(&path) {
            files.push(path);
        }
    }
}

fn should_check_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CHECKED_EXTENSIONS.contains(&ext))
}

fn count_non_empty_lines(content: &str) -> usize {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count()
}

fn rust_files(files: &[PathBuf]) -> impl Iterator<Item = &PathBuf> {
    files
        .iter()
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("rs"))
}

fn enforce_line_limits(root: &Path, files: &[PathBuf]) {
    let mut violations = Vec::new();
    for file in files {
        match std::fs::read_to_string(file) {
            Ok(content) => {
                let line_count = count_non_empty_lines(&content);
                if line_count > MAX_LINES {
                    let rel_path = file.strip_prefix(root).unwrap_or(file);
                    violations.push((rel_path.to_path_buf(), line_count));
                }
            }
            Err(e) => {
                let rel_path = file.strip_prefix(root).unwrap_or(file);
                println!(
                    "cargo:warning=Could not read file {}: {}",
                    rel_path.display(),
                    e
                );
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n========================================");
        eprintln!("FILE LINE LIMIT EXCEEDED (max {} lines)", MAX_LINES);
        eprintln!("========================================");
        for (path, lines) in &violations {
            eprintln!(
                "  {} - {} lines (exceeds by {})",
                path.display(),
                lines,
                lines - MAX_LINES
            );
        }
        eprintln!("========================================\n");
        panic!(
            "Build failed: {} file(s) exceed the {} line limit",
            violations.len(),
            MAX_LINES
        );
    }
}

fn enforce_no_dead_code_allows(root: &Path, files: &[PathBuf]) {
    let mut violations: Vec<(PathBuf, usize, String)> = Vec::new();

    for file in rust_files(files) {
        let Ok(content) = std::fs::read_to_string(file) else {
            continue;
        };
        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if (trimmed.starts_with("#[allow(") || trimmed.starts_with("#![allow("))
                && trimmed.contains("dead_code")
            {
                let rel_path = file.strip_prefix(root).unwrap_or(file).to_path_buf();
                violations.push((rel_path, line_num + 1, trimmed.to_string()));
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n========================================");
        eprintln!("#[allow(dead_code)] IS NOT ALLOWED");
        eprintln!("========================================");
        for (path, line_num, line) in &violations {
            eprintln!("  {}:{}", path.display(), line_num);
            eprintln!("    {}", line);
        }
        eprintln!("\nDelete unused code, or gate test-only helpers with #[cfg(test)].");
        eprintln!("========================================\n");
        panic!(
            "Build failed: {} #[allow(dead_code)] occurrence(s) found. Remove the dead code.",
            violations.len()
        );
    }
}

/// Tests that mutate process env race each other unless they run under `#[serial]`.
fn enforce_serial_for_env_mutations(root: &Path, files: &[PathBuf]) {
    let mut violations: Vec<(PathBuf, usize, String)> = Vec::new();

    for file in rust_files(files) {
        let Ok(content) = std::fs::read_to_string(file) else {
            continue;
        };
        let lines: Vec<&str> = content.lines().collect();

        let mut in_test_fn = false;
        let mut test_fn_start = 0;
        let mut test_fn_name = String::new();
        let mut has_serial = false;
        let mut brace_depth = 0i32;

        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim();

            if trimmed == "#[serial]" || trimmed == "#[serial_test::serial]" {
                has_serial = true;
            }

            if trimmed == "#[test]" {
                for next in lines.iter().skip(i + 1).take(4) {
                    if let Some((_, after_fn)) = next.split_once("fn ") {
                        if let Some((name, _)) = after_fn.split_once('(') {
                            test_fn_name = name.trim().to_string();
                        }
                        test_fn_start = i + 1;
                        in_test_fn = true;
                        brace_depth = 0;
                        break;
                    }
                }
            }

            if !in_test_fn {
                continue;
            }

            for c in line.chars() {
                if c == '{' {
                    brace_depth += 1;
                } else if c == '}' {
                    brace_depth -= 1;
                    if brace_depth == 0 {
                        in_test_fn = false;
                    }
                }
            }

            let mutates_env = !trimmed.starts_with("//")
                && (trimmed.contains("env::set_var") || trimmed.contains("env::remove_var"));
            if mutates_env && !has_serial {
                let rel_path = file.strip_prefix(root).unwrap_or(file).to_path_buf();
                violations.push((
                    rel_path,
                    test_fn_start,
                    format!("test `{}` mutates env without #[serial]", test_fn_name),
                ));
                in_test_fn = false;
            }

            if !in_test_fn {
                has_serial = false;
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n========================================");
        eprintln!("ENV MUTATIONS REQUIRE #[serial]");
        eprintln!("========================================");
        for (path, line_num, msg) in &violations {
            eprintln!("  {}:{}", path.display(), line_num);
            eprintln!("    {}", msg);
        }
        eprintln!("========================================\n");
        panic!(
            "Build failed: {} test(s) mutate env vars without #[serial].",
            violations.len()
        );
    }
}
