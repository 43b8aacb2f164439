//! End-to-end tests driving the files-to-prompt binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command running in `dir`, isolated from any user configuration
fn files_to_prompt(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("files-to-prompt").unwrap();
    cmd.current_dir(dir)
        .env("FILES_TO_PROMPT_CONFIG", dir.join("no-such-config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, path: &str, content: &str) {
    let full = dir.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, content).unwrap();
}

#[test]
fn test_basic_functionality() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/file1.txt", "Contents of file1");
    write(dir, "test_dir/file2.txt", "Contents of file2");

    files_to_prompt(dir)
        .arg("test_dir")
        .assert()
        .success()
        .stdout(
            "test_dir/file1.txt\n---\nContents of file1\n\n---\n\
             test_dir/file2.txt\n---\nContents of file2\n\n---\n",
        );
}

#[test]
fn test_include_hidden() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/.hidden.txt", "Contents of hidden file");

    files_to_prompt(dir)
        .arg("test_dir")
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/.hidden.txt").not());

    files_to_prompt(dir)
        .args(["test_dir", "--include-hidden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/.hidden.txt"))
        .stdout(predicate::str::contains("Contents of hidden file"));
}

#[test]
fn test_ignore_gitignore() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/.gitignore", "ignored.txt");
    write(dir, "test_dir/ignored.txt", "This file should be ignored");
    write(dir, "test_dir/included.txt", "This file should be included");

    files_to_prompt(dir)
        .arg("test_dir")
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/ignored.txt").not())
        .stdout(predicate::str::contains("test_dir/included.txt"));

    files_to_prompt(dir)
        .args(["test_dir", "--ignore-gitignore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/ignored.txt"))
        .stdout(predicate::str::contains("This file should be ignored"))
        .stdout(predicate::str::contains("test_dir/included.txt"));
}

#[test]
fn test_nested_gitignore_applies_to_descendants_only() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "project/a/.gitignore", "*.log\n");
    write(dir, "project/a/deep/trace.log", "a trace");
    write(dir, "project/a/keep.txt", "a keep");
    write(dir, "project/b/trace.log", "b trace");

    files_to_prompt(dir)
        .arg("project")
        .assert()
        .success()
        .stdout(predicate::str::contains("project/a/deep/trace.log").not())
        .stdout(predicate::str::contains("project/a/keep.txt"))
        .stdout(predicate::str::contains("project/b/trace.log"));
}

#[test]
fn test_parent_gitignore_seeds_root() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, ".gitignore", "secret.txt\n");
    write(dir, "test_dir/secret.txt", "hidden by parent rules");
    write(dir, "test_dir/open.txt", "visible");

    files_to_prompt(dir)
        .arg("test_dir")
        .assert()
        .success()
        .stdout(predicate::str::contains("secret.txt").not())
        .stdout(predicate::str::contains("test_dir/open.txt"));
}

#[test]
fn test_multiple_paths() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir1/file1.txt", "Contents of file1");
    write(dir, "test_dir2/file2.txt", "Contents of file2");
    write(dir, "single_file.txt", "Contents of single file");

    files_to_prompt(dir)
        .args(["test_dir1", "test_dir2", "single_file.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir1/file1.txt"))
        .stdout(predicate::str::contains("Contents of file1"))
        .stdout(predicate::str::contains("test_dir2/file2.txt"))
        .stdout(predicate::str::contains("Contents of file2"))
        .stdout(predicate::str::contains("single_file.txt"))
        .stdout(predicate::str::contains("Contents of single file"));
}

#[test]
fn test_ignore_patterns() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(
        dir,
        "test_dir/file_to_ignore.txt",
        "This file should be ignored due to ignore patterns",
    );
    write(dir, "test_dir/file_to_include.txt", "This file should be included");

    files_to_prompt(dir)
        .args(["test_dir", "--ignore", "*.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/file_to_ignore.txt").not())
        .stdout(predicate::str::contains("test_dir/file_to_include.txt").not());

    files_to_prompt(dir)
        .args(["test_dir", "--ignore", "file_to_ignore.*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/file_to_ignore.txt").not())
        .stdout(predicate::str::contains("This file should be ignored").not())
        .stdout(predicate::str::contains("test_dir/file_to_include.txt"))
        .stdout(predicate::str::contains("This file should be included"));
}

#[test]
fn test_explicit_files_bypass_ignore_rules() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, ".gitignore", "single_file.txt\n");
    write(dir, "single_file.txt", "Contents of single file");
    write(dir, ".hidden.txt", "Contents of hidden file");

    files_to_prompt(dir)
        .args(["single_file.txt", ".hidden.txt", "--ignore", "*.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contents of single file"))
        .stdout(predicate::str::contains("Contents of hidden file"));
}

#[test]
fn test_mixed_paths_with_options() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(
        dir,
        "test_dir/.gitignore",
        "ignored_in_gitignore.txt\n.hidden_ignored_in_gitignore.txt",
    );
    write(dir, "test_dir/ignored_in_gitignore.txt", "ignored by .gitignore");
    write(dir, "test_dir/.hidden_ignored_in_gitignore.txt", "hidden and ignored");
    write(dir, "test_dir/included.txt", "This file should be included");
    write(dir, "test_dir/.hidden_included.txt", "This hidden file should be included");
    write(dir, "single_file.txt", "Contents of single file");

    files_to_prompt(dir)
        .args(["test_dir", "single_file.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/ignored_in_gitignore.txt").not())
        .stdout(predicate::str::contains("test_dir/.hidden_ignored_in_gitignore.txt").not())
        .stdout(predicate::str::contains("test_dir/included.txt"))
        .stdout(predicate::str::contains("test_dir/.hidden_included.txt").not())
        .stdout(predicate::str::contains("Contents of single file"));

    files_to_prompt(dir)
        .args(["test_dir", "single_file.txt", "--include-hidden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/ignored_in_gitignore.txt").not())
        .stdout(predicate::str::contains("test_dir/.hidden_ignored_in_gitignore.txt").not())
        .stdout(predicate::str::contains("test_dir/included.txt"))
        .stdout(predicate::str::contains("test_dir/.hidden_included.txt"));

    files_to_prompt(dir)
        .args(["test_dir", "single_file.txt", "--ignore-gitignore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/ignored_in_gitignore.txt"))
        .stdout(predicate::str::contains("test_dir/.hidden_ignored_in_gitignore.txt").not())
        .stdout(predicate::str::contains("test_dir/.hidden_included.txt").not());

    files_to_prompt(dir)
        .args([
            "test_dir",
            "single_file.txt",
            "--ignore-gitignore",
            "--include-hidden",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/ignored_in_gitignore.txt"))
        .stdout(predicate::str::contains("test_dir/.hidden_ignored_in_gitignore.txt"))
        .stdout(predicate::str::contains("test_dir/included.txt"))
        .stdout(predicate::str::contains("test_dir/.hidden_included.txt"))
        .stdout(predicate::str::contains("Contents of single file"));
}

#[test]
fn test_binary_file_warning() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::create_dir(dir.join("test_dir")).unwrap();
    fs::write(dir.join("test_dir/binary_file.bin"), [0xffu8]).unwrap();
    write(dir, "test_dir/text_file.txt", "This is a text file");

    files_to_prompt(dir)
        .arg("test_dir")
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/text_file.txt"))
        .stdout(predicate::str::contains("This is a text file"))
        .stdout(predicate::str::contains("binary_file.bin").not())
        .stderr(predicate::str::contains(
            "Warning: Skipping file test_dir/binary_file.bin due to UnicodeDecodeError",
        ));
}

#[test]
fn test_xml_indices_run_across_roots() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir1/a.txt", "A");
    write(dir, "test_dir1/b.txt", "B");
    fs::write(dir.join("test_dir1/c.bin"), [0xfeu8, 0xff]).unwrap();
    write(dir, "test_dir2/c.txt", "C");

    let output = files_to_prompt(dir)
        .args(["test_dir1", "test_dir2", "--xml"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.starts_with(
        "Here are some documents for you to reference for your task:\n\n<documents>\n"
    ));
    assert!(stdout.contains("<document index=\"1\">\n<source>\ntest_dir1/a.txt\n</source>"));
    assert!(stdout.contains("<document index=\"2\">\n<source>\ntest_dir1/b.txt\n</source>"));
    assert!(stdout.contains("<document index=\"3\">\n<source>\ntest_dir2/c.txt\n</source>"));
    assert!(!stdout.contains("index=\"4\""));
    assert!(stdout.ends_with("</document>\n</documents>\n"));
}

#[test]
fn test_template_functionality() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/file1.txt", "Content of file1");
    write(dir, "test_dir/file2.txt", "Content of file2");
    write(dir, "template.txt", "File {{index}}: {{path}}\n---\n{{content}}\n---\n");

    files_to_prompt(dir)
        .args(["test_dir", "--template-file", "template.txt"])
        .assert()
        .success()
        .stdout(
            "File 1: test_dir/file1.txt\n---\nContent of file1\n---\n\
             File 2: test_dir/file2.txt\n---\nContent of file2\n---\n",
        );
}

#[test]
fn test_template_errors_are_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/file1.txt", "Content of file1");
    write(dir, "broken.j2", "{% if %}");
    write(dir, "unknown.j2", "{{ author }}");

    files_to_prompt(dir)
        .args(["test_dir", "-t", "broken.j2"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());

    files_to_prompt(dir)
        .args(["test_dir", "-t", "unknown.j2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("test_dir/file1.txt"));
}

#[test]
fn test_xml_and_template_are_exclusive() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/file1.txt", "x");
    write(dir, "template.txt", "{{ path }}");

    files_to_prompt(dir)
        .args(["test_dir", "--xml", "--template-file", "template.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_custom_ignore_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/custom_ignored.txt", "ignored by custom ignore file");
    write(dir, "test_dir/another_custom_ignored.txt", "also ignored");
    write(dir, "test_dir/included.txt", "This file should be included");
    write(dir, "custom_ignore.txt", "custom_ignored.txt\nanother_custom_ignored.txt");

    for flag in ["--add-ignore-file", "--ignore-file"] {
        files_to_prompt(dir)
            .args(["test_dir", flag, "custom_ignore.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("test_dir/custom_ignored.txt").not())
            .stdout(predicate::str::contains("test_dir/another_custom_ignored.txt").not())
            .stdout(predicate::str::contains("test_dir/included.txt"));
    }
}

#[test]
fn test_custom_ignore_file_and_gitignore() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/.gitignore", "gitignored.txt");
    write(dir, "test_dir/gitignored.txt", "ignored by .gitignore");
    write(dir, "test_dir/custom_ignored.txt", "ignored by custom ignore file");
    write(dir, "test_dir/included.txt", "This file should be included");
    write(dir, "custom_ignore.txt", "custom_ignored.txt");

    files_to_prompt(dir)
        .args(["test_dir", "--add-ignore-file", "custom_ignore.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/gitignored.txt").not())
        .stdout(predicate::str::contains("test_dir/custom_ignored.txt").not())
        .stdout(predicate::str::contains("test_dir/included.txt"));

    // extra ignore files stay active when .gitignore files are not read
    files_to_prompt(dir)
        .args([
            "test_dir",
            "--add-ignore-file",
            "custom_ignore.txt",
            "--ignore-gitignore",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/gitignored.txt"))
        .stdout(predicate::str::contains("test_dir/custom_ignored.txt").not());
}

#[test]
fn test_multiple_custom_ignore_files() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/custom_ignored_1.txt", "ignored by custom_ignore_1.txt");
    write(dir, "test_dir/custom_ignored_2.txt", "ignored by custom_ignore_2.txt");
    write(dir, "test_dir/included.txt", "This file should be included");
    write(dir, "custom_ignore_1.txt", "custom_ignored_1.txt");
    write(dir, "custom_ignore_2.txt", "custom_ignored_2.txt");

    files_to_prompt(dir)
        .args([
            "test_dir",
            "--add-ignore-file",
            "custom_ignore_1.txt",
            "--add-ignore-file",
            "custom_ignore_2.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/custom_ignored_1.txt").not())
        .stdout(predicate::str::contains("test_dir/custom_ignored_2.txt").not())
        .stdout(predicate::str::contains("test_dir/included.txt"));
}

#[test]
fn test_usage_errors_fail_before_output() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/file1.txt", "Content of file1");

    files_to_prompt(dir)
        .args(["test_dir", "missing_dir"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Path does not exist: missing_dir"));

    files_to_prompt(dir)
        .args(["test_dir", "--ignore-file", "missing_rules.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing_rules.txt"));

    files_to_prompt(dir)
        .args(["test_dir", "--template-file", "missing.j2"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    files_to_prompt(dir).assert().failure();
}

#[test]
fn test_version_flag() {
    let temp_dir = TempDir::new().unwrap();

    files_to_prompt(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/file1.txt", "Content of file1");

    files_to_prompt(dir)
        .args(["test_dir", "--xml", "-o", "prompt.xml"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(dir.join("prompt.xml")).unwrap();
    assert!(written.contains("<document index=\"1\">"));
    assert!(written.contains("Content of file1"));
}

#[test]
fn test_output_file_that_is_an_input_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "notes.txt", "precious notes");

    files_to_prompt(dir)
        .args(["notes.txt", "-o", "notes.txt"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Output file is also an input path: notes.txt"));

    files_to_prompt(dir)
        .args(["notes.txt", "-o", "./notes.txt"])
        .assert()
        .code(2);

    assert_eq!(fs::read_to_string(dir.join("notes.txt")).unwrap(), "precious notes");
}

#[test]
fn test_output_file_inside_root_is_not_emitted() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/file1.txt", "Content of file1");

    // Twice, so the second run starts with the first run's prompt on disk
    for _ in 0..2 {
        files_to_prompt(dir)
            .args(["test_dir", "-o", "test_dir/prompt.txt"])
            .assert()
            .success();
    }

    let written = fs::read_to_string(dir.join("test_dir/prompt.txt")).unwrap();
    assert_eq!(written, "test_dir/file1.txt\n---\nContent of file1\n\n---\n");
}

#[test]
fn test_config_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "test_dir/.env", "SECRET=1");
    write(dir, "test_dir/app.lock", "lockfile");
    write(dir, "test_dir/main.rs", "fn main() {}");
    write(
        dir,
        "config.toml",
        "[defaults]\ninclude_hidden = true\nignore = [\"*.lock\"]\n",
    );

    files_to_prompt(dir)
        .env("FILES_TO_PROMPT_CONFIG", dir.join("config.toml"))
        .arg("test_dir")
        .assert()
        .success()
        .stdout(predicate::str::contains("test_dir/.env"))
        .stdout(predicate::str::contains("test_dir/app.lock").not())
        .stdout(predicate::str::contains("test_dir/main.rs"));

    write(dir, "bad.toml", "[defaults\n");
    files_to_prompt(dir)
        .args(["test_dir", "--config", "bad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
