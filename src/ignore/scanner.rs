//! File scanner with ignore filtering
//!
//! Walks each root depth-first and top-down. In every directory the files that
//! survive filtering come out first, sorted by name, then each surviving
//! sub-directory is walked in name order. Files named directly as roots are
//! yielded as-is and never filtered.
//!
//! The scanner is an [`Iterator`]: nothing is read from disk until the next
//! file is requested, and a finished scanner cannot be restarted.

use crate::core::types::{EntryKind, TraversalEntry};
use crate::ignore::checker::{IgnoreChecker, IgnoreResult, IgnoreRules};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use walkdir::WalkDir;

/// Statistics from a scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStats {
    /// Root paths processed so far
    pub roots: usize,
    /// Directories whose contents were listed
    pub directories_visited: usize,
    /// Files and directories found while listing
    pub entries_discovered: usize,
    /// Entries removed by the hidden filter or a rule
    pub entries_ignored: usize,
    /// Files handed out by the iterator
    pub files_yielded: usize,
}

/// Filtered contents of one directory still waiting to be handed out
#[derive(Debug)]
struct DirFrame {
    /// Rules in scope for this directory's entries
    rules: Rc<IgnoreRules>,
    files: std::vec::IntoIter<TraversalEntry>,
    dirs: std::vec::IntoIter<TraversalEntry>,
}

/// Lazy depth-first walk over a list of root paths
#[derive(Debug)]
pub struct FilteredFileScanner {
    /// Ignore checker for filtering
    ignore_checker: IgnoreChecker,
    /// Roots not started yet, in command-line order
    roots: std::vec::IntoIter<PathBuf>,
    /// Directories being walked, innermost last
    stack: Vec<DirFrame>,
    /// Canonical path of a file never to yield from a directory walk
    excluded: Option<PathBuf>,
    stats: ScanStats,
}

impl FilteredFileScanner {
    /// Create a scanner over `roots`
    pub fn new(ignore_checker: IgnoreChecker, roots: Vec<PathBuf>) -> Self {
        Self {
            ignore_checker,
            roots: roots.into_iter(),
            stack: Vec::new(),
            excluded: None,
            stats: ScanStats::default(),
        }
    }

    /// Never yield the file at canonical path `path` from a directory walk.
    /// Used to keep the output file out of its own prompt.
    pub fn excluding(mut self, path: PathBuf) -> Self {
        self.excluded = Some(path);
        self
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// List `dir`, extend `inherited` with its `.gitignore`, and keep what survives
    fn open_dir(&mut self, dir: &Path, inherited: &Rc<IgnoreRules>) -> DirFrame {
        let rules = self.ignore_checker.enter(dir, inherited);
        self.stats.directories_visited += 1;

        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for entry in list_directory(dir) {
            self.stats.entries_discovered += 1;

            if self.is_excluded(&entry) {
                tracing::debug!(path = %entry.path.display(), "skipping output file");
                self.stats.entries_ignored += 1;
                continue;
            }

            match self.ignore_checker.check(&entry, &rules) {
                IgnoreResult::Included => match entry.kind {
                    EntryKind::File => files.push(entry),
                    EntryKind::Directory => dirs.push(entry),
                },
                IgnoreResult::Ignored(reason) => {
                    tracing::trace!(path = %entry.path.display(), %reason, "ignored");
                    self.stats.entries_ignored += 1;
                },
            }
        }

        tracing::debug!(
            dir = %dir.display(),
            rules = rules.len(),
            files = files.len(),
            dirs = dirs.len(),
            "scanned directory"
        );

        DirFrame {
            rules,
            files: files.into_iter(),
            dirs: dirs.into_iter(),
        }
    }

    fn is_excluded(&self, entry: &TraversalEntry) -> bool {
        let Some(excluded) = &self.excluded else {
            return false;
        };

        // Only canonicalize candidates that could possibly match
        entry.kind == EntryKind::File
            && entry.path.file_name() == excluded.file_name()
            && fs::canonicalize(&entry.path).is_ok_and(|path| &path == excluded)
    }
}

impl Iterator for FilteredFileScanner {
    type Item = TraversalEntry;

    fn next(&mut self) -> Option<TraversalEntry> {
        loop {
            if let Some(frame) = self.stack.last_mut() {
                if let Some(file) = frame.files.next() {
                    self.stats.files_yielded += 1;
                    return Some(file);
                }

                if let Some(dir) = frame.dirs.next() {
                    let inherited = Rc::clone(&frame.rules);
                    let child = self.open_dir(&dir.path, &inherited);
                    self.stack.push(child);
                } else {
                    self.stack.pop();
                }
                continue;
            }

            let root = self.roots.next()?;
            self.stats.roots += 1;

            if root.is_dir() {
                let seed = self.ignore_checker.seed(&root);
                let frame = self.open_dir(&root, &seed);
                self.stack.push(frame);
            } else {
                self.stats.files_yielded += 1;
                return Some(TraversalEntry::file(root));
            }
        }
    }
}

/// Immediate children of `dir`, sorted by file name and split by kind.
///
/// Symbolic links count as whatever they point to, except that links to
/// directories are dropped so the walk never follows them. Sockets, FIFOs and
/// dangling links are dropped too.
fn list_directory(dir: &Path) -> Vec<TraversalEntry> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot read directory entry");
                continue;
            },
        };

        let file_type = entry.file_type();
        let path = entry.into_path();

        if file_type.is_dir() {
            entries.push(TraversalEntry::directory(path));
        } else if file_type.is_file() {
            entries.push(TraversalEntry::file(path));
        } else if file_type.is_symlink() && path.is_file() {
            entries.push(TraversalEntry::file(path));
        } else {
            tracing::debug!(path = %path.display(), "skipping special file or directory link");
        }
    }

    entries
}
