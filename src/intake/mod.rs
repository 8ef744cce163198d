//! File intake: filtering raw candidates into a pending upload set.
//!
//! Candidates arrive from command-line paths (files or directories) and are
//! run through a single acceptance predicate before they can be submitted.
//! Whatever feeds the predicate - a path argument today, some other picker
//! tomorrow - the filtering rules are the same.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions the review service knows how to analyze (without dot).
pub const RECOGNIZED_EXTENSIONS: [&str; 14] = [
    "js", "jsx", "ts", "tsx", "py", "java", "cpp", "c", "cs", "php", "rb", "go", "rs", "txt",
];

/// Default extension set as owned strings, for configuration.
pub fn default_extensions() -> Vec<String> {
    RECOGNIZED_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

/// A raw file candidate, prior to validation.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// Bare file name (no directory components).
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// Declared content type, when the source of the candidate knows one.
    pub content_type: Option<String>,
    /// Path the file contents will be read from at submission time.
    pub path: PathBuf,
}

impl FileCandidate {
    /// Build a candidate from a filesystem path. Returns `None` for paths
    /// that are not regular files or cannot be stat'd.
    pub fn from_path(path: &Path) -> Option<Self> {
        let metadata = match fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => return None,
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                return None;
            }
        };

        let name = path.file_name()?.to_string_lossy().to_string();

        Some(Self {
            name,
            size: metadata.len(),
            content_type: None,
            path: path.to_path_buf(),
        })
    }
}

/// A validated upload candidate, held between intake and submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFile {
    /// Bare file name, as it will be reported to the service.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// File extension (without dot, lowercased).
    pub extension: String,
    /// Path the contents are read from when the batch is encoded.
    pub path: PathBuf,
}

/// The acceptance predicate.
///
/// A candidate passes if its declared content type contains `"text"` OR its
/// file name carries one of the recognized extensions (case-insensitive).
/// The predicate is pure: it looks at nothing but its arguments.
pub fn accepts(content_type: Option<&str>, name: &str, extensions: &[String]) -> bool {
    if let Some(ct) = content_type {
        if ct.contains("text") {
            return true;
        }
    }

    match extension_of(name) {
        Some(ext) => extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

/// Extract the lowercased extension of a file name, if it has one.
fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Expand command-line paths into candidates.
///
/// Plain files become one candidate each; directories are walked
/// recursively in file-name order. Missing paths are logged and skipped.
pub fn candidates_from_paths(paths: &[PathBuf]) -> Vec<FileCandidate> {
    let mut candidates = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path).sort_by_file_name();
            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() {
                    if let Some(candidate) = FileCandidate::from_path(entry.path()) {
                        candidates.push(candidate);
                    }
                }
            }
        } else if let Some(candidate) = FileCandidate::from_path(path) {
            candidates.push(candidate);
        } else {
            warn!("Skipping {}: not a readable file", path.display());
        }
    }

    candidates
}

/// The intake stage: filters candidates and owns the pending set.
pub struct Intake {
    extensions: Vec<String>,
    pending: Vec<PendingFile>,
}

impl Intake {
    /// Create an intake stage with the given recognized extensions.
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            extensions,
            pending: Vec::new(),
        }
    }

    /// Run candidates through the predicate.
    ///
    /// A non-empty accepted set replaces the current pending set. If
    /// nothing survives the filter, the prior selection is kept as-is -
    /// rejection is silent. Returns the number of accepted files.
    pub fn select(&mut self, candidates: Vec<FileCandidate>) -> usize {
        let accepted: Vec<PendingFile> = candidates
            .into_iter()
            .filter(|c| accepts(c.content_type.as_deref(), &c.name, &self.extensions))
            .map(|c| PendingFile {
                extension: extension_of(&c.name).unwrap_or_default(),
                name: c.name,
                size: c.size,
                path: c.path,
            })
            .collect();

        if accepted.is_empty() {
            debug!("No candidates accepted; keeping current selection");
            return 0;
        }

        let count = accepted.len();
        self.pending = accepted;
        count
    }

    /// Drop the pending entry at `index`, preserving the relative order of
    /// the rest. Out-of-range indices are a no-op.
    pub fn remove(&mut self, index: usize) -> Option<PendingFile> {
        if index < self.pending.len() {
            Some(self.pending.remove(index))
        } else {
            None
        }
    }

    /// The current pending set, in selection order.
    pub fn pending(&self) -> &[PendingFile] {
        &self.pending
    }

    /// Take the pending set for submission, leaving the selection empty.
    pub fn take_pending(&mut self) -> Vec<PendingFile> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
