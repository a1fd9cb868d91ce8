//! Discovery of routable pages under a project's pages directory.

use std::fs;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};

use tablesmith_core::{DiscoveryReport, Result};
use walkdir::WalkDir;

use crate::fs_utils::{is_page_file, route_for};

/// Conventional directory holding routable pages.
pub const DEFAULT_PAGES_DIR: &str = "pages";

/// Builds a [`DiscoveryReport`] from the pages of a project.
#[derive(Debug, Clone)]
pub struct ContextScanner {
    /// Root directory of the project
    project_root: PathBuf,
    /// Pages directory, relative to the project root
    pages_dir: String,
}

impl ContextScanner {
    /// Create a scanner over `project_root` using the default pages directory.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            pages_dir: DEFAULT_PAGES_DIR.to_owned(),
        }
    }

    /// Override the pages directory name.
    #[must_use]
    pub fn with_pages_dir(mut self, pages_dir: impl Into<String>) -> Self {
        self.pages_dir = pages_dir.into();
        self
    }

    /// Absolute location of the pages directory.
    pub fn pages_root(&self) -> PathBuf {
        self.project_root.join(&self.pages_dir)
    }

    /// Walk the pages directory and read every page script.
    ///
    /// A missing pages directory yields an empty report. Files that vanish
    /// between listing and reading are skipped.
    ///
    /// # Errors
    /// Returns an I/O error for any walk or read failure other than a missing file.
    pub fn scan(&self) -> Result<DiscoveryReport> {
        let pages_root = self.pages_root();
        let mut report = DiscoveryReport::default();

        if !pages_root.is_dir() {
            tracing::info!(
                "No pages directory at {}, continuing with empty context",
                pages_root.display()
            );
            return Ok(report);
        }

        let pages = collect_pages(&pages_root)?;
        tracing::debug!("Discovered {} page files", pages.len());

        for (route, path) in pages {
            match fs::read_to_string(&path) {
                Ok(content) => {
                    if !content.is_empty() {
                        report.contents.insert(route.clone(), content);
                    }
                }
                Err(error) if error.kind() == ErrorKind::NotFound => {
                    tracing::warn!("Page {} disappeared before it could be read", path.display());
                }
                Err(error) => return Err(error.into()),
            }
            report.routes.push(route);
        }

        tracing::info!(
            "Scanned {} routes ({} with content)",
            report.routes.len(),
            report.contents.len()
        );

        Ok(report)
    }
}

/// List `(route, path)` pairs for every page file, in sorted walk order.
fn collect_pages(pages_root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(pages_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                if error
                    .io_error()
                    .is_some_and(|io_error| io_error.kind() == ErrorKind::NotFound)
                {
                    continue;
                }
                return Err(IoError::from(error).into());
            }
        };

        if entry.file_type().is_dir() || !is_page_file(entry.path()) {
            continue;
        }

        if let Some(route) = route_for(pages_root, entry.path()) {
            pages.push((route, entry.into_path()));
        }
    }

    Ok(pages)
}
