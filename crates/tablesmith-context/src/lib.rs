//! Page discovery for assembling generation context from a web project tree.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Test allows"
    )
)]

mod fs_utils;
mod scanner;

pub use fs_utils::{PAGE_EXTENSIONS, is_page_file, route_for};
pub use scanner::{ContextScanner, DEFAULT_PAGES_DIR};
