//! Integration tests for tablesmith-context

#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use std::fs;
use std::path::Path;

use tablesmith_context::ContextScanner;
use tempfile::TempDir;

/// Helper to create a project tree from `(relative path, content)` pairs
fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap_or_else(|err| panic!("Failed to create temp dir: {err}"));
    for (relative, content) in files {
        write_file(temp.path(), relative, content);
    }
    temp
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|err| panic!("Failed to create {}: {err}", parent.display()));
    }
    fs::write(&path, content)
        .unwrap_or_else(|err| panic!("Failed to write {}: {err}", path.display()));
}

#[test]
fn test_next_style_project() {
    let temp = project(&[
        ("package.json", "{}"),
        ("pages/_app.js", "export default function App() {}"),
        ("pages/index.tsx", "export default function Home() {}"),
        ("pages/products/index.jsx", "export default function Products() {}"),
        ("pages/products/[id].jsx", "export default function Product() {}"),
        ("pages/api/products.js", "export default function handler() {}"),
        ("components/Nav.jsx", "export default function Nav() {}"),
    ]);

    let report = ContextScanner::new(temp.path())
        .scan()
        .expect("scan should succeed");

    assert_eq!(
        report.routes,
        vec![
            "/_app.js",
            "/api/products.js",
            "/index.tsx",
            "/products/[id].jsx",
            "/products/index.jsx",
        ]
    );
    assert!(report.routes.iter().all(|route| route.starts_with('/')));
    assert!(!report.routes.iter().any(|route| route.contains('\\')));
    for key in report.contents.keys() {
        assert!(report.routes.contains(key), "{key} missing from routes");
    }
}

#[test]
fn test_scan_is_idempotent() {
    let temp = project(&[
        ("pages/index.js", "home"),
        ("pages/a/b/c.tsx", "deep"),
        ("pages/z.jsx", "last"),
    ]);
    let scanner = ContextScanner::new(temp.path());

    let first = scanner.scan().expect("first scan");
    let second = scanner.scan().expect("second scan");
    assert_eq!(first, second);
}

#[test]
fn test_scan_does_not_modify_project() {
    let temp = project(&[("pages/index.js", "home")]);

    ContextScanner::new(temp.path())
        .scan()
        .expect("scan should succeed");

    let entries: Vec<_> = fs::read_dir(temp.path())
        .expect("read project root")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name())
        .collect();
    assert_eq!(entries.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_vanished_page_is_listed_but_not_read() {
    use std::os::unix::fs::symlink;

    let temp = project(&[("pages/index.js", "home")]);
    let pages = temp.path().join("pages");
    symlink(pages.join("deleted.js"), pages.join("gone.js")).expect("create dangling link");

    let report = ContextScanner::new(temp.path())
        .scan()
        .expect("missing files must not abort the scan");

    assert_eq!(report.routes, vec!["/gone.js", "/index.js"]);
    assert_eq!(report.content("/gone.js"), None);
    assert_eq!(report.content("/index.js"), Some("home"));
}
