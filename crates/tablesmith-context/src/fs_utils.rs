use std::path::{Component, Path};

/// Extensions of client-renderable page scripts.
pub const PAGE_EXTENSIONS: &[&str] = &["js", "jsx", "tsx"];

/// Returns `true` if `path` names a page script.
pub fn is_page_file(path: &Path) -> bool {
    let Some(extension) = path.extension() else {
        return false;
    };
    extension
        .to_str()
        .is_some_and(|ext| PAGE_EXTENSIONS.contains(&ext))
}

/// Virtual URL of `path` relative to `pages_root`, separators normalized to `/`.
///
/// Returns `None` if `path` is not inside `pages_root`.
pub fn route_for(pages_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(pages_root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(format!("/{}", segments.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_page_file() {
        assert!(is_page_file(Path::new("pages/index.js")));
        assert!(is_page_file(Path::new("pages/about.jsx")));
        assert!(is_page_file(Path::new("pages/blog/[slug].tsx")));

        assert!(!is_page_file(Path::new("pages/types.ts")));
        assert!(!is_page_file(Path::new("pages/styles.css")));
        assert!(!is_page_file(Path::new("pages/README")));
        assert!(!is_page_file(Path::new("pages/index.JS")));
    }

    #[test]
    fn test_route_for_nested_path() {
        let root = PathBuf::from("/srv/app/pages");
        let file = root.join("api").join("users").join("[id].js");
        assert_eq!(route_for(&root, &file).as_deref(), Some("/api/users/[id].js"));
    }

    #[test]
    fn test_route_for_outside_root() {
        let root = PathBuf::from("/srv/app/pages");
        assert_eq!(route_for(&root, Path::new("/srv/app/lib/db.js")), None);
        assert_eq!(route_for(&root, &root), None);
    }
}
