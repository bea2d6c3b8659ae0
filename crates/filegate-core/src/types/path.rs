//! Folder-path canonicalization and object-key helpers.
//!
//! Two path spaces exist: the UI-facing folder path (always a leading
//! `/`, no trailing `/`, root is exactly `"/"`) and the object-store key
//! space (no leading `/`, folders expressed as a trailing-`/` prefix).
//! Everything that crosses between them goes through this module.

/// Canonicalize a folder path for storage and comparison.
///
/// Slashes are trimmed from both ends; the empty path and `"/"` both map
/// to the root `"/"`.
pub fn normalize_folder_path(path: &str) -> String {
    let stripped = path.trim_matches('/');
    if stripped.is_empty() {
        "/".to_string()
    } else {
        format!("/{stripped}")
    }
}

/// Map a UI folder path to an object-store listing prefix.
///
/// Root maps to the empty prefix. Otherwise exactly one leading slash is
/// removed and a single trailing `/` is ensured; stripping only one slash
/// keeps the pseudo-folder literally named `/` (path `"//"`, store prefix
/// `"/"`) distinct from the root.
pub fn folder_prefix(path: &str) -> String {
    let mut p = path.strip_prefix('/').unwrap_or(path).to_string();
    if !p.is_empty() && !p.ends_with('/') {
        p.push('/');
    }
    p
}

/// Compute the path of a child folder under a parent.
pub fn child_folder_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), name)
    }
}

/// Build the object key for a file inside a folder.
///
/// Keys never carry a leading slash; files at the root are stored under
/// their bare filename.
pub fn file_object_key(folder_path: &str, filename: &str) -> String {
    let prefix = folder_path.trim_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{prefix}/{filename}")
    }
}

/// Whether a key is a folder marker or `.keep` sentinel that should never
/// surface as a file.
pub fn is_marker_key(key: &str) -> bool {
    key.ends_with('/') || key == ".keep" || key.ends_with("/.keep")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identities() {
        assert_eq!(normalize_folder_path("foo/"), "/foo");
        assert_eq!(normalize_folder_path("/foo"), "/foo");
        assert_eq!(normalize_folder_path("foo"), "/foo");
        assert_eq!(normalize_folder_path(""), "/");
        assert_eq!(normalize_folder_path("/"), "/");
        assert_eq!(normalize_folder_path("/a/b/"), "/a/b");
    }

    #[test]
    fn test_folder_prefix() {
        assert_eq!(folder_prefix("/"), "");
        assert_eq!(folder_prefix("/docs"), "docs/");
        assert_eq!(folder_prefix("/docs/"), "docs/");
        assert_eq!(folder_prefix("/a/b"), "a/b/");
        // The pseudo-folder named "/" maps to the key space rooted at "/".
        assert_eq!(folder_prefix("//"), "/");
    }

    #[test]
    fn test_child_folder_path() {
        assert_eq!(child_folder_path("/", "docs"), "/docs");
        assert_eq!(child_folder_path("/docs", "2024"), "/docs/2024");
        assert_eq!(child_folder_path("/", "/"), "//");
    }

    #[test]
    fn test_file_object_key() {
        assert_eq!(file_object_key("/", "a.txt"), "a.txt");
        assert_eq!(file_object_key("/docs", "a.txt"), "docs/a.txt");
        assert_eq!(file_object_key("docs/", "a.txt"), "docs/a.txt");
    }

    #[test]
    fn test_marker_keys() {
        assert!(is_marker_key("docs/"));
        assert!(is_marker_key(".keep"));
        assert!(is_marker_key("docs/.keep"));
        assert!(!is_marker_key("docs/keep.txt"));
    }
}
