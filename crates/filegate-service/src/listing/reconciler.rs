//! The namespace reconciler.
//!
//! A folder view has two independently-mutated sources: the bucket's flat
//! key space (listed one level at a time with a `/` delimiter) and the
//! metadata table. Neither is authoritative for the whole picture — the
//! store knows which bytes exist, the table knows who owns them — and no
//! transaction spans the two, so the merge has explicit tie-break rules:
//!
//! * a key present in both sources is emitted from metadata, preferring
//!   the store's live size;
//! * a key only in the store is emitted as an external file;
//! * a row only in the table is still emitted, so a listing raced against
//!   an in-flight upload never silently drops a file;
//! * folder entries always precede files and are sorted by name.

use std::collections::{BTreeSet, HashMap, HashSet};

use filegate_core::traits::storage::ObjectEntry;
use filegate_core::types::path::{child_folder_path, folder_prefix, is_marker_key};
use filegate_entity::file::FileWithOwner;

use super::entry::{FileEntry, FolderEntry, ListingEntry};

/// Owner label for objects present in the store with no metadata row.
pub const EXTERNAL_OWNER: &str = "External";

/// Owner label for rows whose owning user no longer exists.
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Display label for the pseudo-folder literally named `/`.
pub const SLASH_FOLDER_LABEL: &str = "[slash]";

/// Merge a single-level delimiter listing with the folder's metadata rows.
///
/// `db_files` are the rows whose `folder_path` equals the requested path;
/// `objects` is the store listing under the corresponding prefix with
/// delimiter `/`. The result is folders (sorted) followed by files in
/// discovery order: seen-in-store first, then metadata-only.
pub fn reconcile(
    folder_path: &str,
    db_files: &[FileWithOwner],
    objects: &[ObjectEntry],
) -> Vec<ListingEntry> {
    let prefix = folder_prefix(folder_path);

    let by_key: HashMap<&str, &FileWithOwner> = db_files
        .iter()
        .map(|row| (row.file.object_key.as_str(), row))
        .collect();

    let mut folders: BTreeSet<String> = BTreeSet::new();
    let mut files: Vec<FileEntry> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in objects {
        match entry {
            ObjectEntry::CommonPrefix { prefix: common } => {
                if let Some(name) = folder_name_from_prefix(common) {
                    folders.insert(name);
                }
            }
            ObjectEntry::Object {
                key,
                size,
                last_modified,
            } => {
                if key.is_empty() || is_marker_key(key) {
                    continue;
                }
                let Some(remainder) = key.strip_prefix(prefix.as_str()) else {
                    continue;
                };
                // The delimiter should already exclude deeper keys; skip
                // defensively if one leaks through.
                if remainder.contains('/') {
                    continue;
                }

                seen.insert(key.as_str());

                if let Some(row) = by_key.get(key.as_str()) {
                    files.push(FileEntry {
                        id: Some(row.file.id),
                        filename: row.file.filename.clone(),
                        object_key: key.clone(),
                        size_bytes: (*size).or(row.file.size_bytes),
                        content_type: row.file.content_type.clone(),
                        folder_path: folder_path.to_string(),
                        uploaded_at: Some(row.file.uploaded_at),
                        owner: owner_label(row),
                    });
                } else {
                    files.push(FileEntry {
                        id: None,
                        filename: remainder.to_string(),
                        object_key: key.clone(),
                        size_bytes: *size,
                        content_type: None,
                        folder_path: folder_path.to_string(),
                        uploaded_at: *last_modified,
                        owner: EXTERNAL_OWNER.to_string(),
                    });
                }
            }
        }
    }

    // Stale-metadata tolerance: rows whose key the listing did not return
    // are still shown, with whatever size was last recorded.
    for row in db_files {
        if !seen.contains(row.file.object_key.as_str()) {
            files.push(FileEntry {
                id: Some(row.file.id),
                filename: row.file.filename.clone(),
                object_key: row.file.object_key.clone(),
                size_bytes: row.file.size_bytes,
                content_type: row.file.content_type.clone(),
                folder_path: folder_path.to_string(),
                uploaded_at: Some(row.file.uploaded_at),
                owner: owner_label(row),
            });
        }
    }

    let mut result: Vec<ListingEntry> = folders
        .into_iter()
        .map(|name| {
            let path = child_folder_path(folder_path, &name);
            ListingEntry::Folder(FolderEntry { name, path })
        })
        .collect();
    result.extend(files.into_iter().map(ListingEntry::File));
    result
}

/// Derive first-level folder names from a *recursive* (no-delimiter)
/// listing. Backs the folders-only view.
pub fn collect_folders(folder_path: &str, objects: &[ObjectEntry]) -> Vec<FolderEntry> {
    let prefix = folder_prefix(folder_path);
    let mut names: BTreeSet<String> = BTreeSet::new();

    for entry in objects {
        let ObjectEntry::Object { key, .. } = entry else {
            continue;
        };
        let Some(remainder) = key.strip_prefix(prefix.as_str()) else {
            continue;
        };

        if key.ends_with('/') {
            // A folder marker object; only count markers one level down.
            let trimmed = key.trim_end_matches('/');
            let name = if trimmed.is_empty() {
                "/".to_string()
            } else {
                match trimmed.rsplit('/').next() {
                    Some(n) if !n.is_empty() => n.to_string(),
                    _ => continue,
                }
            };
            if remainder.trim_end_matches('/').split('/').count() == 1 {
                names.insert(name);
            }
        } else if let Some(first) = remainder.split('/').next() {
            if remainder.contains('/') && !first.is_empty() {
                names.insert(first.to_string());
            } else if remainder.contains('/') && first.is_empty() {
                // A key beginning with the delimiter groups under "/".
                names.insert("/".to_string());
            }
        }
    }

    names
        .into_iter()
        .map(|name| {
            let path = child_folder_path(folder_path, &name);
            let display = if name == "/" {
                SLASH_FOLDER_LABEL.to_string()
            } else {
                name
            };
            FolderEntry {
                name: display,
                path,
            }
        })
        .collect()
}

/// Extract the display name of a common-prefix entry: the path segment
/// before the trailing delimiter.
fn folder_name_from_prefix(common: &str) -> Option<String> {
    // A bare "/" at the root: keys beginning with the delimiter form a
    // folder literally named "/".
    if common == "/" {
        return Some("/".to_string());
    }
    let trimmed = common.strip_suffix('/').unwrap_or(common);
    match trimmed.rsplit('/').next() {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => None,
    }
}

fn owner_label(row: &FileWithOwner) -> String {
    row.owner_username
        .clone()
        .unwrap_or_else(|| UNKNOWN_OWNER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use filegate_entity::file::FileRecord;
    use uuid::Uuid;

    fn row(key: &str, filename: &str, folder: &str, size: Option<i64>) -> FileWithOwner {
        FileWithOwner {
            file: FileRecord {
                id: Uuid::new_v4(),
                filename: filename.to_string(),
                object_key: key.to_string(),
                size_bytes: size,
                content_type: Some("application/pdf".to_string()),
                folder_path: folder.to_string(),
                owner_id: Some(Uuid::new_v4()),
                uploaded_at: Utc::now(),
            },
            owner_username: Some("alice".to_string()),
        }
    }

    fn object(key: &str, size: i64) -> ObjectEntry {
        ObjectEntry::Object {
            key: key.to_string(),
            size: Some(size),
            last_modified: Some(Utc::now()),
        }
    }

    fn common(prefix: &str) -> ObjectEntry {
        ObjectEntry::CommonPrefix {
            prefix: prefix.to_string(),
        }
    }

    fn files_of(entries: &[ListingEntry]) -> Vec<&FileEntry> {
        entries
            .iter()
            .filter_map(|e| match e {
                ListingEntry::File(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    fn folders_of(entries: &[ListingEntry]) -> Vec<&FolderEntry> {
        entries
            .iter()
            .filter_map(|e| match e {
                ListingEntry::Folder(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_merges_metadata_with_store_preferring_live_size() {
        let rows = vec![row("docs/report.pdf", "report.pdf", "/docs", Some(10))];
        let objects = vec![object("docs/report.pdf", 2048)];

        let entries = reconcile("/docs", &rows, &objects);
        let files = files_of(&entries);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "report.pdf");
        assert_eq!(files[0].size_bytes, Some(2048));
        assert_eq!(files[0].owner, "alice");
        assert!(files[0].id.is_some());
    }

    #[test]
    fn test_store_only_object_is_external() {
        let objects = vec![object("docs/stray.bin", 512)];

        let entries = reconcile("/docs", &[], &objects);
        let files = files_of(&entries);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].owner, EXTERNAL_OWNER);
        assert_eq!(files[0].filename, "stray.bin");
        assert!(files[0].id.is_none());
        assert!(files[0].content_type.is_none());
    }

    #[test]
    fn test_stale_metadata_row_is_never_dropped() {
        let rows = vec![row("docs/ghost.pdf", "ghost.pdf", "/docs", Some(77))];

        let entries = reconcile("/docs", &rows, &[]);
        let files = files_of(&entries);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].object_key, "docs/ghost.pdf");
        assert_eq!(files[0].size_bytes, Some(77));
    }

    #[test]
    fn test_pending_upload_appears_via_metadata_fallback() {
        // Upload URL issued but bytes never arrived: row exists with no
        // size and the store has nothing.
        let rows = vec![row("docs/report.pdf", "report.pdf", "/docs", None)];

        let entries = reconcile("/docs", &rows, &[]);
        let files = files_of(&entries);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size_bytes, None);
    }

    #[test]
    fn test_folders_precede_files_and_sort() {
        let objects = vec![
            object("zeta.txt", 1),
            common("beta/"),
            common("alpha/"),
            object("apple.txt", 1),
        ];

        let entries = reconcile("/", &[], &objects);

        assert!(matches!(entries[0], ListingEntry::Folder(_)));
        assert!(matches!(entries[1], ListingEntry::Folder(_)));
        let folders = folders_of(&entries);
        assert_eq!(folders[0].name, "alpha");
        assert_eq!(folders[0].path, "/alpha");
        assert_eq!(folders[1].name, "beta");
        assert_eq!(files_of(&entries).len(), 2);
    }

    #[test]
    fn test_markers_and_deep_keys_are_skipped() {
        let objects = vec![
            object("docs/", 0),
            object("docs/.keep", 0),
            object(".keep", 0),
            object("docs/sub/deep.txt", 9),
        ];

        let entries = reconcile("/docs", &[], &objects);
        assert!(files_of(&entries).is_empty());
    }

    #[test]
    fn test_duplicate_common_prefixes_dedupe() {
        let objects = vec![common("docs/"), common("docs/")];
        let entries = reconcile("/", &[], &objects);
        assert_eq!(folders_of(&entries).len(), 1);
    }

    #[test]
    fn test_slash_folder_stays_distinct_from_root() {
        let objects = vec![common("/")];

        let entries = reconcile("/", &[], &objects);
        let folders = folders_of(&entries);

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "/");
        // Navigating into it must not loop back to the root listing.
        assert_eq!(folders[0].path, "//");
        assert_eq!(filegate_core::types::path::folder_prefix(&folders[0].path), "/");
    }

    #[test]
    fn test_nested_folder_paths_compose() {
        let objects = vec![common("docs/2024/")];
        let entries = reconcile("/docs", &[], &objects);
        let folders = folders_of(&entries);
        assert_eq!(folders[0].name, "2024");
        assert_eq!(folders[0].path, "/docs/2024");
    }

    #[test]
    fn test_idempotent_as_a_set() {
        let rows = vec![
            row("a.txt", "a.txt", "/", Some(1)),
            row("gone.txt", "gone.txt", "/", Some(2)),
        ];
        let objects = vec![object("a.txt", 1), object("ext.txt", 3), common("docs/")];

        let first = reconcile("/", &rows, &objects);
        let second = reconcile("/", &rows, &objects);

        let keys = |entries: &[ListingEntry]| -> BTreeSet<String> {
            entries
                .iter()
                .map(|e| match e {
                    ListingEntry::Folder(f) => format!("folder:{}", f.path),
                    ListingEntry::File(f) => format!("file:{}", f.object_key),
                })
                .collect()
        };
        assert_eq!(keys(&first), keys(&second));
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_collect_folders_from_recursive_listing() {
        let objects = vec![
            object("a/x.txt", 1),
            object("a/y/z.txt", 1),
            object("b/.keep", 0),
            object("top.txt", 1),
            object("c/", 0),
        ];

        let folders = collect_folders("/", &objects);
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(folders[0].path, "/a");
    }

    #[test]
    fn test_collect_folders_renders_slash_label() {
        let objects = vec![object("/odd.txt", 1)];

        let folders = collect_folders("/", &objects);

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, SLASH_FOLDER_LABEL);
        assert_eq!(folders[0].path, "//");
    }

    #[test]
    fn test_collect_folders_scopes_to_prefix() {
        let objects = vec![object("docs/sub/x.txt", 1), object("docs/top.txt", 1)];

        let folders = collect_folders("/docs", &objects);
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["sub"]);
        assert_eq!(folders[0].path, "/docs/sub");
    }
}
