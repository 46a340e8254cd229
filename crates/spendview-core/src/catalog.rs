//! Listing of available statements.
//!
//! Statements are plain `.csv` files in one directory. They are ordered by a
//! key derived from the file name; the default key reads names such as
//! `15-03-2024.csv` as a (year, month) pair and puts everything else first.

use crate::error::LoadError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// File name suffix of a statement.
pub const CSV_EXTENSION: &str = ".csv";

/// Ordering key of a catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CatalogKey {
    /// Calendar year, or 0 when unknown.
    pub year: i32,
    /// Month of the year (1-12), or 0 when unknown.
    pub month: u32,
}

impl CatalogKey {
    /// Key for names that carry no date. Sorts before every real date.
    pub const UNDATED: Self = Self { year: 0, month: 0 };

    /// Create a key.
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

/// Maps a file stem (name without `.csv`) to its ordering key.
///
/// Any `Fn(&str) -> CatalogKey` is a sort key.
pub trait SortKey {
    /// Key for the given stem.
    fn key(&self, stem: &str) -> CatalogKey;
}

impl<F> SortKey for F
where
    F: Fn(&str) -> CatalogKey,
{
    fn key(&self, stem: &str) -> CatalogKey {
        self(stem)
    }
}

/// Default sort key: stems formatted as `%d-%m-%Y`.
pub fn day_month_year(stem: &str) -> CatalogKey {
    NaiveDate::parse_from_str(stem, "%d-%m-%Y")
        .map(|date| CatalogKey::new(date.year(), date.month()))
        .unwrap_or(CatalogKey::UNDATED)
}

/// One selectable statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// File name including the extension.
    pub name: String,
    /// Ordering key derived from the name.
    pub key: CatalogKey,
}

/// List the `.csv` files in `dir`, ordered by `sort_key` then by name.
///
/// Files whose names the key cannot interpret are still listed.
pub fn list_available_files(
    dir: &Path,
    sort_key: &impl SortKey,
) -> Result<Vec<CatalogEntry>, LoadError> {
    let io_error = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let Some(stem) = name.strip_suffix(CSV_EXTENSION) else {
            continue;
        };
        if !entry.path().is_file() {
            continue;
        }
        let key = sort_key.key(stem);
        entries.push(CatalogEntry { name, key });
    }

    entries.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.name.cmp(&b.name)));
    debug!(dir = %dir.display(), files = entries.len(), "listed statements");
    Ok(entries)
}

/// Turn a user-selected file name into a path inside `dir`.
///
/// Only a bare `.csv` file name is accepted; anything that could name a
/// file outside `dir` is rejected.
pub fn resolve_selection(dir: &Path, name: &str) -> Result<PathBuf, LoadError> {
    let invalid = || LoadError::InvalidSelection {
        name: name.to_string(),
    };

    if !name.ends_with(CSV_EXTENSION) || name.contains(['/', '\\']) {
        return Err(invalid());
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(dir.join(name)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "Category,Amount\n").unwrap();
    }

    fn names(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_day_month_year() {
        assert_eq!(day_month_year("15-03-2024"), CatalogKey::new(2024, 3));
        assert_eq!(day_month_year("01-12-2023"), CatalogKey::new(2023, 12));
        assert_eq!(day_month_year("1-2-2024"), CatalogKey::new(2024, 2));
        assert_eq!(day_month_year("2024-03-15"), CatalogKey::UNDATED);
        assert_eq!(day_month_year("31-02-2024"), CatalogKey::UNDATED);
        assert_eq!(day_month_year("notes"), CatalogKey::UNDATED);
        assert_eq!(day_month_year(""), CatalogKey::UNDATED);
    }

    #[test]
    fn test_undated_sorts_first() {
        assert!(CatalogKey::UNDATED < CatalogKey::new(1, 1));
        assert!(CatalogKey::new(2023, 12) < CatalogKey::new(2024, 1));
    }

    #[test]
    fn test_list_orders_by_month() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "15-03-2024.csv");
        touch(dir.path(), "01-02-2024.csv");
        touch(dir.path(), "notes.csv");
        touch(dir.path(), "20-11-2023.csv");
        touch(dir.path(), "readme.txt");
        fs::create_dir(dir.path().join("archive.csv")).unwrap();

        let entries = list_available_files(dir.path(), &day_month_year).unwrap();
        assert_eq!(
            names(&entries),
            vec!["notes.csv", "20-11-2023.csv", "01-02-2024.csv", "15-03-2024.csv"]
        );
        assert_eq!(entries[0].key, CatalogKey::UNDATED);
    }

    #[test]
    fn test_same_month_breaks_ties_by_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "28-01-2024.csv");
        touch(dir.path(), "02-01-2024.csv");

        let entries = list_available_files(dir.path(), &day_month_year).unwrap();
        assert_eq!(names(&entries), vec!["02-01-2024.csv", "28-01-2024.csv"]);
    }

    #[test]
    fn test_custom_sort_key() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2024-03.csv");
        touch(dir.path(), "2023-07.csv");
        touch(dir.path(), "misc.csv");

        let year_month = |stem: &str| {
            stem.split_once('-')
                .and_then(|(y, m)| Some(CatalogKey::new(y.parse().ok()?, m.parse().ok()?)))
                .unwrap_or(CatalogKey::UNDATED)
        };

        let entries = list_available_files(dir.path(), &year_month).unwrap();
        assert_eq!(names(&entries), vec!["misc.csv", "2023-07.csv", "2024-03.csv"]);
    }

    #[test]
    fn test_list_missing_directory() {
        let err = list_available_files(Path::new("/no/such/dir"), &day_month_year).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_resolve_selection() {
        let dir = Path::new("transactions");
        assert_eq!(
            resolve_selection(dir, "01-02-2024.csv").unwrap(),
            PathBuf::from("transactions/01-02-2024.csv")
        );

        for bad in ["", "../secret.csv", "a/b.csv", "..\\x.csv", "/etc/x.csv", "notes.txt", ".."] {
            assert!(
                matches!(resolve_selection(dir, bad), Err(LoadError::InvalidSelection { .. })),
                "accepted {bad:?}"
            );
        }
    }
}
