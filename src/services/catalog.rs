//! Galaxy catalog loading and page queries
//!
//! The catalog plays the part of the pagination server: it answers a
//! `TableState` with the matching page of records and the total count.

use crate::error::CatalogError;
use crate::model::query::{matching_rows, page_slice};
use crate::model::{GalaxyRecord, TableState, GALAXY_COLUMNS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON catalogs are either a bare array or wrapped in `{"galaxies": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Records(Vec<GalaxyRecord>),
    Wrapped { galaxies: Vec<GalaxyRecord> },
}

/// One page of query results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalaxyPage {
    pub galaxies: Vec<GalaxyRecord>,
    /// Matching rows across all pages
    pub total_matches: usize,
}

/// An in-memory galaxy catalog
#[derive(Debug, Clone, Default)]
pub struct GalaxyCatalog {
    records: Vec<GalaxyRecord>,
    source: Option<PathBuf>,
}

impl GalaxyCatalog {
    pub fn from_records(records: Vec<GalaxyRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Load a catalog file, choosing the parser from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let records = match extension.as_deref() {
            Some("json") => load_json(path)?,
            Some("csv") => load_csv(path)?,
            _ => {
                return Err(CatalogError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        info!(path = %path.display(), records = records.len(), "loaded galaxy catalog");

        Ok(Self {
            records,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn records(&self) -> &[GalaxyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File the catalog was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Search, filter, sort and slice the catalog for a table state
    pub fn query(&self, state: &TableState) -> GalaxyPage {
        let indices = matching_rows(&self.records, &GALAXY_COLUMNS, state);
        let galaxies: Vec<GalaxyRecord> = page_slice(&indices, state)
            .iter()
            .map(|&i| self.records[i].clone())
            .collect();

        debug!(
            page = state.page,
            rows_per_page = state.rows_per_page,
            total_matches = indices.len(),
            returned = galaxies.len(),
            "served catalog page"
        );

        GalaxyPage {
            galaxies,
            total_matches: indices.len(),
        }
    }
}

fn load_json(path: &Path) -> Result<Vec<GalaxyRecord>, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog: JsonCatalog =
        serde_json::from_str(&contents).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(match catalog {
        JsonCatalog::Records(records) => records,
        JsonCatalog::Wrapped { galaxies } => galaxies,
    })
}

fn load_csv(path: &Path) -> Result<Vec<GalaxyRecord>, CatalogError> {
    let file = fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: GalaxyRecord = result.map_err(|source| CatalogError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table_state::{SortDirection, SortOrder};
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn numbered(count: usize) -> GalaxyCatalog {
        let records = (0..count)
            .map(|i| GalaxyRecord {
                name: Some(format!("G{:03}", i)),
                ra: i as f64,
                dec: 0.0,
                distmpc: Some((count - i) as f64),
                ..Default::default()
            })
            .collect();
        GalaxyCatalog::from_records(records)
    }

    #[test]
    fn test_load_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "galaxies.json",
            r#"[{"name": "M31", "ra": 10.68, "dec": 41.27}, {"ra": 1.0, "dec": 2.0, "mstar": 1e9}]"#,
        );

        let catalog = GalaxyCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].name.as_deref(), Some("M31"));
        assert_eq!(catalog.records()[1].mstar, Some(1e9));
        assert_eq!(catalog.source(), Some(path.as_path()));
    }

    #[test]
    fn test_load_empty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "none.json", "[]");

        let catalog = GalaxyCatalog::load(&path).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.query(&TableState::new(GALAXY_COLUMNS.len(), 0, 10)).galaxies.is_empty());
    }

    #[test]
    fn test_load_wrapped_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "page.JSON",
            r#"{"galaxies": [{"name": "M101", "ra": 210.8, "dec": 54.35}], "totalMatches": 1}"#,
        );

        let catalog = GalaxyCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_csv_with_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "galaxies.csv",
            "name,alt_name,ra,dec,distmpc,redshift\n\
             NGC 4993,ESO 508-18,197.448776,-23.383831,40.4,0.009727\n\
             M31,,10.684708,41.26875,,\n",
        );

        let catalog = GalaxyCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        let m31 = &catalog.records()[1];
        assert_eq!(m31.alt_name, None);
        assert_eq!(m31.distmpc, None);
        assert_eq!(m31.redshift, None);
        assert_eq!(catalog.records()[0].distmpc, Some(40.4));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "galaxies.txt", "");
        let err = GalaxyCatalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "broken.json", "[{\"name\": \"no coordinates\"}]");
        let err = GalaxyCatalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GalaxyCatalog::load("/nonexistent/galaxies.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_query_pages_through_catalog() {
        let catalog = numbered(23);
        let mut state = TableState::new(GALAXY_COLUMNS.len(), 2, 10);

        let page = catalog.query(&state);
        assert_eq!(page.total_matches, 23);
        assert_eq!(page.galaxies.len(), 3);
        assert_eq!(page.galaxies[0].name.as_deref(), Some("G020"));

        state.page = 0;
        state.sort = Some(SortOrder {
            column: 4,
            direction: SortDirection::Asc,
        });
        let page = catalog.query(&state);
        assert_eq!(page.galaxies[0].name.as_deref(), Some("G022"));
    }

    #[test]
    fn test_query_search_reduces_total() {
        let catalog = numbered(23);
        let mut state = TableState::new(GALAXY_COLUMNS.len(), 0, 10);
        state.search_text = Some("g01".to_string());

        let page = catalog.query(&state);
        assert_eq!(page.total_matches, 10);
        assert!(page
            .galaxies
            .iter()
            .all(|g| g.name.as_deref().unwrap_or_default().starts_with("G01")));
    }
}
