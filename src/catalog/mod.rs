//! Place Catalog
//!
//! Loads the places served by the ranking service and the reference set used
//! to score them.
//!
//! Supported catalog formats:
//! - JSON: `{"places": [...]}` or a bare array of entries
//! - CSV: header `id,title,description[,image_link][,rating]`

mod csv_import;

pub use csv_import::CsvCatalogImporter;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::place::{Place, DEFAULT_IMAGE_LINK};

/// A place as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_link: Option<String>,
    /// Mean user rating, if the place was ever rated
    #[serde(default)]
    pub rating: Option<f64>,
}

impl CatalogEntry {
    pub fn new(id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            image_link: None,
            rating: None,
        }
    }

    pub fn image(mut self, link: impl Into<String>) -> Self {
        self.image_link = Some(link.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Text the entry is ranked by
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Public view of the entry, with the default image filled in
    pub fn to_place(&self) -> Place {
        let image_link = match self.image_link.as_deref() {
            Some(link) if !link.trim().is_empty() => link.to_string(),
            _ => DEFAULT_IMAGE_LINK.to_string(),
        };
        Place::new(self.id, self.title.clone(), self.description.clone(), image_link)
    }
}

/// A place the catalog is scored against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePlace {
    pub title: String,
    pub description: String,
}

impl ReferencePlace {
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

impl From<&CatalogEntry> for ReferencePlace {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            description: entry.description.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlacesDocument<T> {
    Wrapped { places: Vec<T> },
    Bare(Vec<T>),
}

impl<T> PlacesDocument<T> {
    fn into_places(self) -> Vec<T> {
        match self {
            PlacesDocument::Wrapped { places } => places,
            PlacesDocument::Bare(places) => places,
        }
    }
}

/// Ordered collection of catalog entries
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a catalog file, picking the format from the extension
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let catalog = if is_csv {
            CsvCatalogImporter::new().import_file(path)?
        } else {
            let content = read_file(path)?;
            Self::from_json_str(&content).map_err(|e| CatalogError::Json {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?
        };

        tracing::info!(path = ?path, places = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let doc: PlacesDocument<CatalogEntry> = serde_json::from_str(content)?;
        Ok(Self::new(doc.into_places()))
    }

    /// Reference set derived from the catalog itself
    pub fn as_reference(&self) -> Vec<ReferencePlace> {
        self.entries.iter().map(ReferencePlace::from).collect()
    }
}

/// Load the reference set (`{"places": [{"title", "description"}, ...]}`)
pub fn load_reference(path: &Path) -> Result<Vec<ReferencePlace>, CatalogError> {
    let content = read_file(path)?;
    let places = reference_from_json_str(&content).map_err(|e| CatalogError::Json {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    tracing::info!(path = ?path, places = places.len(), "Loaded reference places");
    Ok(places)
}

pub fn reference_from_json_str(content: &str) -> Result<Vec<ReferencePlace>, serde_json::Error> {
    let doc: PlacesDocument<ReferencePlace> = serde_json::from_str(content)?;
    Ok(doc.into_places())
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Errors raised while loading catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse {path:?}: {error}")]
    Json { path: PathBuf, error: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG_JSON: &str = r#"{
        "places": [
            {"id": 1, "title": "Teriberka", "description": "Village by the sea", "image_link": "http://img/1", "rating": 4.5},
            {"id": 2, "title": "Khibiny", "description": "Mountains"}
        ]
    }"#;

    #[test]
    fn test_parse_wrapped_json() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].rating, Some(4.5));
        assert_eq!(catalog.entries()[1].image_link, None);
    }

    #[test]
    fn test_parse_bare_json_array() {
        let catalog =
            Catalog::from_json_str(r#"[{"id": 5, "title": "Lovozero", "description": "Lake"}]"#)
                .unwrap();
        assert_eq!(catalog.entries()[0].id, 5);
    }

    #[test]
    fn test_default_image() {
        let entry = CatalogEntry::new(2, "Khibiny", "Mountains");
        assert_eq!(entry.to_place().image_link, DEFAULT_IMAGE_LINK);

        let blank = CatalogEntry::new(2, "Khibiny", "Mountains").image("  ");
        assert_eq!(blank.to_place().image_link, DEFAULT_IMAGE_LINK);

        let with_image = CatalogEntry::new(2, "Khibiny", "Mountains").image("http://img/2");
        assert_eq!(with_image.to_place().image_link, "http://img/2");
    }

    #[test]
    fn test_load_json_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(CATALOG_JSON.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "id,title,description,image_link,rating").unwrap();
        writeln!(file, "1,Teriberka,Village by the sea,http://img/1,4.5").unwrap();
        writeln!(file, "2,Khibiny,Mountains,,").unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[1].rating, None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/places.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{not json").unwrap();

        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_reference_json() {
        let refs = reference_from_json_str(
            r#"{"places": [{"title": "Northern lights", "description": "Aurora hunting tour"}]}"#,
        )
        .unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].text(), "Northern lights Aurora hunting tour");
    }

    #[test]
    fn test_catalog_as_reference() {
        let catalog = Catalog::from_json_str(CATALOG_JSON).unwrap();
        let refs = catalog.as_reference();
        assert_eq!(refs[1].title, "Khibiny");
    }
}
