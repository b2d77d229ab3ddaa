//! CSV Import
//!
//! Reads catalog entries from CSV files. Rows that fail to parse are skipped
//! and reported; the import only fails on I/O errors or a bad header.

use super::*;
use std::io::Read;

/// CSV catalog importer
pub struct CsvCatalogImporter {
    /// Field delimiter
    delimiter: u8,
    /// Whether the CSV has a header row
    has_header: bool,
}

/// Result of a CSV import
#[derive(Debug)]
pub struct CsvImportResult {
    pub catalog: Catalog,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl Default for CsvCatalogImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvCatalogImporter {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether the CSV has a header row.
    ///
    /// Without a header, columns are read positionally as
    /// `id,title,description,image_link,rating`.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Import a file, logging skipped rows
    pub fn import_file(&self, path: &Path) -> Result<Catalog, CatalogError> {
        let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let result = self.import_reader(file)?;
        if result.rows_failed > 0 {
            tracing::warn!(
                path = ?path,
                rows_failed = result.rows_failed,
                first_error = ?result.errors.first(),
                "Skipped malformed catalog rows"
            );
        }

        Ok(result.catalog)
    }

    /// Import from any reader
    pub fn import_reader<R: Read>(&self, reader: R) -> Result<CsvImportResult, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = if self.has_header {
            let headers = rdr.headers()?.clone();
            Some(headers)
        } else {
            None
        };

        let mut entries = Vec::new();
        let mut rows_processed = 0;
        let mut rows_failed = 0;
        let mut errors = Vec::new();

        for (line, record) in rdr.records().enumerate() {
            rows_processed += 1;

            let parsed = record.and_then(|record| match &headers {
                Some(headers) => record.deserialize::<CatalogEntry>(Some(headers)),
                None => record.deserialize::<CatalogEntry>(None),
            });

            match parsed {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    rows_failed += 1;
                    errors.push(format!("row {}: {}", line + 1, e));
                }
            }
        }

        Ok(CsvImportResult {
            catalog: Catalog::new(entries),
            rows_processed,
            rows_failed,
            errors,
        })
    }
}
