//! Catalog loader
//!
//! Reads a CSV file with a header row into a [`Catalog`]. The header must
//! name a `filename` column. A data row may have fewer fields than the
//! header, in which case the trailing columns are missing, but never more.
//! Empty cells become missing values.
//!
//! Blank header cells are named `Unnamed: {index}` and repeated names get a
//! `.1`, `.2`, ... suffix, so every column keeps a distinct name.

use crate::core::catalog::Catalog;
use crate::core::error::{CatalogError, Result};
use crate::core::record::{ImageRecord, Schema};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Load the catalog stored at `path`
///
/// # Errors
///
/// - `SourceNotFound` if nothing exists at `path`
/// - `SourceMalformed` if the file is not a uniform table with a
///   `filename` column
/// - `Io` for any other read failure
pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    debug!("Opening catalog source: {:?}", path);

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CatalogError::SourceNotFound(path.to_path_buf()),
        _ => CatalogError::Io(e),
    })?;

    let catalog = load_from_reader(file, path)?;
    info!("Loaded {} images from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Parse a catalog from any reader
///
/// `origin` only labels errors.
pub fn load_from_reader<R: Read>(reader: R, origin: &Path) -> Result<Catalog> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| CatalogError::malformed(origin, e))?
        .clone();

    // An empty file yields an empty header record rather than an error
    let columns = if headers.len() == 1 && headers[0].is_empty() {
        Vec::new()
    } else {
        column_names(&headers)
    };
    let schema = Arc::new(Schema::new(columns).map_err(|e| CatalogError::malformed(origin, e))?);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|e| CatalogError::malformed(origin, e))?;
        if row.len() > schema.len() {
            let line = row.position().map_or(0, |p| p.line());
            return Err(CatalogError::malformed(
                origin,
                format!(
                    "line {} has {} fields, but the header has {}",
                    line,
                    row.len(),
                    schema.len()
                ),
            ));
        }
        let values = row
            .iter()
            .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
            .collect();
        records.push(ImageRecord::new(schema.clone(), values));
    }

    Ok(Catalog::from_records(schema, records))
}

/// Give every header cell a distinct, non-empty name
fn column_names(headers: &csv::StringRecord) -> Vec<String> {
    let mut taken = HashSet::with_capacity(headers.len());
    headers
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let base = if raw.is_empty() {
                format!("Unnamed: {}", index)
            } else {
                raw.to_string()
            };
            let mut name = base.clone();
            let mut suffix = 0;
            while taken.contains(&name) {
                suffix += 1;
                name = format!("{}.{}", base, suffix);
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kind::ImageKind;
    use std::io::Write;
    use tempfile::TempDir;

    fn parse(text: &str) -> Result<Catalog> {
        load_from_reader(text.as_bytes(), Path::new("inline.csv"))
    }

    #[test]
    fn test_load_basic_csv() {
        let catalog = parse(
            "filename,original,protanope\n\
             a.png,ann-a,p-a\n\
             b.png,ann-b,p-b\n",
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let first = &catalog.records()[0];
        assert_eq!(first.filename(), "a.png");
        assert_eq!(first.annotation(ImageKind::Original), Some("ann-a"));
        assert_eq!(first.annotation(ImageKind::Protanope), Some("p-a"));
    }

    #[test]
    fn test_header_only_is_empty_catalog() {
        let catalog = parse("filename,original,protanope\n").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.schema().len(), 3);
    }

    #[test]
    fn test_quoted_fields_with_commas_and_newlines() {
        let catalog = parse(
            "filename,original\n\
             a.png,\"red, green\nand blue\"\n",
        )
        .unwrap();
        assert_eq!(
            catalog.records()[0].get("original"),
            Some("red, green\nand blue")
        );
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let catalog = parse("filename,original,protanope\na.png,,p-a\n").unwrap();
        let record = &catalog.records()[0];
        assert_eq!(record.get("original"), None);
        assert_eq!(record.get("protanope"), Some("p-a"));
    }

    #[test]
    fn test_missing_filename_column_is_malformed() {
        let err = parse("name,original\na.png,x\n").unwrap_err();
        assert!(matches!(err, CatalogError::SourceMalformed { .. }));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let err = parse("filename,original\na.png,x,extra\n").unwrap_err();
        assert!(matches!(err, CatalogError::SourceMalformed { .. }));
    }

    #[test]
    fn test_short_rows_pad_with_missing_values() {
        let catalog = parse(
            "filename,original,protanope\n\
             a.png,ann-a,p-a\n\
             b.png,ann-b\n",
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let short = &catalog.records()[1];
        assert_eq!(short.filename(), "b.png");
        assert_eq!(short.annotation(ImageKind::Original), Some("ann-b"));
        assert_eq!(short.annotation(ImageKind::Protanope), None);
        assert_eq!(short.iter().count(), 3);
    }

    #[test]
    fn test_blank_and_repeated_headers_are_renamed() {
        let catalog = parse(
            "filename,note,note,,note\n\
             a.png,n1,n2,blank,n3\n",
        )
        .unwrap();

        assert_eq!(
            catalog.schema().columns(),
            ["filename", "note", "note.1", "Unnamed: 3", "note.2"]
        );
        let record = &catalog.records()[0];
        assert_eq!(record.get("note"), Some("n1"));
        assert_eq!(record.get("note.1"), Some("n2"));
        assert_eq!(record.get("Unnamed: 3"), Some("blank"));
        assert_eq!(record.get("note.2"), Some("n3"));
    }

    #[test]
    fn test_renamed_header_skips_taken_names() {
        let catalog = parse("filename,x.1,x,x\na.png,1,2,3\n").unwrap();
        assert_eq!(
            catalog.schema().columns(),
            ["filename", "x.1", "x", "x.2"]
        );
    }

    #[test]
    fn test_empty_file_is_malformed() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, CatalogError::SourceMalformed { .. }));
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.csv");

        match load(&path) {
            Err(CatalogError::SourceNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("images.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "filename,original,protanope").unwrap();
        writeln!(file, "x.jpg,orig,prot").unwrap();
        drop(file);

        let catalog = load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].filename(), "x.jpg");
    }
}
