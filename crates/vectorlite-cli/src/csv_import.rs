//! CSV ingestion for the `import` command. Column auto-detection: numeric
//! columns become vector components, everything else becomes metadata.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use csv::ReaderBuilder;

pub struct CsvRecord {
    pub vector: Vec<f64>,
    pub metadata: HashMap<String, String>,
}

/// Reads every record from `path`, skipping a leading header row if one is
/// detected (a row where at least one cell fails to parse as a number).
/// Rows that yield no numeric component are skipped with a warning message
/// returned alongside the parsed records rather than aborting the import.
pub fn read_csv(path: &Path) -> Result<(Vec<CsvRecord>, Vec<String>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    if rows.is_empty() {
        return Err(anyhow!("CSV file is empty"));
    }

    let start_row = if row_looks_like_header(&rows[0]) { 1 } else { 0 };

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for (offset, row) in rows[start_row..].iter().enumerate() {
        match parse_record(row) {
            Ok(record) => records.push(record),
            Err(err) => warnings.push(format!("row {}: {err}", start_row + offset + 1)),
        }
    }

    if records.is_empty() {
        return Err(anyhow!("no valid vectors found in CSV"));
    }

    Ok((records, warnings))
}

fn row_looks_like_header(row: &csv::StringRecord) -> bool {
    row.iter().any(|cell| cell.trim().parse::<f64>().is_err())
}

fn parse_record(row: &csv::StringRecord) -> Result<CsvRecord> {
    let mut vector = Vec::new();
    let mut metadata = HashMap::new();

    for (column, cell) in row.iter().enumerate() {
        let cell = cell.trim();
        if let Ok(value) = cell.parse::<f64>() {
            vector.push(value);
        } else if let Some((key, value)) = cell.split_once('=') {
            metadata.insert(key.trim().to_string(), value.trim().to_string());
        } else {
            metadata.insert(format!("col_{column}"), cell.to_string());
        }
    }

    if vector.is_empty() {
        return Err(anyhow!("no numeric values found for vector"));
    }

    if metadata.is_empty() {
        metadata.insert("imported".to_string(), "true".to_string());
        metadata.insert("source".to_string(), "csv".to_string());
    }

    Ok(CsvRecord { vector, metadata })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn detects_and_skips_header_row() {
        let file = write_csv("x,y,label\n1.0,2.0,a\n3.0,4.0,b\n");
        let (records, warnings) = read_csv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(warnings.is_empty());
        assert_eq!(records[0].vector, vec![1.0, 2.0]);
        assert_eq!(records[0].metadata.get("col_2"), Some(&"a".to_string()));
    }

    #[test]
    fn parses_key_value_metadata_cells() {
        let file = write_csv("1.0,2.0,name=widget\n");
        let (records, _) = read_csv(file.path()).unwrap();
        assert_eq!(records[0].metadata.get("name"), Some(&"widget".to_string()));
    }

    #[test]
    fn defaults_metadata_when_all_columns_numeric() {
        let file = write_csv("1.0,2.0,3.0\n");
        let (records, _) = read_csv(file.path()).unwrap();
        assert_eq!(records[0].metadata.get("imported"), Some(&"true".to_string()));
    }

    #[test]
    fn skips_rows_with_no_numeric_column_and_warns() {
        let file = write_csv("1.0,2.0\nfoo,bar\n3.0,4.0\n");
        let (records, warnings) = read_csv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = write_csv("");
        assert!(read_csv(file.path()).is_err());
    }
}
