//! CSV reading and writing for record batches.
//!
//! The header is mapped by name: `URL` is required, `Last crawled` is
//! optional, and every unrecognized column is passed through unchanged.
//! Row identity and order are preserved between input and output.

use std::path::Path;

use crate::error::{LinkstatError, Result};
use crate::record::{Record, columns};

/// A parsed input file: the records plus the names of any passthrough
/// columns, in their original header order.
#[derive(Debug, Clone)]
pub struct RecordFile {
    pub records: Vec<Record>,
    pub extra_columns: Vec<String>,
}

/// Columns the tool itself owns; everything else is passthrough.
const KNOWN_COLUMNS: [&str; 5] = [
    columns::URL,
    columns::LAST_CRAWLED,
    columns::STATUS,
    columns::REDIRECT_TO,
    columns::NGINX_CONFIG,
];

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<RecordFile> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let url_index = headers
        .iter()
        .position(|name| name == columns::URL)
        .ok_or_else(|| LinkstatError::MissingColumn(columns::URL.to_string()))?;
    let last_crawled_index = headers
        .iter()
        .position(|name| name == columns::LAST_CRAWLED);

    let extra_indices: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !KNOWN_COLUMNS.contains(name))
        .map(|(index, _)| index)
        .collect();
    let extra_columns: Vec<String> = extra_indices
        .iter()
        .map(|&index| headers[index].to_string())
        .collect();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let raw = result?;
        let url = raw.get(url_index).unwrap_or("").trim();
        if url.is_empty() {
            return Err(LinkstatError::MalformedRecord(format!(
                "row {}: empty URL",
                row + 1
            )));
        }

        let mut record = Record::new(url);
        if let Some(index) = last_crawled_index {
            record.last_crawled = raw.get(index).unwrap_or("").to_string();
        }
        record.extra = extra_indices
            .iter()
            .map(|&index| raw.get(index).unwrap_or("").to_string())
            .collect();
        records.push(record);
    }

    Ok(RecordFile {
        records,
        extra_columns,
    })
}

/// Write the batch back out with a header row. The `nginx config` column
/// only appears in the domain-aware variant.
pub fn write_records<P: AsRef<Path>>(
    path: P,
    file: &RecordFile,
    include_nginx: bool,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![
        columns::URL,
        columns::LAST_CRAWLED,
        columns::STATUS,
        columns::REDIRECT_TO,
    ];
    if include_nginx {
        header.push(columns::NGINX_CONFIG);
    }
    let mut header: Vec<String> = header.into_iter().map(String::from).collect();
    header.extend(file.extra_columns.iter().cloned());
    writer.write_record(&header)?;

    for record in &file.records {
        let status = record
            .status
            .map(|status| status.to_string())
            .unwrap_or_default();
        let mut row = vec![
            record.url.clone(),
            record.last_crawled.clone(),
            status,
            record.redirect_to.clone().unwrap_or_default(),
        ];
        if include_nginx {
            row.push(record.nginx_config.clone().unwrap_or_default());
        }
        for index in 0..file.extra_columns.len() {
            row.push(record.extra.get(index).cloned().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::record::Status;
    use std::io::Write;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_read_records__maps_columns_by_name() -> TestResult {
        let file = temp_csv(
            "Last crawled,URL\n\
             2024-01-01,https://example.com/a\n\
             2024-01-02,https://example.com/b\n",
        );

        let parsed = read_records(file.path())?;

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].url, "https://example.com/a");
        assert_eq!(parsed.records[0].last_crawled, "2024-01-01");
        assert_eq!(parsed.records[1].url, "https://example.com/b");
        assert!(parsed.extra_columns.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_records__missing_url_column_is_fatal() {
        let file = temp_csv("Link,Last crawled\nhttps://example.com,2024-01-01\n");

        let result = read_records(file.path());

        assert!(matches!(result, Err(LinkstatError::MissingColumn(ref c)) if c == "URL"));
    }

    #[test]
    fn test_read_records__empty_url_cell_is_fatal() {
        let file = temp_csv("URL,Last crawled\nhttps://example.com/a,2024-01-01\n,2024-01-02\n");

        let result = read_records(file.path());

        assert!(matches!(result, Err(LinkstatError::MalformedRecord(_))));
    }

    #[test]
    fn test_read_records__unreadable_file_is_fatal() {
        let result = read_records("does-not-exist.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_read_records__keeps_extra_columns() -> TestResult {
        let file = temp_csv(
            "URL,Owner,Last crawled\n\
             https://example.com/a,alice,2024-01-01\n",
        );

        let parsed = read_records(file.path())?;

        assert_eq!(parsed.extra_columns, vec!["Owner".to_string()]);
        assert_eq!(parsed.records[0].extra, vec!["alice".to_string()]);
        Ok(())
    }

    #[test]
    fn test_write_records__plain_header_and_order() -> TestResult {
        let mut first = Record::new("https://example.com/a");
        first.last_crawled = "2024-01-01".to_string();
        first.status = Some(Status::Code(200));
        let mut second = Record::new("https://example.com/b");
        second.status = Some(Status::Code(302));
        second.redirect_to = Some("https://example.com/c".to_string());

        let batch = RecordFile {
            records: vec![first, second],
            extra_columns: Vec::new(),
        };
        let out = tempfile::NamedTempFile::new()?;
        write_records(out.path(), &batch, false)?;

        let written = std::fs::read_to_string(out.path())?;
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("URL,Last crawled,Status,Redirect to"));
        assert_eq!(
            lines.next(),
            Some("https://example.com/a,2024-01-01,200,")
        );
        assert_eq!(
            lines.next(),
            Some("https://example.com/b,,302,https://example.com/c")
        );
        Ok(())
    }

    #[test]
    fn test_write_records__variant_includes_nginx_column() -> TestResult {
        let mut record = Record::new("https://example.com/a");
        record.status = Some(Status::Code(404));
        record.nginx_config = Some("  /a /blog/a;".to_string());

        let batch = RecordFile {
            records: vec![record],
            extra_columns: Vec::new(),
        };
        let out = tempfile::NamedTempFile::new()?;
        write_records(out.path(), &batch, true)?;

        let written = std::fs::read_to_string(out.path())?;
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("URL,Last crawled,Status,Redirect to,nginx config")
        );
        assert_eq!(
            lines.next(),
            Some("https://example.com/a,,404,,  /a /blog/a;")
        );
        Ok(())
    }

    #[test]
    fn test_write_records__error_sentinel_serialized() -> TestResult {
        let mut record = Record::new("https://example.com/down");
        record.status = Some(Status::Error);

        let batch = RecordFile {
            records: vec![record],
            extra_columns: Vec::new(),
        };
        let out = tempfile::NamedTempFile::new()?;
        write_records(out.path(), &batch, false)?;

        let written = std::fs::read_to_string(out.path())?;
        assert!(written.contains("https://example.com/down,,Error,"));
        Ok(())
    }

    #[test]
    fn test_roundtrip__extras_pass_through_unchanged() -> TestResult {
        let input = temp_csv(
            "URL,Owner,Last crawled\n\
             https://example.com/a,alice,2024-01-01\n\
             https://example.com/b,bob,2024-01-02\n",
        );

        let mut parsed = read_records(input.path())?;
        for record in &mut parsed.records {
            record.status = Some(Status::Code(200));
        }

        let out = tempfile::NamedTempFile::new()?;
        write_records(out.path(), &parsed, false)?;
        let written = std::fs::read_to_string(out.path())?;

        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("URL,Last crawled,Status,Redirect to,Owner")
        );
        assert_eq!(
            lines.next(),
            Some("https://example.com/a,2024-01-01,200,,alice")
        );
        assert_eq!(
            lines.next(),
            Some("https://example.com/b,2024-01-02,200,,bob")
        );
        Ok(())
    }
}
