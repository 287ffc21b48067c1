//! CSV ingestion: bytes → UTF-8 text → `name,designation` rows → one batch
//! insert.
//!
//! Rows are read without a header. A row needs at least two fields; field 0 is
//! the name, field 1 the designation and anything after is ignored. Rows that
//! are short, unreadable or fail participant validation are dropped and only
//! counted.

use raffle_storage::{
    dto::participant::CreateParticipantRequest, error::StorageError,
    repository::ParticipantStore,
};
use thiserror::Error;
use validator::Validate;

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file provided.")]
    MissingFile,

    #[error("Uploaded file is not valid UTF-8 text.")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("No valid data found in CSV.")]
    NoValidRows,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of parsing, before anything touches the store
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    pub participants: Vec<CreateParticipantRequest>,
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub accepted: usize,
    pub rejected: usize,
}

pub fn decode_upload(bytes: &[u8]) -> Result<&str, UploadError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text))
}

pub fn parse_participants(text: &str) -> ParsedCsv {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedCsv::default();

    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(row, error = %e, "Dropping unreadable CSV row");
                parsed.rejected += 1;
                continue;
            }
        };

        if record.len() < 2 {
            tracing::debug!(
                row,
                fields = record.len(),
                "Dropping CSV row with fewer than two fields"
            );
            parsed.rejected += 1;
            continue;
        }

        let designation = Some(&record[1])
            .filter(|d| !d.is_empty())
            .map(String::from);
        let candidate = CreateParticipantRequest::new(&record[0], designation);

        match candidate.validate() {
            Ok(()) => parsed.participants.push(candidate),
            Err(e) => {
                tracing::debug!(row, error = %e, "Dropping invalid CSV row");
                parsed.rejected += 1;
            }
        }
    }

    parsed
}

/// Decode, parse and store an uploaded CSV file
pub async fn ingest_csv(
    store: &dyn ParticipantStore,
    bytes: &[u8],
) -> Result<UploadSummary, UploadError> {
    let text = decode_upload(bytes)?;
    let parsed = parse_participants(text);

    if parsed.participants.is_empty() {
        tracing::info!(rejected = parsed.rejected, "CSV upload contained no valid rows");
        return Err(UploadError::NoValidRows);
    }

    store.insert_many(&parsed.participants).await?;

    let summary = UploadSummary {
        accepted: parsed.participants.len(),
        rejected: parsed.rejected,
    };
    tracing::info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        "Participants imported from CSV"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raffle_storage::repository::MemoryStore;

    fn names(parsed: &ParsedCsv) -> Vec<(&str, Option<&str>)> {
        parsed
            .participants
            .iter()
            .map(|p| (p.name.as_str(), p.designation.as_deref()))
            .collect()
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let parsed = parse_participants("Alice,HR\nBob\nCarol,Eng");

        assert_eq!(names(&parsed), [("Alice", Some("HR")), ("Carol", Some("Eng"))]);
        assert_eq!(parsed.rejected, 1);
    }

    #[test]
    fn test_first_row_is_data_not_header() {
        let parsed = parse_participants("name,designation\nAlice,HR\n");
        assert_eq!(
            names(&parsed),
            [("name", Some("designation")), ("Alice", Some("HR"))]
        );
    }

    #[test]
    fn test_extra_fields_ignored_and_quotes_honored() {
        let parsed = parse_participants("\"Smith, Jane\",Finance,extra\r\nBob,Ops,1,2\r\n");
        assert_eq!(
            names(&parsed),
            [("Smith, Jane", Some("Finance")), ("Bob", Some("Ops"))]
        );
        assert_eq!(parsed.rejected, 0);
    }

    #[test]
    fn test_empty_designation_is_none() {
        let parsed = parse_participants("Alice,\n");
        assert_eq!(names(&parsed), [("Alice", None)]);
    }

    #[test]
    fn test_invalid_rows_are_counted() {
        let long_name = "x".repeat(256);
        let parsed = parse_participants(&format!(",HR\n{long_name},Eng\nonlyonecolumn\nDan,Ops"));

        assert_eq!(names(&parsed), [("Dan", Some("Ops"))]);
        assert_eq!(parsed.rejected, 3);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_participants(""), ParsedCsv::default());
        assert_eq!(parse_participants("\n\n").participants.len(), 0);
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_upload(b"\xef\xbb\xbfAlice,HR").unwrap(), "Alice,HR");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(matches!(
            decode_upload(b"Alice,\xff\xfe"),
            Err(UploadError::InvalidEncoding(_))
        ));
    }

    #[tokio::test]
    async fn test_ingest_stores_valid_rows() {
        let store = MemoryStore::new();

        let summary = ingest_csv(&store, b"Alice,HR\nBob\nCarol,Eng").await.unwrap();

        assert_eq!(
            summary,
            UploadSummary {
                accepted: 2,
                rejected: 1
            }
        );
        let stored = ParticipantStore::list(&store).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].name, "Alice");
        assert_eq!(stored[1].designation.as_deref(), Some("Eng"));
    }

    #[tokio::test]
    async fn test_ingest_without_valid_rows_leaves_store_untouched() {
        let store = MemoryStore::new();

        for body in [&b""[..], &b"onlyonecolumn\n"[..]] {
            let error = ingest_csv(&store, body).await.unwrap_err();
            assert!(matches!(error, UploadError::NoValidRows));
        }

        let error = ingest_csv(&store, b"\xff,\xfe").await.unwrap_err();
        assert!(matches!(error, UploadError::InvalidEncoding(_)));

        assert_eq!(ParticipantStore::count(&store).await.unwrap(), 0);
    }
}
