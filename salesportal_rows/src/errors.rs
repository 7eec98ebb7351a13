//! Error types for row loading and page collection.

/// Errors that can occur while reading rows or walking pages.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A page query asked for a non-positive page size.
    #[error("page size must be positive, got {0}")]
    InvalidPageSize(i64),
    /// A page number past the last page was requested.
    #[error("page {page} is beyond the last page ({total_pages})")]
    PageOutOfRange { page: i64, total_pages: i64 },
    /// A page before the last one came back without rows.
    #[error("page {page} came back empty before the last page ({total_pages})")]
    EmptyPage { page: i64, total_pages: i64 },
    /// The pages collected did not add up to the advertised item count.
    #[error("expected {expected} rows across all pages, received {received}")]
    IncompletePages { expected: i64, received: i64 },
    /// Row JSON did not match the expected schema.
    #[error("failed to parse rows: {0}")]
    Parse(#[from] serde_json::Error),
    /// A snapshot file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
