//! Listing parameters for `GET /api/list`.

use crate::error::CoreError;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Largest page size a caller may request; larger values are clamped.
pub const MAX_LIST_LIMIT: i64 = 100;

/// A validated listing request, ready to hand to a job store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListQuery {
    /// Exact status to filter on. `None` lists every job.
    pub status: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for JobListQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl JobListQuery {
    /// Build a query from the raw query-string values.
    ///
    /// Empty strings are treated as absent. `status` is kept verbatim for
    /// an exact match, surrounding whitespace included. Non-numeric or negative
    /// `offset`/`limit` values are rejected with `InvalidRequest`.
    pub fn from_params(
        status: Option<&str>,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, CoreError> {
        let offset = parse_non_negative(offset, 0, "Invalid offset")?;
        let limit = parse_non_negative(limit, DEFAULT_LIST_LIMIT, "Invalid limit")?;

        Ok(Self {
            status: status.filter(|s| !s.is_empty()).map(str::to_string),
            limit: limit.min(MAX_LIST_LIMIT),
            offset,
        })
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

fn parse_non_negative(
    raw: Option<&str>,
    default: i64,
    message: &'static str,
) -> Result<i64, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => match s.parse::<i64>() {
            Ok(n) if n >= 0 => Ok(n),
            _ => Err(CoreError::InvalidRequest(message.to_string())),
        },
    }
}
