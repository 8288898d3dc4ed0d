//! Batch windowing over a cleaned value sequence

use crate::error::{ScrubError, ScrubResult};

/// One window of cleaned values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 1-based batch number, derived from the offset before advancing
    pub number: usize,
    /// Offset of the first value in the window
    pub offset: usize,
    pub values: Vec<String>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse a user-supplied row limit. Missing, non-numeric, zero and
/// negative values are rejected.
pub fn parse_row_limit(input: &str) -> ScrubResult<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScrubError::InvalidRowLimit("missing value".to_string()));
    }
    let limit: i64 = trimmed
        .parse()
        .map_err(|_| ScrubError::InvalidRowLimit(format!("'{}' is not a number", trimmed)))?;
    validate_row_limit(limit)
}

pub fn validate_row_limit(limit: i64) -> ScrubResult<usize> {
    if limit <= 0 {
        return Err(ScrubError::InvalidRowLimit(format!(
            "{} (must be a positive number)",
            limit
        )));
    }
    Ok(limit as usize)
}

/// Offset and limit for walking a sequence window by window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCursor {
    offset: usize,
    limit: usize,
}

impl BatchCursor {
    pub fn new(limit: usize) -> ScrubResult<Self> {
        if limit == 0 {
            return Err(ScrubError::InvalidRowLimit(
                "0 (must be a positive number)".to_string(),
            ));
        }
        Ok(Self { offset: 0, limit })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Take the window `[offset, offset + limit)` clipped to the sequence.
    ///
    /// The offset advances by the full limit even when the final window is
    /// short. Once the offset reaches the end, `NoMoreRows` is returned.
    pub fn next_batch(&mut self, values: &[String], column: &str) -> ScrubResult<Batch> {
        if self.offset >= values.len() {
            return Err(ScrubError::NoMoreRows {
                column: column.to_string(),
            });
        }

        let end = (self.offset + self.limit).min(values.len());
        let batch = Batch {
            number: self.offset / self.limit + 1,
            offset: self.offset,
            values: values[self.offset..end].to_vec(),
        };
        self.offset += self.limit;
        Ok(batch)
    }
}
