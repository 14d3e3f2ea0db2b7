//! Watch progress as exchanged with the progress service.
//!
//! The service owns the authoritative record. Clients only send snapshots of
//! the playhead and read the stored record back once when a title is opened.

use crate::ids::ContentId;

/// Progress payload written to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressRecord {
    pub content_id: ContentId,
    pub position_seconds: u64,
    pub duration_seconds: u64,
}

impl ProgressRecord {
    /// Build a record from fractional playhead values, flooring both.
    ///
    /// Negative or NaN inputs collapse to zero.
    pub fn from_playhead(
        content_id: ContentId,
        played_seconds: f64,
        duration_seconds: f64,
    ) -> Self {
        Self {
            content_id,
            position_seconds: whole_seconds(played_seconds),
            duration_seconds: whole_seconds(duration_seconds),
        }
    }
}

fn whole_seconds(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Stored progress as returned by the service when a title is opened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    pub position_seconds: f64,
    pub duration_seconds: f64,
    /// Percentage in `[0, 100]`.
    pub progress_percent: f64,
}

impl ProgressSnapshot {
    /// Fraction to resume from, or `None` when playback should start over.
    ///
    /// Titles at or beyond `ceiling_percent` count as finished.
    pub fn resume_fraction(&self, ceiling_percent: f64) -> Option<f64> {
        let percent = self.progress_percent;
        if !percent.is_finite() || percent <= 0.0 || percent >= ceiling_percent
        {
            return None;
        }
        Some((percent / 100.0).min(1.0))
    }
}
