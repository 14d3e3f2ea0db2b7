/// Direction of a relative skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkipDirection {
    Forward,
    Backward,
}

impl SkipDirection {
    /// Positive deltas skip forward; zero and negative deltas backward.
    pub fn from_delta(delta_seconds: f64) -> Self {
        if delta_seconds > 0.0 {
            SkipDirection::Forward
        } else {
            SkipDirection::Backward
        }
    }
}

/// Transient on-screen flash raised by a skip.
///
/// Each skip gets its own indicator; rapid skips overlap instead of being
/// coalesced. `id` is unique within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipIndicator {
    pub id: u64,
    pub direction: SkipDirection,
}
