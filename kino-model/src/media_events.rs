/// Notifications emitted by a media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Media header parsed; `duration_seconds` may still be zero for live
    /// or broken sources.
    MetadataLoaded { duration_seconds: f64 },
    /// Periodic playhead report.
    Progress {
        played_fraction: f64,
        played_seconds: f64,
        buffered_fraction: f64,
    },
    BufferingStarted,
    BufferingEnded,
    /// Natural end of stream.
    Ended,
    /// The source could not be fetched or decoded.
    LoadFailed { reason: String },
}

impl MediaEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MediaEvent::MetadataLoaded { .. } => "Media::MetadataLoaded",
            MediaEvent::Progress { .. } => "Media::Progress",
            MediaEvent::BufferingStarted => "Media::BufferingStarted",
            MediaEvent::BufferingEnded => "Media::BufferingEnded",
            MediaEvent::Ended => "Media::Ended",
            MediaEvent::LoadFailed { .. } => "Media::LoadFailed",
        }
    }
}
