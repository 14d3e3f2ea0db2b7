use crate::ids::ContentId;

/// Catalog entry details needed to open the watch view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentMetadata {
    pub id: ContentId,
    pub title: String,
    pub subtitle: Option<String>,
    pub stream_url: String,
    pub duration_seconds: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl ContentMetadata {
    /// Title line as shown in the player header.
    pub fn heading(&self) -> String {
        match self.subtitle.as_deref() {
            Some(subtitle) if !subtitle.is_empty() => {
                format!("{} - {}", self.title, subtitle)
            }
            _ => self.title.clone(),
        }
    }
}
