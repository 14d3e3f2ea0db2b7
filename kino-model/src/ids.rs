use crate::error::ModelError;

/// Identifier of a catalog entry as issued by the backend.
///
/// The backend hands out opaque strings (numeric ids for legacy rows, UUIDs
/// for everything imported later), so no format is assumed beyond being
/// non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ContentId(String);

impl ContentId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ModelError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidContentId(raw));
        }
        Ok(ContentId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ContentId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentId::new(s)
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
