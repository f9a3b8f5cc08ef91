//! Material records tracked by the catalog.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Catalog-assigned material identifier (positive, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(u64);

impl MaterialId {
    /// Wrap a raw id value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw integer value
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one, or `None` once the id space is used up
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MaterialId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let id: u64 = s
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid material ID: {}", s))?;
        if id == 0 {
            anyhow::bail!("Material IDs start at 1");
        }
        Ok(Self(id))
    }
}

impl From<u64> for MaterialId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single source talk in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Unique, monotonically assigned identifier
    pub id: MaterialId,

    /// Source URL (opaque, not validated)
    pub url: String,

    /// Human-readable title
    #[serde(default)]
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// When the record was added (local time)
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date_added: NaiveDateTime,

    /// Whether a study package has been generated
    #[serde(default)]
    pub processed: bool,

    /// Transcript used to generate the study package
    #[serde(default)]
    pub transcript_file: Option<String>,

    /// Generated study package
    #[serde(default)]
    pub learning_package_file: Option<String>,
}

impl MaterialRecord {
    /// Create an unprocessed record, defaulting an empty title to `TED Talk <id>`
    pub fn new(
        id: MaterialId,
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let title = if title.is_empty() {
            default_title(id)
        } else {
            title
        };

        Self {
            id,
            url: url.into(),
            title,
            description: description.into(),
            date_added: Local::now().naive_local(),
            processed: false,
            transcript_file: None,
            learning_package_file: None,
        }
    }

    /// Record the generated files and flag the material as processed
    pub fn mark_processed(
        &mut self,
        transcript_file: impl Into<String>,
        package_file: impl Into<String>,
    ) {
        self.processed = true;
        self.transcript_file = Some(transcript_file.into());
        self.learning_package_file = Some(package_file.into());
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// `query_lower` must already be lowercase.
    pub(crate) fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
    }

    /// Date portion of `date_added` (YYYY-MM-DD)
    pub fn date_added_day(&self) -> String {
        self.date_added.date().format("%Y-%m-%d").to_string()
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Naive values are taken as-is. Values carrying an offset (`+08:00`, `Z`)
/// keep their wall-clock time and drop the offset.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_timestamp(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO-8601 timestamp: {}", value)))
}

/// Title used when a record is added without one
pub fn default_title(id: MaterialId) -> String {
    format!("TED Talk {}", id)
}
