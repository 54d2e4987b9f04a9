use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Catalog identifier assigned by the remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of the search endpoint. `objectIDs` is `null` when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<ObjectId>>,
}

impl SearchResponse {
    pub fn into_ids(self) -> Vec<ObjectId> {
        self.object_ids.unwrap_or_default()
    }
}

// A field of the wrong JSON type reads as absent instead of failing the record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Metadata for one catalog item as returned by the object endpoint.
///
/// `None` means the field was absent, `null` or of an unexpected type;
/// `Some("")` is kept distinct.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    #[serde(rename = "objectID", default, deserialize_with = "lenient")]
    pub object_id: Option<ObjectId>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub artist_display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub culture: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub object_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dimensions: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub classification: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub primary_image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_public_domain: Option<bool>,
    #[serde(rename = "objectURL", default, deserialize_with = "lenient")]
    pub object_url: Option<String>,
}

impl ObjectRecord {
    /// Period text, falling back to the object date when the period is absent or empty.
    pub fn period_or_date(&self) -> Option<&str> {
        match self.period.as_deref() {
            Some(period) if !period.is_empty() => Some(period),
            _ => self.object_date.as_deref(),
        }
    }
}

pub const ROW_COLUMNS: [&str; 11] = [
    "objectID",
    "title",
    "artistDisplayName",
    "culture",
    "period",
    "medium",
    "dimensions",
    "classification",
    "primaryImage",
    "isPublicDomain",
    "objectURL",
];

pub const PERIOD_CLEAN_COLUMN: &str = "period_clean";
pub const YEAR_COLUMN: &str = "year";

/// One flattened dataset row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    #[serde(rename = "objectID")]
    pub object_id: ObjectId,
    pub title: Option<String>,
    #[serde(rename = "artistDisplayName")]
    pub artist_display_name: Option<String>,
    pub culture: Option<String>,
    pub period: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub classification: Option<String>,
    #[serde(rename = "primaryImage")]
    pub primary_image: Option<String>,
    #[serde(rename = "isPublicDomain")]
    pub is_public_domain: Option<bool>,
    #[serde(rename = "objectURL")]
    pub object_url: Option<String>,
}

impl Row {
    /// Projects a fetched record, keyed by the id that was requested.
    pub fn from_record(object_id: ObjectId, record: ObjectRecord) -> Self {
        let period = record.period_or_date().map(str::to_string);
        Self {
            object_id,
            title: record.title,
            artist_display_name: record.artist_display_name,
            culture: record.culture,
            period,
            medium: record.medium,
            dimensions: record.dimensions,
            classification: record.classification,
            primary_image: record.primary_image,
            is_public_domain: record.is_public_domain,
            object_url: record.object_url,
        }
    }
}
