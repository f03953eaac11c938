use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Largest accepted `image` upload, in bytes. The transport cap and the
/// handler re-check both read this value.
pub const MAX_PAYLOAD_BYTES: usize = 1_000_000;

pub const IMAGE_FIELD: &str = "image";

pub const MSG_PREDICTED: &str = "Model is predicted successfully";
pub const MSG_MISSING_FILE: &str = "File image is required";
pub const MSG_PAYLOAD_TOO_LARGE: &str =
    "Payload content length greater than maximum allowed: 1000000";
pub const MSG_INVALID_MULTIPART: &str = "Invalid multipart payload format";
pub const MSG_CLASSIFICATION_FAILED: &str = "Failed to classify image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum Label {
    #[serde(rename = "Cancer")]
    #[strum(serialize = "Cancer")]
    Cancer,
    #[serde(rename = "Non-cancer")]
    #[strum(serialize = "Non-cancer")]
    NonCancer,
}

impl Label {
    pub fn suggestion(&self) -> &'static str {
        match self {
            Label::Cancer => "Segera periksa ke dokter!",
            Label::NonCancer => "Penyakit kanker tidak terdeteksi.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub id: Uuid,
    pub result: Label,
    pub suggestion: String,
    #[serde(with = "iso8601_millis")]
    pub created_at: DateTime<Utc>,
}

impl ClassificationResult {
    pub fn new(id: Uuid, label: Label, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            result: label,
            suggestion: label.suggestion().to_string(),
            created_at,
        }
    }
}

/// JSON body returned by `POST /predict` for every outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ClassificationResult>,
}

impl PredictResponse {
    pub fn success(result: ClassificationResult) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: MSG_PREDICTED.to_string(),
            data: Some(result),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

// Matches the `toISOString` layout clients already parse: millisecond precision, `Z` suffix.
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
