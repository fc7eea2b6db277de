use crate::error::{ApiError, ApiResult};
use crate::models::water_test::{NewWaterTest, Quality, WaterTestPatch};
use crate::time::parse_timestamp;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "waterbodyName, dateTime, location, photoUrl, notes and quality are required";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWaterTestRequest {
    pub waterbody_name: Option<String>,
    pub waterbody_id: Option<Value>,
    pub date_time: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub quality: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWaterTestRequest {
    pub waterbody_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub waterbody_id: Option<Value>,
    pub date_time: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub quality: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(Value::Null)`) from an absent key
/// (`None`, via `#[serde(default)]`).
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// Coordinates are only taken from JSON numbers; `"12.9"` is not a latitude.
fn coordinate(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

fn reference(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_quality(raw: &str) -> ApiResult<Quality> {
    raw.parse()
        .map_err(|_| ApiError::Validation("invalid quality".to_string()))
}

fn parse_date_time(raw: &str) -> ApiResult<chrono::DateTime<chrono::Utc>> {
    parse_timestamp(raw).ok_or_else(|| ApiError::Validation("invalid dateTime".to_string()))
}

impl CreateWaterTestRequest {
    pub fn validate(self, asha_id: Uuid) -> ApiResult<NewWaterTest> {
        let (
            Some(waterbody_name),
            Some(date_time),
            Some(location),
            Some(photo_url),
            Some(notes),
            Some(quality),
        ) = (
            non_empty(self.waterbody_name),
            non_empty(self.date_time),
            non_empty(self.location),
            non_empty(self.photo_url),
            non_empty(self.notes),
            non_empty(self.quality),
        )
        else {
            return Err(ApiError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        };

        let quality = parse_quality(&quality)?;
        let date_time = parse_date_time(&date_time)?;

        Ok(NewWaterTest {
            waterbody_name,
            waterbody_id: self.waterbody_id.as_ref().and_then(reference),
            date_time,
            location,
            latitude: coordinate(self.latitude.as_ref()),
            longitude: coordinate(self.longitude.as_ref()),
            photo_url,
            notes,
            quality,
            asha_id,
        })
    }
}

impl UpdateWaterTestRequest {
    pub fn into_patch(self) -> ApiResult<WaterTestPatch> {
        let quality = non_empty(self.quality)
            .map(|q| parse_quality(&q))
            .transpose()?;
        let date_time = non_empty(self.date_time)
            .map(|t| parse_date_time(&t))
            .transpose()?;

        Ok(WaterTestPatch {
            waterbody_name: non_empty(self.waterbody_name),
            waterbody_id: self.waterbody_id.as_ref().map(reference),
            date_time,
            location: non_empty(self.location),
            latitude: coordinate(self.latitude.as_ref()),
            longitude: coordinate(self.longitude.as_ref()),
            photo_url: non_empty(self.photo_url),
            notes: non_empty(self.notes),
            quality,
        })
    }
}
