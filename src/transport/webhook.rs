use serde::Deserialize;
use serde_json::Value;

use crate::domain::{MissionStatusEvent, UnixTimestamp};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("invalid coordinate in {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// Scalar the platform sends either as a JSON number or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportScalar {
    Int(u64),
    Float(f64),
    String(String),
}

impl TransportScalar {
    fn into_id(self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(value) => value,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::String(value) if value.trim().is_empty())
    }

    fn into_timestamp(self, field: &'static str) -> Result<UnixTimestamp, TransportError> {
        match self {
            Self::Int(value) => Ok(UnixTimestamp::new(value)),
            Self::Float(value) if value.is_finite() && value >= 0.0 => {
                Ok(UnixTimestamp::new(value.trunc() as u64))
            }
            Self::Float(value) => Err(TransportError::InvalidTimestamp {
                field,
                value: value.to_string(),
            }),
            Self::String(value) => value
                .trim()
                .parse::<u64>()
                .map(UnixTimestamp::new)
                .map_err(|_| TransportError::InvalidTimestamp { field, value }),
        }
    }

    fn into_coordinate(self, field: &'static str) -> Result<f64, TransportError> {
        match self {
            Self::Int(value) => Ok(value as f64),
            Self::Float(value) => Ok(value),
            Self::String(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| TransportError::InvalidCoordinate { field, value }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MissionStatusJsonEvent {
    event: String,
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "type")]
    mission_type: String,
    start_date: TransportScalar,
    status: String,
    client_id: TransportScalar,
    service_id: TransportScalar,
    date: TransportScalar,
    agent_id: TransportScalar,
    agent_name: String,
    #[serde(default)]
    start_date_max: Option<TransportScalar>,
    #[serde(default)]
    status_slug: Option<String>,
    #[serde(default)]
    client_ref: Option<String>,
    #[serde(default)]
    medias: Option<Vec<Value>>,
    #[serde(default)]
    lat: Option<TransportScalar>,
    #[serde(default)]
    lon: Option<TransportScalar>,
    #[serde(default)]
    extras: Option<Value>,
    #[serde(default)]
    extras_fields: Option<Vec<Value>>,
}

pub fn decode_mission_status_json(json: &str) -> Result<MissionStatusEvent, TransportError> {
    let parsed: MissionStatusJsonEvent = serde_json::from_str(json)?;
    into_event(parsed)
}

pub fn decode_mission_status_value(value: Value) -> Result<MissionStatusEvent, TransportError> {
    let parsed: MissionStatusJsonEvent = serde_json::from_value(value)?;
    into_event(parsed)
}

fn into_event(parsed: MissionStatusJsonEvent) -> Result<MissionStatusEvent, TransportError> {
    Ok(MissionStatusEvent {
        event: parsed.event,
        reference: parsed.reference,
        mission_type: parsed.mission_type,
        start_date: parsed.start_date.into_timestamp("start_date")?,
        status: parsed.status,
        client_id: parsed.client_id.into_id(),
        service_id: parsed.service_id.into_id(),
        date: parsed.date.into_timestamp("date")?,
        agent_id: parsed.agent_id.into_id(),
        agent_name: parsed.agent_name,
        start_date_max: optional(parsed.start_date_max)
            .map(|value| value.into_timestamp("start_date_max"))
            .transpose()?,
        status_slug: parsed.status_slug,
        client_ref: parsed.client_ref,
        medias: parsed.medias.unwrap_or_default(),
        lat: optional(parsed.lat)
            .map(|value| value.into_coordinate("lat"))
            .transpose()?,
        lon: optional(parsed.lon)
            .map(|value| value.into_coordinate("lon"))
            .transpose()?,
        extras: parsed.extras,
        extras_fields: parsed.extras_fields.unwrap_or_default(),
    })
}

// Empty strings stand for "not set" in optional scalars.
fn optional(value: Option<TransportScalar>) -> Option<TransportScalar> {
    value.filter(|value| !value.is_blank())
}
