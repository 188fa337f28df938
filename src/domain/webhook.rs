use serde_json::Value;

use crate::domain::value::UnixTimestamp;

/// Status value the platform reports once a mission is done.
pub const MISSION_STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, PartialEq)]
/// `mission_status` webhook payload posted by the Everest platform.
///
/// Ids arrive either as JSON numbers or strings and are kept as strings.
/// Dates are Unix timestamps (platform timezone is Europe/Paris).
pub struct MissionStatusEvent {
    pub event: String,
    /// Mission reference (`ref` on the wire).
    pub reference: String,
    /// Mission type (`type` on the wire).
    pub mission_type: String,
    pub start_date: UnixTimestamp,
    pub status: String,
    pub client_id: String,
    pub service_id: String,
    /// When the status change happened.
    pub date: UnixTimestamp,
    pub agent_id: String,
    pub agent_name: String,
    pub start_date_max: Option<UnixTimestamp>,
    pub status_slug: Option<String>,
    pub client_ref: Option<String>,
    /// Media attached to the status change (photos, signatures), as sent:
    /// usually URL strings, sometimes objects.
    pub medias: Vec<Value>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub extras: Option<Value>,
    pub extras_fields: Vec<Value>,
}

impl MissionStatusEvent {
    pub fn is_completed(&self) -> bool {
        self.status == MISSION_STATUS_COMPLETED
    }

    /// GPS position of the agent, when the platform sent both coordinates.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}
