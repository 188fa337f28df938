use serde_json::Value;

use super::EverestError;
use crate::domain::MissionStatusEvent;
use crate::transport::{decode_mission_status_json, decode_mission_status_value};

impl MissionStatusEvent {
    /// Decode the body of a `mission_status` webhook call.
    pub fn from_json(json: &str) -> Result<Self, EverestError> {
        decode_mission_status_json(json).map_err(|err| EverestError::Webhook(Box::new(err)))
    }

    /// Decode a payload that was already parsed (e.g. by a web framework).
    pub fn from_value(value: Value) -> Result<Self, EverestError> {
        decode_mission_status_value(value).map_err(|err| EverestError::Webhook(Box::new(err)))
    }
}
