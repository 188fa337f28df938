//! Domain layer: strong types with validation and invariants (no I/O).

mod response;
mod validation;
mod value;
mod webhook;

pub use response::{ApiResponse, Headers, StructuredResponse, try_parse};
pub use validation::ValidationError;
pub use value::{BaseUrl, ClientId, ClientSecret, UnixTimestamp};
pub use webhook::{MISSION_STATUS_COMPLETED, MissionStatusEvent};

#[cfg(test)]
mod tests {
    use super::*;

    fn event(status: &str, lat: Option<f64>, lon: Option<f64>) -> MissionStatusEvent {
        MissionStatusEvent {
            event: "mission_status".to_owned(),
            reference: "M-1".to_owned(),
            mission_type: "delivery".to_owned(),
            start_date: UnixTimestamp::new(1_760_000_000),
            status: status.to_owned(),
            client_id: "7".to_owned(),
            service_id: "2".to_owned(),
            date: UnixTimestamp::new(1_760_003_600),
            agent_id: "11".to_owned(),
            agent_name: "Jane".to_owned(),
            start_date_max: None,
            status_slug: None,
            client_ref: None,
            medias: Vec::new(),
            lat,
            lon,
            extras: None,
            extras_fields: Vec::new(),
        }
    }

    #[test]
    fn mission_event_completion_flag() {
        assert!(event(MISSION_STATUS_COMPLETED, None, None).is_completed());
        assert!(!event("in_progress", None, None).is_completed());
    }

    #[test]
    fn mission_event_coordinates_need_both_axes() {
        assert_eq!(
            event("completed", Some(48.88), Some(2.32)).coordinates(),
            Some((48.88, 2.32))
        );
        assert_eq!(event("completed", Some(48.88), None).coordinates(), None);
        assert_eq!(event("completed", None, None).coordinates(), None);
    }
}
