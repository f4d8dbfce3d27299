//! Server-push event payloads.

use serde::{Deserialize, Serialize};

/// One event from the real-time stream.
///
/// Unknown `type` values decode to [`RealtimeEvent::Unknown`] instead of
/// failing, so a newer backend cannot break the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealtimeEvent {
    Notification,
    ChallengeUpdate,
    SubmissionStatus {
        #[serde(default)]
        message: String,
        #[serde(default)]
        status: String,
    },
    #[serde(other)]
    Unknown,
}

impl RealtimeEvent {
    /// Decodes the JSON body of an event.
    pub fn parse(data: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_events() {
        assert_eq!(
            RealtimeEvent::parse(r#"{"type":"notification"}"#).unwrap(),
            RealtimeEvent::Notification
        );
        assert_eq!(
            RealtimeEvent::parse(r#"{"type":"submission_status","message":"Weather App approved","status":"approved"}"#)
                .unwrap(),
            RealtimeEvent::SubmissionStatus {
                message: "Weather App approved".to_string(),
                status: "approved".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_unknown_event() {
        assert_eq!(
            RealtimeEvent::parse(r#"{"type":"leaderboard"}"#).unwrap(),
            RealtimeEvent::Unknown
        );
        assert!(RealtimeEvent::parse("not json").is_err());
    }
}
