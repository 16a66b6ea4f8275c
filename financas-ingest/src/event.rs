//! Notification events as delivered by the OS-level capture service.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload emitted by the Android notification listener, one per posted
/// notification. Field names follow the emitter's camelCase wire format;
/// every field may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationEvent {
    pub package_name: String,
    pub app_name: String,
    pub title: String,
    pub body: String,
    /// Epoch milliseconds at capture time. The emitter sends this as a
    /// JSON double.
    pub timestamp: Option<f64>,
}

impl NotificationEvent {
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
    }
}

/// Parse one NDJSON line into an event.
pub fn parse_event_line(line: &str) -> Result<NotificationEvent> {
    serde_json::from_str(line.trim()).context("parse notification event")
}

/// Raw notification text handed to the classifier. Fields the capture
/// layer could not fill stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNotification {
    pub title: String,
    pub body: String,
    pub source_app_name: String,
    pub source_package_id: String,
}

impl RawNotification {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        source_app_name: impl Into<String>,
        source_package_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            source_app_name: source_app_name.into(),
            source_package_id: source_package_id.into(),
        }
    }
}

impl From<&NotificationEvent> for RawNotification {
    fn from(event: &NotificationEvent) -> Self {
        Self {
            title: event.title.clone(),
            body: event.body.clone(),
            source_app_name: event.app_name.clone(),
            source_package_id: event.package_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_line_camel_case() {
        let line = r#"{"packageName":"com.nu.production","appName":"Nubank","title":"Nubank","body":"Você recebeu um Pix de R$ 150,00","timestamp":1733158800000}"#;
        let event = parse_event_line(line).unwrap();
        assert_eq!(event.package_name, "com.nu.production");
        assert_eq!(event.app_name, "Nubank");
        assert_eq!(event.body, "Você recebeu um Pix de R$ 150,00");
        assert_eq!(event.occurred_at().unwrap().timestamp_millis(), 1733158800000);
    }

    #[test]
    fn test_parse_event_line_missing_fields_default_empty() {
        let event = parse_event_line(r#"{"title":"Nubank"}"#).unwrap();
        assert_eq!(event.title, "Nubank");
        assert_eq!(event.body, "");
        assert_eq!(event.package_name, "");
        assert!(event.timestamp.is_none());
        assert!(event.occurred_at().is_none());
    }

    #[test]
    fn test_parse_event_line_rejects_garbage() {
        assert!(parse_event_line("not json").is_err());
    }

    #[test]
    fn test_raw_notification_from_event() {
        let event = NotificationEvent {
            package_name: "br.com.bb.android".to_string(),
            app_name: "Banco do Brasil".to_string(),
            title: "Banco do Brasil".to_string(),
            body: "Transferência recebida".to_string(),
            timestamp: None,
        };
        let raw = RawNotification::from(&event);
        assert_eq!(raw.source_package_id, "br.com.bb.android");
        assert_eq!(raw.source_app_name, "Banco do Brasil");
        assert_eq!(raw.title, "Banco do Brasil");
    }
}
