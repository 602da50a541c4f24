//! Tests for components/config.rs

use std::time::Duration;

use liftoff_notify::{NotificationError, OffsetTemplate, ReminderConfig};

#[test]
fn test_default_config_is_valid() {
    let config = ReminderConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.templates.len(), 4);
    assert_eq!(config.countdown_tick, Duration::from_secs(1));
    assert!(config.permission_request.allow_alert);
}

#[test]
fn test_partial_json_falls_back_to_defaults() -> anyhow::Result<()> {
    let config: ReminderConfig = serde_json::from_str(
        r#"{
            "templates": [
                { "lead_secs": 7200, "title": "{name} in two hours", "body": "Pad {locality}" }
            ],
            "countdown_tick_ms": 250
        }"#,
    )?;

    assert_eq!(config.templates.len(), 1);
    assert_eq!(config.templates[0].lead, Duration::from_secs(7200));
    assert_eq!(config.countdown_tick, Duration::from_millis(250));
    assert!(config.permission_request.allow_sound);
    config.validate()?;
    Ok(())
}

#[test]
fn test_config_serializes_leads_as_seconds() -> anyhow::Result<()> {
    let json = serde_json::to_value(ReminderConfig::default())?;
    assert_eq!(json["templates"][0]["lead_secs"], 86_400);
    assert_eq!(json["countdown_tick_ms"], 1000);
    Ok(())
}

#[test]
fn test_invalid_template_reports_index() {
    let config = ReminderConfig::default().with_template(OffsetTemplate::new(
        Duration::from_secs(30),
        "Liftoff of {rocket}",
        "",
    ));

    match config.validate() {
        Err(NotificationError::ValidationError { field, .. }) => {
            assert_eq!(field, "templates[4].title");
        },
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_slow_countdown_tick_rejected() {
    let config = ReminderConfig::default().with_countdown_tick(Duration::from_secs(5));
    assert!(config.validate().is_err());

    let config = ReminderConfig::default().with_countdown_tick(Duration::from_millis(100));
    assert!(config.validate().is_ok());
}
