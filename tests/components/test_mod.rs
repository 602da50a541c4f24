//! Tests for components/mod.rs

use liftoff_notify::{LaunchEvent, NotificationError, TriggerHandle};

use super::{falcon_heavy, liftoff};

#[test]
fn test_trigger_handle_generation() {
    let a = TriggerHandle::generate();
    let b = TriggerHandle::generate();
    assert_ne!(a, b);

    let parsed: TriggerHandle = a.to_string().parse().unwrap();
    assert_eq!(a, parsed);
    assert!("not-a-uuid".parse::<TriggerHandle>().is_err());
}

#[test]
fn test_launch_event_deserializes_unix_date() -> anyhow::Result<()> {
    let event: LaunchEvent = serde_json::from_str(&format!(
        r#"{{
            "id": "fh-usaf-52",
            "name": "Falcon Heavy",
            "date_unix": {},
            "launchpad": {{ "locality": "Cape Canaveral", "region": "Florida" }},
            "vehicle": "Falcon Heavy",
            "flight_number": 187
        }}"#,
        liftoff().timestamp()
    ))?;

    assert_eq!(event, falcon_heavy());
    Ok(())
}

#[test]
fn test_error_display() {
    let err = NotificationError::validation("templates[0].lead", "Lead time must be greater than zero");
    assert_eq!(
        err.to_string(),
        "Validation error in templates[0].lead: Lead time must be greater than zero"
    );

    let err = NotificationError::ResourceExhausted {
        resource_type: "pending_triggers".to_string(),
        limit: 64,
    };
    assert_eq!(err.to_string(), "Resource exhausted: pending_triggers limit 64 reached");
}
