//! Tests for components/content.rs

use std::time::Duration;

use liftoff_notify::{NotificationError, OffsetTemplate, ReminderContent, default_offset_templates};

use super::falcon_heavy;

#[test]
fn test_default_templates_order_and_leads() {
    let leads: Vec<Duration> = default_offset_templates().iter().map(|t| t.lead).collect();
    assert_eq!(
        leads,
        vec![
            Duration::from_secs(24 * 3600),
            Duration::from_secs(3600),
            Duration::from_secs(600),
            Duration::from_secs(300),
        ]
    );
    assert!(default_offset_templates().iter().all(|t| t.validate().is_ok()));
}

#[test]
fn test_default_templates_render_launch_fields() {
    let event = falcon_heavy();
    let rendered: Vec<ReminderContent> = default_offset_templates()
        .iter()
        .map(|t| t.render(&event))
        .collect();

    assert_eq!(rendered[0].title, "Upcoming Launch");
    assert_eq!(
        rendered[0].body,
        "Falcon Heavy will attempt launch from Cape Canaveral - Florida in 24 hours"
    );
    assert_eq!(
        rendered[1].body,
        "Falcon Heavy will attempt launch from Cape Canaveral - Florida in 1 hour"
    );
    assert_eq!(rendered[2].title, "Falcon Heavy: T-Minus 10 minutes");
    assert_eq!(rendered[2].body, "Flight #187 ready for launch at Cape Canaveral");
    assert_eq!(rendered[3].title, "Falcon Heavy aboard Falcon Heavy");
    assert_eq!(rendered[3].body, "Liftoff in T-Minus 5 minutes");
}

#[test]
fn test_unknown_placeholder_left_verbatim_and_rejected() {
    let template = OffsetTemplate::new(Duration::from_secs(60), "{name} {payload}", "body");

    assert_eq!(template.render(&falcon_heavy()).title, "Falcon Heavy {payload}");

    match template.validate() {
        Err(NotificationError::ValidationError { field, message }) => {
            assert_eq!(field, "title");
            assert!(message.contains("{payload}"));
        },
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_template_validation() {
    assert!(OffsetTemplate::new(Duration::ZERO, "Title", "").validate().is_err());
    assert!(OffsetTemplate::new(Duration::from_secs(1), "  ", "").validate().is_err());
    assert!(
        OffsetTemplate::new(Duration::from_secs(1), "Go for {id}", "from {region}")
            .validate()
            .is_ok()
    );
}
