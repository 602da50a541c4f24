// Reminder content and the declarative offset templates it is rendered from
// Templates reference launch fields through `{placeholder}` markers

use std::sync::LazyLock;
use std::time::Duration;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::{LaunchEvent, NotificationError, NotificationResult, serde_time};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is a valid regex")
});

/// Placeholders a template may reference
pub const PLACEHOLDERS: &[&str] = &["id", "name", "vehicle", "flight_number", "locality", "region"];

/// Rendered notification text handed to the notification service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
}

impl ReminderContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A reminder fired a fixed lead time before the launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetTemplate {
    /// Time before liftoff at which the reminder fires
    #[serde(rename = "lead_secs", with = "serde_time::duration_secs")]
    pub lead: Duration,
    pub title: String,
    pub body: String,
}

impl OffsetTemplate {
    pub fn new(lead: Duration, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            lead,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Render title and body against the event's fields.
    ///
    /// Unknown placeholders are left verbatim; [`OffsetTemplate::validate`]
    /// rejects them up front.
    pub fn render(&self, event: &LaunchEvent) -> ReminderContent {
        ReminderContent {
            title: render_text(&self.title, event),
            body: render_text(&self.body, event),
        }
    }

    pub fn validate(&self) -> NotificationResult<()> {
        if self.lead.is_zero() {
            return Err(NotificationError::validation(
                "lead",
                "Lead time must be greater than zero",
            ));
        }

        if self.title.trim().is_empty() {
            return Err(NotificationError::validation("title", "Title cannot be empty"));
        }

        for (field, text) in [("title", &self.title), ("body", &self.body)] {
            if let Some(unknown) = PLACEHOLDER
                .captures_iter(text)
                .map(|caps| caps[1].to_string())
                .find(|key| !PLACEHOLDERS.contains(&key.as_str()))
            {
                return Err(NotificationError::validation(
                    field,
                    format!("Unknown placeholder {{{}}}", unknown),
                ));
            }
        }

        Ok(())
    }
}

fn field_value(event: &LaunchEvent, key: &str) -> Option<String> {
    let value = match key {
        "id" => event.id.clone(),
        "name" => event.name.clone(),
        "vehicle" => event.vehicle.clone(),
        "flight_number" => event.flight_number.to_string(),
        "locality" => event.launchpad.locality.clone(),
        "region" => event.launchpad.region.clone(),
        _ => return None,
    };
    Some(value)
}

fn render_text(template: &str, event: &LaunchEvent) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            field_value(event, &caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// The stock reminder set: 24 hours, 1 hour, 10 minutes and 5 minutes before
/// liftoff, ordered by decreasing lead time.
pub fn default_offset_templates() -> Vec<OffsetTemplate> {
    vec![
        OffsetTemplate::new(
            Duration::from_secs(24 * 60 * 60),
            "Upcoming Launch",
            "{name} will attempt launch from {locality} - {region} in 24 hours",
        ),
        OffsetTemplate::new(
            Duration::from_secs(60 * 60),
            "Upcoming Launch",
            "{name} will attempt launch from {locality} - {region} in 1 hour",
        ),
        OffsetTemplate::new(
            Duration::from_secs(10 * 60),
            "{name}: T-Minus 10 minutes",
            "Flight #{flight_number} ready for launch at {locality}",
        ),
        OffsetTemplate::new(
            Duration::from_secs(5 * 60),
            "{name} aboard {vehicle}",
            "Liftoff in T-Minus 5 minutes",
        ),
    ]
}
