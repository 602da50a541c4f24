// Reminder engine configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::countdown::MAX_TICK_PERIOD;
use super::{
    NotificationError, NotificationResult, OffsetTemplate, PermissionRequestOptions,
    default_offset_templates, serde_time,
};

/// Tunables for scheduling and the countdown display.
///
/// Missing fields fall back to [`ReminderConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Ordered reminder set, decreasing lead time
    pub templates: Vec<OffsetTemplate>,
    /// Capabilities requested when prompting for permission
    pub permission_request: PermissionRequestOptions,
    /// Countdown re-evaluation period
    #[serde(rename = "countdown_tick_ms", with = "serde_time::duration_millis")]
    pub countdown_tick: Duration,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            templates: default_offset_templates(),
            permission_request: PermissionRequestOptions::default(),
            countdown_tick: Duration::from_secs(1),
        }
    }
}

impl ReminderConfig {
    pub fn with_templates(mut self, templates: Vec<OffsetTemplate>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_template(mut self, template: OffsetTemplate) -> Self {
        self.templates.push(template);
        self
    }

    pub fn with_permission_request(mut self, options: PermissionRequestOptions) -> Self {
        self.permission_request = options;
        self
    }

    pub fn with_countdown_tick(mut self, tick: Duration) -> Self {
        self.countdown_tick = tick;
        self
    }

    pub fn validate(&self) -> NotificationResult<()> {
        for (index, template) in self.templates.iter().enumerate() {
            template.validate().map_err(|e| match e {
                NotificationError::ValidationError { field, message } => {
                    NotificationError::validation(format!("templates[{}].{}", index, field), message)
                },
                other => other,
            })?;
        }

        if self.countdown_tick.is_zero() || self.countdown_tick > MAX_TICK_PERIOD {
            return Err(NotificationError::validation(
                "countdown_tick",
                format!("Tick period must be non-zero and at most {:?}", MAX_TICK_PERIOD),
            ));
        }

        Ok(())
    }
}
