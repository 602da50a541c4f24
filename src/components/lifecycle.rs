// Active reminder plan and its state
// A plan only ever moves Empty -> Pending(n) -> Empty; firing is not observed

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ReminderContent, TriggerHandle, serde_time};

/// Coarse state of the active plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanState {
    Empty,
    Pending { triggers: usize },
}

/// A trigger accepted by the notification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTrigger {
    pub handle: TriggerHandle,
    pub fire_at: DateTime<Utc>,
    #[serde(rename = "lead_secs", with = "serde_time::duration_secs")]
    pub lead: Duration,
    pub content: ReminderContent,
}

/// Reminders currently registered for one launch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPlan {
    /// Launch the triggers belong to; `None` while empty
    pub event_id: Option<String>,
    pub triggers: Vec<ScheduledTrigger>,
    pub installed_at: Option<DateTime<Utc>>,
}

impl ScheduledPlan {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(event_id: impl Into<String>, installed_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Some(event_id.into()),
            triggers: Vec::new(),
            installed_at: Some(installed_at),
        }
    }

    pub fn push(&mut self, trigger: ScheduledTrigger) {
        self.triggers.push(trigger);
    }

    pub fn state(&self) -> PlanState {
        if self.triggers.is_empty() {
            PlanState::Empty
        } else {
            PlanState::Pending {
                triggers: self.triggers.len(),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Next trigger due strictly after `now`
    pub fn next_due(&self, now: DateTime<Utc>) -> Option<&ScheduledTrigger> {
        self.triggers
            .iter()
            .filter(|trigger| trigger.fire_at > now)
            .min_by_key(|trigger| trigger.fire_at)
    }

    pub fn handles(&self) -> impl Iterator<Item = TriggerHandle> + '_ {
        self.triggers.iter().map(|trigger| trigger.handle)
    }
}
