// Launch reminder scheduler
// Replaces the active plan with reminders for the nearest launch: cancel first,
// then gate on permission, then register every still-future trigger

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{
    Clock, EventSource, LaunchEvent, NotificationResult, NotificationService, OffsetTemplate,
    PermissionGate, ScheduledPlan, ScheduledTrigger, TriggerRequest,
};

/// Counts from one scheduling pass that installed a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Triggers accepted by the notification service
    pub registered: usize,
    /// Templates whose instant was not in the future
    pub skipped_past: usize,
    /// Registrations the service rejected
    pub failed: usize,
}

/// Result of a scheduling pass. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleOutcome {
    /// No launch to schedule for; the previous plan was still cancelled
    NoEvent,
    /// Permission absent; the previous plan was still cancelled
    PermissionDenied,
    Installed(ScheduleReport),
}

impl ScheduleOutcome {
    pub fn registered(&self) -> usize {
        match self {
            ScheduleOutcome::Installed(report) => report.registered,
            _ => 0,
        }
    }
}

/// Owns the single active reminder plan.
///
/// Scheduling calls must be serialized by the caller: at most one
/// `schedule_for_event` may be in flight at a time.
pub struct NotificationScheduler {
    service: Arc<dyn NotificationService>,
    gate: PermissionGate,
    clock: Arc<dyn Clock>,
    templates: Vec<OffsetTemplate>,
    active_plan: Mutex<ScheduledPlan>,
}

impl NotificationScheduler {
    pub fn new(
        service: Arc<dyn NotificationService>,
        gate: PermissionGate,
        clock: Arc<dyn Clock>,
        templates: Vec<OffsetTemplate>,
    ) -> Self {
        Self {
            service,
            gate,
            clock,
            templates,
            active_plan: Mutex::new(ScheduledPlan::empty()),
        }
    }

    pub fn templates(&self) -> &[OffsetTemplate] {
        &self.templates
    }

    pub fn permission_gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// Snapshot of the currently installed plan
    pub fn active_plan(&self) -> ScheduledPlan {
        self.active_plan.lock().clone()
    }

    /// Replace the active plan with reminders for `event`.
    ///
    /// `None` cancels the previous plan and registers nothing.
    #[tracing::instrument(
        name = "schedule_for_event",
        skip(self, event),
        fields(event_id = event.map(|e| e.id.as_str()).unwrap_or("<none>"))
    )]
    pub async fn schedule_for_event(&self, event: Option<&LaunchEvent>) -> ScheduleOutcome {
        self.cancel_active().await;

        let Some(event) = event else {
            tracing::debug!("No upcoming launch, nothing to schedule");
            return ScheduleOutcome::NoEvent;
        };

        if !self.gate.request_if_needed().await {
            tracing::info!("Notification permission not granted, skipping reminders");
            return ScheduleOutcome::PermissionDenied;
        }

        // Read after the prompt resolves
        let now = self.clock.now();
        let (requests, skipped_past) = self.plan_requests(event, now);

        let mut report = ScheduleReport {
            skipped_past,
            ..Default::default()
        };
        let mut plan = ScheduledPlan::new(event.id.clone(), now);

        for request in requests {
            let fire_at = request.fire_at;
            let lead = request.lead;
            match self.service.register(request.clone()).await {
                Ok(handle) => {
                    tracing::debug!(%fire_at, ?lead, %handle, "Registered reminder");
                    report.registered += 1;
                    plan.push(ScheduledTrigger {
                        handle,
                        fire_at,
                        lead,
                        content: request.content,
                    });
                },
                Err(e) => {
                    tracing::warn!(%fire_at, ?lead, error = %e, "Failed to register reminder");
                    report.failed += 1;
                },
            }
        }

        tracing::info!(
            registered = report.registered,
            skipped_past = report.skipped_past,
            failed = report.failed,
            "Reminder plan installed"
        );

        *self.active_plan.lock() = plan;
        ScheduleOutcome::Installed(report)
    }

    /// Schedule for the nearest launch the source knows about.
    ///
    /// A source failure leaves the current plan in place.
    pub async fn schedule_nearest(
        &self,
        source: &dyn EventSource,
    ) -> NotificationResult<ScheduleOutcome> {
        let event = source.nearest_event().await?;
        Ok(self.schedule_for_event(event.as_ref()).await)
    }

    /// Cancel every registered reminder and drop the plan.
    pub async fn teardown(&self) {
        self.cancel_active().await;
        tracing::debug!("Reminder scheduling torn down");
    }

    /// Trigger requests for templates still ahead of `now`, in template order,
    /// plus the number of templates dropped for being due already.
    pub fn plan_requests(
        &self,
        event: &LaunchEvent,
        now: DateTime<Utc>,
    ) -> (Vec<TriggerRequest>, usize) {
        let mut skipped = 0;
        let mut requests = Vec::with_capacity(self.templates.len());

        for template in &self.templates {
            let fire_at = chrono::Duration::from_std(template.lead)
                .ok()
                .and_then(|lead| event.scheduled_at.checked_sub_signed(lead));

            match fire_at {
                Some(fire_at) if fire_at > now => requests.push(TriggerRequest {
                    fire_at,
                    lead: template.lead,
                    content: template.render(event),
                }),
                _ => {
                    tracing::debug!(lead = ?template.lead, "Reminder instant already passed, dropping");
                    skipped += 1;
                },
            }
        }

        (requests, skipped)
    }

    async fn cancel_active(&self) {
        // Issued unconditionally; the service may hold triggers from a previous process
        if let Err(e) = self.service.cancel_all().await {
            tracing::warn!(error = %e, "Cancelling scheduled reminders failed");
        }
        let previous = std::mem::take(&mut *self.active_plan.lock());
        if !previous.is_empty() {
            tracing::debug!(cancelled = previous.len(), "Cancelled previous reminder plan");
        }
    }
}
