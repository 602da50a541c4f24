//! Tests for components/lifecycle.rs

use std::time::Duration;

use chrono::Duration as Span;
use liftoff_notify::{PlanState, ReminderContent, ScheduledPlan, ScheduledTrigger, TriggerHandle};

use super::liftoff;

fn trigger(minutes_before: i64) -> ScheduledTrigger {
    ScheduledTrigger {
        handle: TriggerHandle::generate(),
        fire_at: liftoff() - Span::minutes(minutes_before),
        lead: Duration::from_secs(minutes_before as u64 * 60),
        content: ReminderContent::new("title", "body"),
    }
}

#[test]
fn test_plan_state_transitions() {
    let mut plan = ScheduledPlan::empty();
    assert_eq!(plan.state(), PlanState::Empty);
    assert_eq!(plan.event_id, None);

    plan = ScheduledPlan::new("fh", liftoff() - Span::days(1));
    assert_eq!(plan.state(), PlanState::Empty);

    plan.push(trigger(60));
    plan.push(trigger(10));
    assert_eq!(plan.state(), PlanState::Pending { triggers: 2 });

    let previous = std::mem::take(&mut plan);
    assert_eq!(previous.len(), 2);
    assert_eq!(plan.state(), PlanState::Empty);
}

#[test]
fn test_next_due() {
    let mut plan = ScheduledPlan::new("fh", liftoff() - Span::days(1));
    plan.push(trigger(60));
    plan.push(trigger(10));
    plan.push(trigger(5));

    let next = plan.next_due(liftoff() - Span::minutes(30));
    assert_eq!(next.map(|t| t.lead), Some(Duration::from_secs(600)));

    assert!(plan.next_due(liftoff()).is_none());
}
