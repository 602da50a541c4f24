// Collaborator boundaries: the OS notification facility and the launch feed
// Both are object-safe so the scheduler can hold them behind `Arc<dyn _>`

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LaunchEvent, NotificationResult, ReminderContent, TriggerHandle, serde_time};

/// One trigger to hand to the notification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRequest {
    /// Wall-clock instant at which the reminder should be shown
    pub fire_at: DateTime<Utc>,
    /// Lead time before the launch this trigger represents
    #[serde(rename = "lead_secs", with = "serde_time::duration_secs")]
    pub lead: Duration,
    pub content: ReminderContent,
}

/// OS-level facility that fires notifications at a wall-clock instant.
///
/// Implementations guarantee at-most-once delivery per registered trigger, at
/// or after its instant.
pub trait NotificationService: Send + Sync {
    fn register(
        &self,
        request: TriggerRequest,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<TriggerHandle>> + Send + '_>>;

    /// Remove every pending trigger registered by this application.
    fn cancel_all(&self) -> Pin<Box<dyn Future<Output = NotificationResult<()>> + Send + '_>>;
}

/// Supplier of upcoming launches, ascending by scheduled instant
pub trait EventSource: Send + Sync {
    fn upcoming_events(
        &self,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<Vec<LaunchEvent>>> + Send + '_>>;

    /// The earliest upcoming launch, if any
    fn nearest_event(
        &self,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<Option<LaunchEvent>>> + Send + '_>> {
        Box::pin(async move { Ok(self.upcoming_events().await?.into_iter().next()) })
    }
}
