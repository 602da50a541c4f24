// Launch reminder components
// Event model, trigger identity and the error taxonomy shared by every collaborator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod clock;
pub mod config;
pub mod content;
pub mod countdown;
pub mod lifecycle;
pub mod permission;
pub mod platform;
pub mod scheduler;
pub mod serde_time;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ReminderConfig;
pub use content::{OffsetTemplate, ReminderContent, default_offset_templates};
pub use countdown::{CountdownTicker, TMinus, is_t_plus, remaining};
pub use lifecycle::{PlanState, ScheduledPlan, ScheduledTrigger};
pub use permission::{
    PermissionApi, PermissionGate, PermissionRequestOptions, PermissionStatus, PreferenceStore,
};
pub use platform::{EventSource, NotificationService, TriggerRequest};
pub use scheduler::{NotificationScheduler, ScheduleOutcome, ScheduleReport};

/// An upcoming launch as delivered by the event source.
///
/// Records are immutable once fetched; the scheduler only ever borrows the
/// nearest one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchEvent {
    pub id: String,
    pub name: String,
    /// Scheduled liftoff instant
    #[serde(rename = "date_unix", with = "chrono::serde::ts_seconds")]
    pub scheduled_at: DateTime<Utc>,
    pub launchpad: Launchpad,
    /// Vehicle flying the mission
    pub vehicle: String,
    pub flight_number: u32,
}

impl LaunchEvent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scheduled_at,
            launchpad: Launchpad::default(),
            vehicle: String::new(),
            flight_number: 0,
        }
    }

    pub fn with_launchpad(
        mut self,
        locality: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        self.launchpad = Launchpad {
            locality: locality.into(),
            region: region.into(),
        };
        self
    }

    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = vehicle.into();
        self
    }

    pub fn with_flight_number(mut self, flight_number: u32) -> Self {
        self.flight_number = flight_number;
        self
    }
}

/// Launch site descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launchpad {
    pub locality: String,
    pub region: String,
}

/// Opaque handle for one trigger registered with the notification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerHandle(Uuid);

impl TriggerHandle {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for TriggerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TriggerHandle {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Errors raised at collaborator boundaries and by configuration checks.
///
/// None of these describe the expected "nothing to do" outcomes of scheduling
/// (no permission, past triggers, no event); those are reported through
/// [`ScheduleOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum NotificationError {
    /// Notification service failure
    #[error("Platform error on {platform}: {message}")]
    PlatformError { platform: String, message: String },
    /// Permission API failure
    #[error("Authorization error: {message}")]
    AuthorizationError { message: String },
    /// Configuration or builder misuse
    #[error("Validation error in {field}: {message}")]
    ValidationError { field: String, message: String },
    /// The service refused another trigger
    #[error("Resource exhausted: {resource_type} limit {limit} reached")]
    ResourceExhausted { resource_type: String, limit: usize },
    /// Event retrieval failure
    #[error("Event source error: {message}")]
    SourceError { message: String },
}

impl NotificationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        NotificationError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type NotificationResult<T> = Result<T, NotificationError>;
