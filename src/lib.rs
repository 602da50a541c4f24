//! Launch reminder scheduling with a live T-minus countdown
//!
//! The [`NotificationScheduler`] keeps exactly one plan of reminders registered
//! for the nearest upcoming launch, firing at fixed lead times (24 hours,
//! 1 hour, 10 minutes and 5 minutes by default). The countdown side is a pure
//! [`remaining`] calculation plus a [`CountdownTicker`] that republishes it.
//!
//! Collaborators (the OS notification facility, the permission API, the
//! preference store and the launch feed) are injected as trait objects; see
//! [`SchedulerBuilder`].

pub mod backends;
pub mod components;

pub use backends::*;
pub use components::*;

use std::sync::Arc;

/// Builder wiring a [`NotificationScheduler`] to its collaborators
pub struct SchedulerBuilder {
    service: Option<Arc<dyn NotificationService>>,
    permissions: Option<Arc<dyn PermissionApi>>,
    preferences: Option<Arc<dyn PreferenceStore>>,
    clock: Option<Arc<dyn Clock>>,
    config: ReminderConfig,
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self {
            service: None,
            permissions: None,
            preferences: None,
            clock: None,
            config: ReminderConfig::default(),
        }
    }

    pub fn with_service(mut self, service: Arc<dyn NotificationService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_permissions(mut self, permissions: Arc<dyn PermissionApi>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Defaults to [`SystemClock`]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_config(mut self, config: ReminderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> NotificationResult<NotificationScheduler> {
        self.config.validate()?;

        let service = self
            .service
            .ok_or_else(|| NotificationError::validation("service", "Notification service is required"))?;
        let permissions = self
            .permissions
            .ok_or_else(|| NotificationError::validation("permissions", "Permission API is required"))?;

        let mut gate = PermissionGate::new(permissions).with_options(self.config.permission_request);
        if let Some(preferences) = self.preferences {
            gate = gate.with_preferences(preferences);
        }

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };

        tracing::debug!(
            templates = self.config.templates.len(),
            "Building reminder scheduler"
        );

        Ok(NotificationScheduler::new(
            service,
            gate,
            clock,
            self.config.templates,
        ))
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
