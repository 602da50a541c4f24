// Notification permission gate
// Wraps the platform permission API and records an opt-in with the preference store

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::NotificationResult;

/// Authorization state reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }

    /// Platforms forbid re-prompting once the user has answered
    pub fn can_request(&self) -> bool {
        matches!(self, PermissionStatus::Undetermined)
    }
}

/// Capabilities asked for when prompting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionRequestOptions {
    pub allow_alert: bool,
    pub allow_badge: bool,
    pub allow_sound: bool,
    pub allow_announcements: bool,
}

impl Default for PermissionRequestOptions {
    fn default() -> Self {
        Self {
            allow_alert: true,
            allow_badge: true,
            allow_sound: true,
            allow_announcements: true,
        }
    }
}

/// Platform permission API
pub trait PermissionApi: Send + Sync {
    fn get_status(
        &self,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<PermissionStatus>> + Send + '_>>;

    /// Prompt the user; resolves to whether permission was granted.
    fn request(
        &self,
        options: PermissionRequestOptions,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<bool>> + Send + '_>>;
}

/// Persisted user preferences. Write-only from the engine's side.
pub trait PreferenceStore: Send + Sync {
    fn set_notifications_opted_in(&self, opted_in: bool);
}

pub struct PermissionGate {
    api: Arc<dyn PermissionApi>,
    preferences: Option<Arc<dyn PreferenceStore>>,
    options: PermissionRequestOptions,
}

impl PermissionGate {
    pub fn new(api: Arc<dyn PermissionApi>) -> Self {
        Self {
            api,
            preferences: None,
            options: PermissionRequestOptions::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn with_options(mut self, options: PermissionRequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> PermissionRequestOptions {
        self.options
    }

    /// Current authorization state; never prompts.
    pub async fn status(&self) -> NotificationResult<PermissionStatus> {
        self.api.get_status().await
    }

    /// Resolve permission, prompting at most once and only when undetermined.
    ///
    /// Collaborator failures count as "not granted".
    pub async fn request_if_needed(&self) -> bool {
        let status = match self.api.get_status().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to query notification permission");
                return false;
            },
        };

        match status {
            PermissionStatus::Granted => true,
            PermissionStatus::Denied => {
                tracing::debug!("Notification permission denied, not prompting");
                false
            },
            PermissionStatus::Undetermined => match self.api.request(self.options).await {
                Ok(true) => {
                    tracing::info!("Notification permission granted");
                    if let Some(preferences) = &self.preferences {
                        preferences.set_notifications_opted_in(true);
                    }
                    true
                },
                Ok(false) => {
                    tracing::info!("Notification permission refused at prompt");
                    false
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Notification permission prompt failed");
                    false
                },
            },
        }
    }
}
