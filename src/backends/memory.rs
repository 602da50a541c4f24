// In-process collaborator implementations
// Every call is recorded so callers can assert on ordering and content

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::components::{
    EventSource, LaunchEvent, NotificationError, NotificationResult, NotificationService,
    PermissionApi, PermissionRequestOptions, PermissionStatus, PreferenceStore, TriggerHandle,
    TriggerRequest,
};

const PLATFORM: &str = "memory";

/// One call observed by [`MemoryNotificationService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Register(TriggerRequest),
    CancelAll,
}

#[derive(Default)]
struct ServiceState {
    pending: Vec<(TriggerHandle, TriggerRequest)>,
    calls: Vec<ServiceCall>,
    capacity: Option<usize>,
    rejected_leads: HashSet<Duration>,
    fail_cancel: bool,
}

/// Notification service that keeps pending triggers in memory.
///
/// Delivery is simulated with [`MemoryNotificationService::take_due`], which
/// hands each trigger out at most once.
#[derive(Default)]
pub struct MemoryNotificationService {
    state: Mutex<ServiceState>,
}

impl MemoryNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse registrations once `limit` triggers are pending
    pub fn with_capacity(self, limit: usize) -> Self {
        self.state.lock().capacity = Some(limit);
        self
    }

    /// Refuse registrations for the given lead time
    pub fn reject_lead(self, lead: Duration) -> Self {
        self.state.lock().rejected_leads.insert(lead);
        self
    }

    /// Make `cancel_all` report a failure (pending triggers are still dropped)
    pub fn failing_cancel(self) -> Self {
        self.state.lock().fail_cancel = true;
        self
    }

    pub fn pending(&self) -> Vec<TriggerRequest> {
        self.state
            .lock()
            .pending
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub fn pending_handles(&self) -> Vec<TriggerHandle> {
        self.state.lock().pending.iter().map(|(handle, _)| *handle).collect()
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.state.lock().calls.clone()
    }

    pub fn registration_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, ServiceCall::Register(_)))
            .count()
    }

    pub fn cancel_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, ServiceCall::CancelAll))
            .count()
    }

    /// Remove and return every pending trigger due at or before `now`
    pub fn take_due(&self, now: DateTime<Utc>) -> Vec<TriggerRequest> {
        let mut state = self.state.lock();
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pending)
            .into_iter()
            .partition(|(_, request)| request.fire_at <= now);
        state.pending = pending;
        due.into_iter().map(|(_, request)| request).collect()
    }
}

impl NotificationService for MemoryNotificationService {
    fn register(
        &self,
        request: TriggerRequest,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<TriggerHandle>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock();
            state.calls.push(ServiceCall::Register(request.clone()));

            if state.rejected_leads.contains(&request.lead) {
                return Err(NotificationError::PlatformError {
                    platform: PLATFORM.to_string(),
                    message: format!("Trigger for lead {:?} rejected", request.lead),
                });
            }

            if let Some(limit) = state.capacity {
                if state.pending.len() >= limit {
                    return Err(NotificationError::ResourceExhausted {
                        resource_type: "pending_triggers".to_string(),
                        limit,
                    });
                }
            }

            let handle = TriggerHandle::generate();
            state.pending.push((handle, request));
            Ok(handle)
        })
    }

    fn cancel_all(&self) -> Pin<Box<dyn Future<Output = NotificationResult<()>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock();
            state.calls.push(ServiceCall::CancelAll);
            state.pending.clear();

            if state.fail_cancel {
                return Err(NotificationError::PlatformError {
                    platform: PLATFORM.to_string(),
                    message: "Cancel request failed".to_string(),
                });
            }
            Ok(())
        })
    }
}

/// Permission API with a scripted prompt answer
pub struct StaticPermissionApi {
    status: Mutex<PermissionStatus>,
    prompt_answer: bool,
    prompts: Mutex<Vec<PermissionRequestOptions>>,
}

impl StaticPermissionApi {
    pub fn new(status: PermissionStatus, prompt_answer: bool) -> Self {
        Self {
            status: Mutex::new(status),
            prompt_answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted, true)
    }

    pub fn denied() -> Self {
        Self::new(PermissionStatus::Denied, false)
    }

    /// Undetermined; the prompt resolves to `answer`
    pub fn undetermined(answer: bool) -> Self {
        Self::new(PermissionStatus::Undetermined, answer)
    }

    pub fn set_status(&self, status: PermissionStatus) {
        *self.status.lock() = status;
    }

    /// Options passed to every prompt so far
    pub fn prompts(&self) -> Vec<PermissionRequestOptions> {
        self.prompts.lock().clone()
    }
}

impl PermissionApi for StaticPermissionApi {
    fn get_status(
        &self,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<PermissionStatus>> + Send + '_>> {
        Box::pin(async move { Ok(*self.status.lock()) })
    }

    fn request(
        &self,
        options: PermissionRequestOptions,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<bool>> + Send + '_>> {
        Box::pin(async move {
            self.prompts.lock().push(options);
            *self.status.lock() = if self.prompt_answer {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            };
            Ok(self.prompt_answer)
        })
    }
}

/// Preference store that remembers every write
#[derive(Default)]
pub struct MemoryPreferenceStore {
    writes: Mutex<Vec<bool>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opted_in(&self) -> Option<bool> {
        self.writes.lock().last().copied()
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.lock().clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn set_notifications_opted_in(&self, opted_in: bool) {
        self.writes.lock().push(opted_in);
    }
}

/// Event source over a fixed list, kept ascending by scheduled instant
#[derive(Default)]
pub struct StaticEventSource {
    events: Mutex<Vec<LaunchEvent>>,
    failure: Mutex<Option<String>>,
}

impl StaticEventSource {
    pub fn new(mut events: Vec<LaunchEvent>) -> Self {
        events.sort_by_key(|event| event.scheduled_at);
        Self {
            events: Mutex::new(events),
            failure: Mutex::new(None),
        }
    }

    pub fn replace(&self, mut events: Vec<LaunchEvent>) {
        events.sort_by_key(|event| event.scheduled_at);
        *self.events.lock() = events;
    }

    /// Fail subsequent fetches with `message`; `None` restores normal operation
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_string);
    }
}

impl EventSource for StaticEventSource {
    fn upcoming_events(
        &self,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<Vec<LaunchEvent>>> + Send + '_>> {
        Box::pin(async move {
            if let Some(message) = self.failure.lock().clone() {
                return Err(NotificationError::SourceError { message });
            }
            Ok(self.events.lock().clone())
        })
    }
}
