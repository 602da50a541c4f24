//! Tests for components/permission.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use liftoff_notify::{
    MemoryPreferenceStore, NotificationError, NotificationResult, PermissionApi, PermissionGate,
    PermissionRequestOptions, PermissionStatus, StaticPermissionApi,
};
use tokio_test::block_on;

fn gate(api: &Arc<StaticPermissionApi>, store: &Arc<MemoryPreferenceStore>) -> PermissionGate {
    PermissionGate::new(api.clone()).with_preferences(store.clone())
}

#[test]
fn test_granted_never_prompts() {
    let api = Arc::new(StaticPermissionApi::granted());
    let store = Arc::new(MemoryPreferenceStore::new());

    assert!(block_on(gate(&api, &store).request_if_needed()));
    assert!(api.prompts().is_empty());
    assert!(store.writes().is_empty());
}

#[test]
fn test_denied_never_prompts() {
    let api = Arc::new(StaticPermissionApi::denied());
    let store = Arc::new(MemoryPreferenceStore::new());

    assert!(!block_on(gate(&api, &store).request_if_needed()));
    assert!(api.prompts().is_empty());
    assert_eq!(store.opted_in(), None);
}

#[test]
fn test_undetermined_accepted_persists_opt_in_once() {
    let api = Arc::new(StaticPermissionApi::undetermined(true));
    let store = Arc::new(MemoryPreferenceStore::new());
    let gate = gate(&api, &store);

    assert!(block_on(gate.request_if_needed()));
    assert!(block_on(gate.request_if_needed()));

    assert_eq!(api.prompts().len(), 1);
    assert_eq!(store.writes(), vec![true]);
    assert_eq!(block_on(gate.status()), Ok(PermissionStatus::Granted));
}

#[test]
fn test_undetermined_refused() {
    let api = Arc::new(StaticPermissionApi::undetermined(false));
    let store = Arc::new(MemoryPreferenceStore::new());
    let gate = gate(&api, &store);

    assert!(!block_on(gate.request_if_needed()));
    assert!(!block_on(gate.request_if_needed()));

    assert_eq!(api.prompts().len(), 1);
    assert!(store.writes().is_empty());
}

#[test]
fn test_prompt_uses_configured_options() {
    let api = Arc::new(StaticPermissionApi::undetermined(true));
    let options = PermissionRequestOptions {
        allow_announcements: false,
        ..Default::default()
    };
    let gate = PermissionGate::new(api.clone()).with_options(options);

    assert!(block_on(gate.request_if_needed()));
    assert_eq!(api.prompts(), vec![options]);
}

#[test]
fn test_status_is_read_only() {
    let api = Arc::new(StaticPermissionApi::undetermined(true));
    let gate = PermissionGate::new(api.clone());

    assert_eq!(block_on(gate.status()), Ok(PermissionStatus::Undetermined));
    assert_eq!(block_on(gate.status()), Ok(PermissionStatus::Undetermined));
    assert!(api.prompts().is_empty());
}

struct BrokenPermissionApi;

impl PermissionApi for BrokenPermissionApi {
    fn get_status(
        &self,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<PermissionStatus>> + Send + '_>> {
        Box::pin(async {
            Err(NotificationError::AuthorizationError {
                message: "settings unavailable".to_string(),
            })
        })
    }

    fn request(
        &self,
        _options: PermissionRequestOptions,
    ) -> Pin<Box<dyn Future<Output = NotificationResult<bool>> + Send + '_>> {
        Box::pin(async { Ok(true) })
    }
}

#[test]
fn test_api_failure_counts_as_not_granted() {
    let gate = PermissionGate::new(Arc::new(BrokenPermissionApi));

    assert!(block_on(gate.status()).is_err());
    assert!(!block_on(gate.request_if_needed()));
}
