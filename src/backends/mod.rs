// Collaborator backends
// The OS notification facility itself lives outside this crate; these in-memory
// implementations back tests and hosts that drive delivery themselves

pub mod memory;

pub use memory::{
    MemoryNotificationService, MemoryPreferenceStore, ServiceCall, StaticEventSource,
    StaticPermissionApi,
};
