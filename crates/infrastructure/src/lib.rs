//! Adapters for the orchestration platform and development collaborators.

#![forbid(unsafe_code)]

mod in_memory_access_request_store;
mod in_memory_grant_store;
mod platform_access_request_store;
mod platform_access_reviewer;
mod platform_api;
mod platform_grant_store;
mod system_clock;

pub use in_memory_access_request_store::InMemoryAccessRequestStore;
pub use in_memory_grant_store::InMemoryGrantStore;
pub use platform_access_request_store::PlatformAccessRequestStore;
pub use platform_access_reviewer::PlatformAccessReviewer;
pub use platform_api::{PlatformApi, PlatformApiConfig};
pub use platform_grant_store::PlatformGrantStore;
pub use system_clock::SystemClock;
