#![forbid(unsafe_code)]

//! Runtime plumbing: event notifier, storage backends, and frame timers.
//!
//! # Role in Guidepost
//! `guidepost-runtime` holds the pieces every stateful component leans on
//! but that know nothing about tours: a typed publish/subscribe hub, a
//! key/value storage seam, and rate limiters driven by frame time.
//!
//! # Feature flags
//! - `state-persistence`: enables [`storage::FileStorage`], a JSON file
//!   backend for native hosts.

pub mod notifier;
pub mod storage;
pub mod timer;

pub use notifier::{Notification, Notifier, Subscription};
#[cfg(feature = "state-persistence")]
pub use storage::FileStorage;
pub use storage::{MemoryStorage, StorageBackend, StorageError, StorageResult};
pub use timer::{Debounce, FrameThrottle};
