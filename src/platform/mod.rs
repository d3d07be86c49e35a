//! Platform abstraction layer
//!
//! Handles host-facing concerns the simulation stays free of:
//! - Frame pacing from wall-clock timestamps
//! - Keyboard input state
//! - Storage (LocalStorage on web, files natively)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{Control, InputLatch};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, Storage, StorageError};
pub use time::{Pace, Pacer};
