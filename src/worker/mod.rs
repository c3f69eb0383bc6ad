//! Background worker hosting the search engine.
//!
//! ## Key Types
//!
//! - `WorkerHost`: owns the worker thread; terminates it on drop
//! - `WorkerHandle`: cloneable async request interface
//! - `Engine`: catalog, index and working set, owned by the worker thread
//! - `IndexOrigin`: whether the index was imported or built

pub mod engine;
pub mod host;

pub use engine::{Engine, IndexOrigin};
pub use host::{WorkerHandle, WorkerHost};
