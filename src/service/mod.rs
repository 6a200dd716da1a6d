// src/service/mod.rs

pub mod client;
pub mod rows;
pub mod sync;

pub use client::{DataService, HostedClient};
pub use sync::{EntityKind, RefetchWorker, SyncBus};
