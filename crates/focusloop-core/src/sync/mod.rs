//! Cross-instance state synchronization.
//!
//! Keeps N concurrent engine instances showing one logical timer: a
//! mutating instance broadcasts its new snapshot, everyone else adopts
//! it as authoritative, and each recomputes remaining time from the
//! shared anchor. See `bus` for the delivery semantics.

pub mod bus;
pub mod instance_id;


pub use bus::{SyncBus, SyncMessage, SyncPublisher, SyncSubscriber};
pub use instance_id::InstanceId;
