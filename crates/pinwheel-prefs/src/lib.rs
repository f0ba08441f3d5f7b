mod bus;
mod config;
mod drain;
mod kv;
mod layout;
mod lock_table;
mod store;

pub use bus::{PreferenceChangeBus, PreferenceChanged};
pub use config::PinwheelConfig;
pub use drain::{DrainStats, LockDrainWorker};
pub use kv::{validate_package_name, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use layout::{default_user_prefix, PrefixLayout};
pub use lock_table::{LockBackend, LockTable, MemoryLockBackend, SeedStats};
pub use store::PreferenceStore;
