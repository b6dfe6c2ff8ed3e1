//! Media storage adapters.

mod local_storage;

pub use local_storage::LocalMediaStorage;
