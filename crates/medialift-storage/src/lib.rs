pub mod local;
pub mod traits;

pub use local::LocalObjectStore;
pub use traits::{ObjectStore, StoreError, StoreResult};
