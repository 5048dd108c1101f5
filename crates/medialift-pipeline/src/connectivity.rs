//! Connectivity probe
//!
//! A cheap existence check against a well-known key, run before the first
//! transfer attempt. Reachable stores answer either "exists" or "not
//! found"; anything else means the store cannot be reached or refuses us,
//! and the upload should fail before bytes move.

use medialift_storage::{ObjectStore, StoreError, StoreResult};

/// Key probed for reachability; never required to exist.
pub const PROBE_KEY: &str = ".medialift/connectivity-check";

/// Probe `store` for reachability.
///
/// `NotFound` counts as reachable. Every other error is returned to the
/// caller for classification.
pub async fn probe_store(store: &dyn ObjectStore) -> StoreResult<()> {
    match store.exists(PROBE_KEY).await {
        Ok(_) => Ok(()),
        Err(StoreError::NotFound(_)) => Ok(()),
        Err(e) => {
            tracing::warn!(error = %e, "connectivity probe failed");
            Err(e)
        }
    }
}
