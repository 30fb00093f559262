//! Shared query context.

use std::sync::Arc;

use poolscan_store::PoolStore;

use crate::QueryError;

/// The single read-only store handle every query runs against.
///
/// Only constructible from an open store, so no query can reach an
/// uninitialised backend. Cloning shares the handle.
#[derive(Clone)]
pub struct QueryContext {
    store: Arc<dyn PoolStore>,
}

impl QueryContext {
    /// Wrap an opened store. A store that is not open is rejected with its
    /// last error message.
    pub fn new(store: Arc<dyn PoolStore>) -> Result<Self, QueryError> {
        if !store.is_open() {
            let message = store.last_error_message();
            tracing::error!(error = %message, "store is not open");
            return Err(QueryError::StoreUnavailable(message));
        }
        tracing::info!("store is open");
        Ok(Self { store })
    }

    pub fn store(&self) -> &dyn PoolStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for QueryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryContext")
            .field("open", &self.store.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolscan_nullables::NullPoolStore;

    #[test]
    fn closed_store_rejected_with_message() {
        let err = QueryContext::new(Arc::new(NullPoolStore::closed("no such file"))).unwrap_err();
        match err {
            QueryError::StoreUnavailable(msg) => assert_eq!(msg, "no such file"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn open_store_accepted() {
        assert!(QueryContext::new(Arc::new(NullPoolStore::new())).is_ok());
    }
}
