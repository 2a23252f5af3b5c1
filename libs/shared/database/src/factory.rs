use std::sync::Arc;

use tracing::info;

use shared_config::{AppConfig, StorageBackend};

use crate::memory::MemoryStore;
use crate::store::{Record, RecordStore};
use crate::supabase::{SupabaseClient, SupabaseStore};

/// Opens one store per record type against the configured backend.
pub struct StoreFactory {
    backend: StorageBackend,
    supabase: Option<Arc<SupabaseClient>>,
}

impl StoreFactory {
    pub fn new(config: &AppConfig) -> Self {
        info!("Using {} storage backend", config.storage_backend);

        let supabase = match config.storage_backend {
            StorageBackend::Supabase => Some(Arc::new(SupabaseClient::new(config))),
            StorageBackend::Memory => None,
        };

        Self {
            backend: config.storage_backend,
            supabase,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    pub fn open<T: Record>(&self) -> Arc<dyn RecordStore<T>> {
        match &self.supabase {
            Some(client) => Arc::new(SupabaseStore::<T>::new(client.clone())),
            None => Arc::new(MemoryStore::<T>::new()),
        }
    }
}
