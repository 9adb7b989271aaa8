use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use s3_http_function::{
    credentials::StaticCredentials,
    object_storage::{
        endpoint_url, ObjectStore, StorageConnector, StorageError, StorageResult, StoredObject,
    },
    types::Configuration,
};

#[derive(Default)]
struct MemoryState {
    buckets: HashSet<String>,
    objects: HashMap<(String, String), StoredObject>,
    failures: HashMap<String, StorageError>,
    access_key_ids: Vec<String>,
    requested_keys: Vec<String>,
}

/// Connector handing out stores backed by a shared in-memory bucket map
#[derive(Clone, Default)]
pub struct MemoryConnector {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryConnector {
    /// Creates a connector whose store contains one empty bucket
    pub fn with_bucket(bucket: &str) -> Self {
        let connector = Self::default();
        connector
            .state
            .lock()
            .unwrap()
            .buckets
            .insert(bucket.to_string());
        connector
    }

    /// Stores an object
    pub fn put_object(&self, bucket: &str, key: &str, content: &[u8], content_type: Option<&str>) {
        self.state.lock().unwrap().objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                content: content.to_vec(),
                content_type: content_type.map(ToString::to_string),
            },
        );
    }

    /// Makes every fetch of `key` fail with `error`
    pub fn fail_with(&self, key: &str, error: StorageError) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(key.to_string(), error);
    }

    /// Access key ids the store was connected with, in order
    pub fn access_key_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().access_key_ids.clone()
    }

    /// Keys requested from the store, in order
    pub fn requested_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().requested_keys.clone()
    }
}

impl StorageConnector for MemoryConnector {
    type Store = MemoryStore;

    fn connect(
        &self,
        config: &Configuration,
        credentials: &StaticCredentials,
    ) -> StorageResult<MemoryStore> {
        endpoint_url(&config.endpoint, config.use_ssl)?;

        self.state
            .lock()
            .unwrap()
            .access_key_ids
            .push(credentials.access_key_id().to_string());

        Ok(MemoryStore {
            state: Arc::clone(&self.state),
        })
    }
}

/// In-memory object store
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        let mut state = self.state.lock().unwrap();
        state.requested_keys.push(key.to_string());

        if key.is_empty() {
            return Err(StorageError::InvalidKey(
                "Object name cannot be empty".to_string(),
            ));
        }

        if let Some(error) = state.failures.get(key) {
            return Err(error.clone());
        }

        if !state.buckets.contains(bucket) {
            return Err(StorageError::service(
                "NoSuchBucket",
                "The specified bucket does not exist",
            ));
        }

        state
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::service("NoSuchKey", "The specified key does not exist."))
    }
}
