//! MongoDB gateway
//!
//! Owns the client for the `contacts` collection. The connection is created
//! once at startup by [`MongoStore::connect`], which pings the deployment and
//! fails if it is unreachable; per-request operations are never retried.

use std::future::IntoFuture;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::{ContactStore, StorageError};
use crate::config::DatabaseConfig;
use crate::contact::{ContactRecord, StoredContact};

pub const CONTACTS_COLLECTION: &str = "contacts";

/// Document layout of the `contacts` collection
#[derive(Debug, Serialize, Deserialize)]
struct ContactDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    email: String,
    subject: String,
    message: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_agent: Option<String>,
}

impl From<ContactRecord> for ContactDocument {
    fn from(record: ContactRecord) -> Self {
        Self {
            id: None,
            name: record.name,
            email: record.email,
            subject: record.subject,
            message: record.message,
            created_at: record.created_at,
            ip_address: record.ip_address,
            user_agent: record.user_agent,
        }
    }
}

impl TryFrom<ContactDocument> for StoredContact {
    type Error = StorageError;

    fn try_from(document: ContactDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| StorageError::Decode("document without _id".to_string()))?;
        Ok(Self {
            id: id.to_hex(),
            record: ContactRecord {
                name: document.name,
                email: document.email,
                subject: document.subject,
                message: document.message,
                created_at: document.created_at,
                ip_address: document.ip_address,
                user_agent: document.user_agent,
            },
        })
    }
}

#[derive(Clone)]
struct Connection {
    client: Client,
    contacts: Collection<ContactDocument>,
}

/// Pooled connection to the contact collection
pub struct MongoStore {
    connection: RwLock<Option<Connection>>,
    op_timeout: Duration,
}

impl MongoStore {
    /// Connect, verify liveness with a ping and ensure the collection indexes
    ///
    /// A failed ping is returned to the caller; startup treats it as fatal.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        info!(database = %config.name, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.min_pool_size = Some(config.min_pool_size);
        options.max_pool_size = Some(config.max_pool_size);
        options.server_selection_timeout = Some(config.server_selection_timeout());
        options.connect_timeout = Some(config.connect_timeout());
        // Failures surface to the caller immediately
        options.retry_reads = Some(false);
        options.retry_writes = Some(false);

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);

        if let Err(e) = database.run_command(doc! { "ping": 1 }).await {
            error!("Failed to connect to MongoDB: {e}");
            return Err(e.into());
        }
        info!("Successfully connected to MongoDB");

        let contacts = database.collection::<ContactDocument>(CONTACTS_COLLECTION);
        ensure_indexes(&contacts).await;

        Ok(Self {
            connection: RwLock::new(Some(Connection { client, contacts })),
            op_timeout: config.socket_timeout(),
        })
    }

    fn contacts(&self) -> Result<Collection<ContactDocument>, StorageError> {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|c| c.contacts.clone())
            .ok_or(StorageError::NotConnected)
    }

    /// Bound a single store round-trip by the configured socket timeout
    async fn timed<F, T>(&self, operation: &'static str, action: F) -> Result<T, StorageError>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.op_timeout, action.into_future()).await {
            Ok(result) => result.map_err(StorageError::from),
            Err(_) => Err(StorageError::Timeout {
                operation,
                timeout: self.op_timeout,
            }),
        }
    }
}

/// Index creation problems are logged and do not abort startup
async fn ensure_indexes(contacts: &Collection<ContactDocument>) {
    let indexes: [Document; 2] = [doc! { "email": 1 }, doc! { "created_at": -1 }];
    for keys in indexes {
        let model = IndexModel::builder().keys(keys.clone()).build();
        if let Err(e) = contacts.create_index(model).await {
            warn!("Error creating index {keys}: {e}");
            return;
        }
    }
    info!("Database indexes created successfully");
}

impl ContactStore for MongoStore {
    fn insert(&self, record: ContactRecord) -> BoxFuture<'_, Result<String, StorageError>> {
        Box::pin(async move {
            let contacts = self.contacts()?;
            let document = ContactDocument::from(record);
            let result = self.timed("insert", contacts.insert_one(document)).await?;
            let id = result.inserted_id.as_object_id().map_or_else(
                || result.inserted_id.to_string(),
                |oid| oid.to_hex(),
            );
            info!(id = %id, "Contact form submission inserted");
            Ok(id)
        })
    }

    fn list_recent(
        &self,
        skip: u64,
        limit: u32,
    ) -> BoxFuture<'_, Result<Vec<StoredContact>, StorageError>> {
        Box::pin(async move {
            let contacts = self.contacts()?;
            let find = contacts
                .find(doc! {})
                .sort(doc! { "created_at": -1 })
                .skip(skip)
                .limit(i64::from(limit));
            let cursor = self.timed("find", find).await?;
            let documents: Vec<ContactDocument> =
                self.timed("find", cursor.try_collect()).await?;
            documents.into_iter().map(StoredContact::try_from).collect()
        })
    }

    fn close(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            let taken = self
                .connection
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            if let Some(connection) = taken {
                connection.client.shutdown().await;
                info!("MongoDB connection closed");
            }
        })
    }
}
