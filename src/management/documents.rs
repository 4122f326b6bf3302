use std::{
    collections::HashMap,
    fmt,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use futures_lite::StreamExt;
use mongodb::{
    Client, Collection,
    bson::{Document, doc},
    options::ClientOptions,
};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::{config::CacheSettings, error::ChromaticError, types::AlbumColorDocument};

pub const MEMORY_SCHEME: &str = "memory://";
pub const FILE_SCHEME: &str = "file://";
pub const MONGO_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

const MONGO_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum StoreError {
    IoError(Error),
    SerdeError(serde_json::Error),
    MongoError(mongodb::error::Error),
}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeError(err)
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::MongoError(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "io: {}", e),
            StoreError::SerdeError(e) => write!(f, "serde: {}", e),
            StoreError::MongoError(e) => write!(f, "mongodb: {}", e),
        }
    }
}

/// Album color documents keyed by `id_album`.
///
/// Implementations must tolerate concurrent calls; concurrent writes to the
/// same key resolve as last-write-wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, id_album: &str) -> Result<Option<AlbumColorDocument>, StoreError>;

    /// Inserts or replaces the document for `document.id_album`.
    async fn insert_one(&self, document: &AlbumColorDocument) -> Result<(), StoreError>;

    /// Returns whether a document was removed.
    async fn delete_one(&self, id_album: &str) -> Result<bool, StoreError>;

    async fn find_all(&self) -> Result<Vec<AlbumColorDocument>, StoreError>;

    fn describe(&self) -> String;
}

/// Backend selected by the scheme of `DB_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    /// Document directory, already joined with database and collection.
    File(PathBuf),
    Mongo(String),
}

impl StoreBackend {
    /// `memory://` is the in-memory store, `mongodb://` and `mongodb+srv://`
    /// a MongoDB deployment, a plain path or a `file://` URL a JSON document
    /// directory at `<url>/<name>/<collection>`. Other schemes are rejected.
    pub fn from_settings(settings: &CacheSettings) -> Result<Self, ChromaticError> {
        let url = settings.url.trim();

        if url == MEMORY_SCHEME {
            return Ok(StoreBackend::Memory);
        }
        if MONGO_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
            return Ok(StoreBackend::Mongo(url.to_string()));
        }

        let root = match url.strip_prefix(FILE_SCHEME) {
            Some(path) => path,
            None if url.contains("://") => {
                return Err(ChromaticError::CacheUnavailable(format!(
                    "unsupported document store url '{}'",
                    url
                )));
            }
            None => url,
        };

        Ok(StoreBackend::File(
            PathBuf::from(root)
                .join(&settings.name)
                .join(&settings.collection),
        ))
    }
}

/// Opens the store named by `settings.url`, see [`StoreBackend::from_settings`].
pub async fn open_store(
    settings: &CacheSettings,
) -> Result<Box<dyn DocumentStore>, ChromaticError> {
    let store: Result<Box<dyn DocumentStore>, StoreError> =
        match StoreBackend::from_settings(settings)? {
            StoreBackend::Memory => Ok(Box::new(MemoryDocumentStore::new())),
            StoreBackend::File(dir) => FileDocumentStore::open(dir)
                .await
                .map(|store| Box::new(store) as Box<dyn DocumentStore>),
            StoreBackend::Mongo(url) => {
                MongoDocumentStore::connect(&url, &settings.name, &settings.collection)
                    .await
                    .map(|store| Box::new(store) as Box<dyn DocumentStore>)
            }
        };

    store.map_err(|e| ChromaticError::CacheUnavailable(e.to_string()))
}

/// One pretty-printed JSON file per album.
///
/// File names are the URL-safe base64 SHA-256 of the album id, so ids never
/// reach the filesystem verbatim.
pub struct FileDocumentStore {
    dir: PathBuf,
    tmp_counter: AtomicU64,
}

impl FileDocumentStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        async_fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            tmp_counter: AtomicU64::new(0),
        })
    }

    fn get_path(&self, id_album: &str) -> PathBuf {
        let hash = Sha256::digest(id_album.as_bytes());
        self.dir.join(format!("{}.json", URL_SAFE_NO_PAD.encode(hash)))
    }

    async fn read_document(path: &Path) -> Result<Option<AlbumColorDocument>, StoreError> {
        let json = match async_fs::read_to_string(path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::IoError(e)),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn find_one(&self, id_album: &str) -> Result<Option<AlbumColorDocument>, StoreError> {
        let document = Self::read_document(&self.get_path(id_album)).await?;
        Ok(document.filter(|d| d.id_album == id_album))
    }

    async fn insert_one(&self, document: &AlbumColorDocument) -> Result<(), StoreError> {
        let path = self.get_path(&document.id_album);
        let json = serde_json::to_string_pretty(document)?;

        // write next to the target and rename, readers never see half a file
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("{}.{}.tmp", std::process::id(), n));
        async_fs::write(&tmp, json).await?;
        if let Err(e) = async_fs::rename(&tmp, &path).await {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(StoreError::IoError(e));
        }
        Ok(())
    }

    async fn delete_one(&self, id_album: &str) -> Result<bool, StoreError> {
        match async_fs::remove_file(self.get_path(id_album)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }

    async fn find_all(&self) -> Result<Vec<AlbumColorDocument>, StoreError> {
        let mut entries = async_fs::read_dir(&self.dir).await?;
        let mut documents = Vec::new();

        while let Some(entry) = entries.next().await {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(document) = Self::read_document(&path).await? {
                documents.push(document);
            }
        }

        documents.sort_by(|a, b| a.id_album.cmp(&b.id_album));
        Ok(documents)
    }

    fn describe(&self) -> String {
        format!("document directory {}", self.dir.display())
    }
}

/// One MongoDB document per album in `<name>.<collection>`.
pub struct MongoDocumentStore {
    collection: Collection<AlbumColorDocument>,
}

impl MongoDocumentStore {
    /// Connects and pings the deployment, so an unreachable server is reported
    /// here instead of on the first lookup.
    pub async fn connect(url: &str, name: &str, collection: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url).await?;
        options.app_name = Some("chromabot".to_string());
        options.server_selection_timeout = Some(MONGO_SELECTION_TIMEOUT);

        let client = Client::with_options(options)?;
        let database = client.database(name);
        database.run_command(doc! { "ping": 1 }).await?;

        Ok(Self {
            collection: database.collection(collection),
        })
    }

    fn filter(id_album: &str) -> Document {
        doc! { "id_album": id_album }
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn find_one(&self, id_album: &str) -> Result<Option<AlbumColorDocument>, StoreError> {
        Ok(self.collection.find_one(Self::filter(id_album)).await?)
    }

    async fn insert_one(&self, document: &AlbumColorDocument) -> Result<(), StoreError> {
        self.collection
            .replace_one(Self::filter(&document.id_album), document)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn delete_one(&self, id_album: &str) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(Self::filter(id_album)).await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_all(&self) -> Result<Vec<AlbumColorDocument>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "id_album": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    fn describe(&self) -> String {
        format!(
            "mongodb collection {}.{}",
            self.collection.namespace().db,
            self.collection.name()
        )
    }
}

/// Keeps documents for the lifetime of the process.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, AlbumColorDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, id_album: &str) -> Result<Option<AlbumColorDocument>, StoreError> {
        Ok(self.documents.read().await.get(id_album).cloned())
    }

    async fn insert_one(&self, document: &AlbumColorDocument) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .insert(document.id_album.clone(), document.clone());
        Ok(())
    }

    async fn delete_one(&self, id_album: &str) -> Result<bool, StoreError> {
        Ok(self.documents.write().await.remove(id_album).is_some())
    }

    async fn find_all(&self) -> Result<Vec<AlbumColorDocument>, StoreError> {
        let mut documents: Vec<AlbumColorDocument> =
            self.documents.read().await.values().cloned().collect();
        documents.sort_by(|a, b| a.id_album.cmp(&b.id_album));
        Ok(documents)
    }

    fn describe(&self) -> String {
        "in-memory document store".to_string()
    }
}
