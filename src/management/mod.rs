mod cache;
mod documents;

pub use cache::CacheGateway;
pub use documents::DocumentStore;
pub use documents::FileDocumentStore;
pub use documents::MemoryDocumentStore;
pub use documents::MongoDocumentStore;
pub use documents::StoreBackend;
pub use documents::StoreError;
pub use documents::open_store;
