#[cfg(feature = "dynamodb")]
mod dynamodb;
#[cfg(feature = "inmemory")]
mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoRecordStore;
#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;
