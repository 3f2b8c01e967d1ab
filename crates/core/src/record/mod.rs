mod types;

pub use types::Record;
