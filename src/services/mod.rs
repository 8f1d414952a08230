// Service exports
pub mod records;

pub use records::{RecordSnapshot, RecordStore, RecordStoreError};
