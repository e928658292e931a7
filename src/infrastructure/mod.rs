pub mod in_memory;
pub mod reference_data;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
