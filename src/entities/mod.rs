//! Entity module - SeaORM entity definitions for the database.
//!
//! The tracker keeps its state as a handful of JSON blobs, so a single
//! key-value table is all the schema there is.

pub mod stored_blob;

pub use stored_blob::{
    Column as StoredBlobColumn, Entity as StoredBlob, Model as StoredBlobModel,
};
