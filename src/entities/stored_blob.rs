//! Stored blob entity - the key-value table behind the tracker.
//!
//! Each row holds one serialized collection or singleton record under a
//! stable key such as `"letters"` or `"settings"`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored blob database model - one JSON document per key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stored_blobs")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Blob key (e.g., `"letters"`, `"calendarNotes"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized JSON document
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this blob was last written
    pub updated_at: DateTimeUtc,
}

/// `StoredBlob` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
