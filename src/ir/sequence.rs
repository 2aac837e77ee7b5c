//! `Sequence`.
//!
//! Default-normalization lives on `Sequence` itself since both
//! `diff::sequences` and `render::sequences` need the same defaults.

use crate::ir::id::ObjectId;

pub const DEFAULT_START: i64 = 1;
pub const DEFAULT_INCREMENT: i64 = 1;
pub const DEFAULT_MIN: i64 = 1;
pub const DEFAULT_MAX: i64 = i64::MAX;
pub const DEFAULT_CACHE: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub schema: String,
    pub name: String,
    pub data_type: String,
    pub start_value: i64,
    pub increment: i64,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub cache: Option<i64>,
    pub cycle: bool,
    pub owned_by: Option<(String, String)>,
}

impl Sequence {
    pub fn id(&self) -> ObjectId {
        ObjectId::Sequence {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    /// Effective bounds when `min_value`/`max_value` are unset: `[1,
    /// max_of_dataType]`. This crate only knows `bigint`'s range, the
    /// default `data_type` for a plain sequence.
    pub fn effective_min(&self) -> i64 {
        self.min_value.unwrap_or(DEFAULT_MIN)
    }

    pub fn effective_max(&self) -> i64 {
        self.max_value.unwrap_or(DEFAULT_MAX)
    }

    pub fn effective_cache(&self) -> i64 {
        self.cache.unwrap_or(DEFAULT_CACHE)
    }

    pub fn effective_data_type(&self) -> &str {
        if self.data_type.is_empty() {
            "bigint"
        } else {
            &self.data_type
        }
    }
}
