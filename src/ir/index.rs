//! `Index`.

use crate::ir::id::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Plain,
    Unique,
    /// Redundant with a `PrimaryKey` constraint; suppressed during index
    /// emission so it is never emitted twice.
    Primary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumn {
    /// A column name, or an expression when the index is on an expression.
    pub name: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub schema: String,
    pub table: String,
    pub name: String,
    pub kind: IndexKind,
    pub method: String,
    pub columns: Vec<IndexColumn>,
    pub is_partial: bool,
    pub where_clause: Option<String>,
    pub comment: Option<String>,
}

impl Index {
    pub fn id(&self) -> ObjectId {
        ObjectId::Index {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self.kind, IndexKind::Primary)
    }
}
