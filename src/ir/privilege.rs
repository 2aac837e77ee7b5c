//! `ColumnPrivilege`.

use std::collections::BTreeSet;

use crate::ir::id::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Privilege {
    Select,
    Insert,
    Update,
    References,
}

impl Privilege {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Privilege::Select => "SELECT",
            Privilege::Insert => "INSERT",
            Privilege::Update => "UPDATE",
            Privilege::References => "REFERENCES",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPrivilege {
    pub schema: String,
    pub table: String,
    pub grantee: String,
    pub columns: BTreeSet<String>,
    pub privileges: BTreeSet<Privilege>,
    pub with_grant_option: bool,
}

impl ColumnPrivilege {
    pub fn id(&self) -> ObjectId {
        ObjectId::ColumnPrivilege {
            schema: self.schema.clone(),
            table: self.table.clone(),
            grantee: self.grantee.clone(),
        }
    }
}
