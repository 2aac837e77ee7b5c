//! `Constraint`.

use crate::ir::id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintColumn {
    pub name: String,
    /// 1-indexed.
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey {
        referenced_schema: String,
        referenced_table: String,
        referenced_columns: Vec<String>,
        update_rule: String,
        delete_rule: String,
        deferrable: bool,
        initially_deferred: bool,
    },
    Check {
        check_clause: String,
        is_valid: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub schema: String,
    pub table: String,
    pub name: String,
    pub kind: ConstraintKind,
    pub columns: Vec<ConstraintColumn>,
    pub comment: Option<String>,
}

impl Constraint {
    pub fn id(&self) -> ObjectId {
        ObjectId::Constraint {
            schema: self.schema.clone(),
            table: self.table.clone(),
            name: self.name.clone(),
        }
    }

    pub fn is_multi_column(&self) -> bool {
        self.columns.len() > 1
    }

    /// `topo::tables` edge source: the table this FK constraint references,
    /// if this constraint is a foreign key.
    pub fn fk_target(&self) -> Option<(&str, &str)> {
        match &self.kind {
            ConstraintKind::ForeignKey {
                referenced_schema,
                referenced_table,
                ..
            } => Some((referenced_schema.as_str(), referenced_table.as_str())),
            _ => None,
        }
    }
}
