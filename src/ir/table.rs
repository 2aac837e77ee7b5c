//! `Table`.

use crate::ir::column::Column;
use crate::ir::constraint::Constraint;
use crate::ir::id::ObjectId;
use crate::ir::index::Index;
use crate::ir::policy::Policy;
use crate::ir::trigger::Trigger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub schema: String,
    pub name: String,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub indexes: Vec<Index>,
    pub triggers: Vec<Trigger>,
    pub policies: Vec<Policy>,
    pub rls_enabled: bool,
    pub comment: Option<String>,
}

impl Table {
    pub fn id(&self) -> ObjectId {
        ObjectId::Table {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| matches!(c.kind, crate::ir::constraint::ConstraintKind::PrimaryKey))
    }

    /// Tables this one references by foreign key, for `topo::tables`.
    /// Self-references are excluded.
    pub fn fk_targets(&self) -> Vec<(&str, &str)> {
        self.constraints
            .iter()
            .filter_map(|c| c.fk_target())
            .filter(|(schema, table)| !(*schema == self.schema && *table == self.name))
            .collect()
    }
}
