//! `MigrationStep`: the tagged sum over every object kind's create/alter/drop
//! operation, used in place of dynamic dispatch so the global ordering
//! driver can match on kind directly. No `Aggregate`, no standalone
//! table-level `Grant`.

use crate::ir::ObjectId;
use crate::render::extension::ExtensionOperation;
use crate::render::function::FunctionOperation;
use crate::render::index::IndexOperation;
use crate::render::policy::PolicyOperation;
use crate::render::privilege::PrivilegeOperation;
use crate::render::schema::SchemaOperation;
use crate::render::sequence::SequenceOperation;
use crate::render::table::TableOperation;
use crate::render::trigger::TriggerOperation;
use crate::render::types::TypeOperation;
use crate::render::view::ViewOperation;
use crate::render::{SqlRenderer, SqlStatement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOperationKind {
    Create,
    Alter,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStep {
    Schema(SchemaOperation),
    Extension(ExtensionOperation),
    Type(TypeOperation),
    Sequence(SequenceOperation),
    Table(TableOperation),
    Index(IndexOperation),
    View(ViewOperation),
    Function(FunctionOperation),
    Trigger(TriggerOperation),
    Policy(PolicyOperation),
    Privilege(PrivilegeOperation),
}

macro_rules! dispatch {
    ($self:expr, $op:ident => $body:expr) => {
        match $self {
            MigrationStep::Schema($op) => $body,
            MigrationStep::Extension($op) => $body,
            MigrationStep::Type($op) => $body,
            MigrationStep::Sequence($op) => $body,
            MigrationStep::Table($op) => $body,
            MigrationStep::Index($op) => $body,
            MigrationStep::View($op) => $body,
            MigrationStep::Function($op) => $body,
            MigrationStep::Trigger($op) => $body,
            MigrationStep::Policy($op) => $body,
            MigrationStep::Privilege($op) => $body,
        }
    };
}

impl MigrationStep {
    pub fn db_object_id(&self) -> ObjectId {
        dispatch!(self, op => op.db_object_id())
    }

    pub fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        dispatch!(self, op => op.to_sql(target_schema))
    }

    pub fn is_destructive(&self) -> bool {
        dispatch!(self, op => op.is_destructive())
    }

    /// `Diff.Type`: a dotted path naming the kind, e.g.
    /// `table`, `table.column`, `table.constraint`, `type`.
    pub fn diff_type(&self) -> &'static str {
        match self {
            MigrationStep::Schema(_) => "schema",
            MigrationStep::Extension(_) => "extension",
            MigrationStep::Type(TypeOperation::AlterDomain { .. }) => "domain",
            MigrationStep::Type(_) => "type",
            MigrationStep::Sequence(_) => "sequence",
            MigrationStep::Table(TableOperation::Create(_) | TableOperation::Drop { .. } | TableOperation::Comment { .. }) => "table",
            MigrationStep::Table(
                TableOperation::AddColumn { .. }
                | TableOperation::DropColumn { .. }
                | TableOperation::AlterColumnType { .. }
                | TableOperation::SetNotNull { .. }
                | TableOperation::DropNotNull { .. }
                | TableOperation::SetDefault { .. }
                | TableOperation::DropDefault { .. }
                | TableOperation::CommentColumn { .. },
            ) => "table.column",
            MigrationStep::Table(
                TableOperation::AddConstraint { .. }
                | TableOperation::DropConstraint { .. }
                | TableOperation::CommentConstraint { .. },
            ) => "table.constraint",
            MigrationStep::Index(_) => "table.index",
            MigrationStep::View(_) => "view",
            MigrationStep::Function(_) => "function",
            MigrationStep::Trigger(_) => "table.trigger",
            MigrationStep::Policy(_) => "table.policy",
            MigrationStep::Privilege(_) => "table.privilege",
        }
    }

    pub fn operation_kind(&self) -> DiffOperationKind {
        match self {
            MigrationStep::Schema(op) => match op {
                SchemaOperation::Create(_) => DiffOperationKind::Create,
                SchemaOperation::Drop { .. } => DiffOperationKind::Drop,
                SchemaOperation::AlterOwner { .. } => DiffOperationKind::Alter,
            },
            MigrationStep::Extension(op) => match op {
                ExtensionOperation::Create(_) => DiffOperationKind::Create,
                ExtensionOperation::Drop { .. } => DiffOperationKind::Drop,
            },
            MigrationStep::Type(op) => match op {
                TypeOperation::Create(_) => DiffOperationKind::Create,
                TypeOperation::Drop { .. } => DiffOperationKind::Drop,
                TypeOperation::AlterEnum { .. } | TypeOperation::AlterDomain { .. } => {
                    DiffOperationKind::Alter
                }
            },
            MigrationStep::Sequence(op) => match op {
                SequenceOperation::Create(_) => DiffOperationKind::Create,
                SequenceOperation::Drop { .. } => DiffOperationKind::Drop,
                SequenceOperation::Alter { .. } => DiffOperationKind::Alter,
            },
            MigrationStep::Table(op) => match op {
                TableOperation::Create(_) => DiffOperationKind::Create,
                TableOperation::Drop { .. }
                | TableOperation::DropColumn { .. }
                | TableOperation::DropConstraint { .. } => DiffOperationKind::Drop,
                _ => DiffOperationKind::Alter,
            },
            MigrationStep::Index(op) => match op {
                IndexOperation::Create { .. } => DiffOperationKind::Create,
                IndexOperation::Drop { .. } => DiffOperationKind::Drop,
                IndexOperation::Comment { .. } => DiffOperationKind::Alter,
            },
            MigrationStep::View(op) => match op {
                ViewOperation::CreateOrReplace(_) => DiffOperationKind::Create,
                ViewOperation::Drop { .. } => DiffOperationKind::Drop,
            },
            MigrationStep::Function(op) => match op {
                FunctionOperation::CreateOrReplace(_) => DiffOperationKind::Create,
                FunctionOperation::Drop { .. } => DiffOperationKind::Drop,
            },
            MigrationStep::Trigger(op) => match op {
                TriggerOperation::CreateOrReplace(_) => DiffOperationKind::Create,
                TriggerOperation::Drop { .. } => DiffOperationKind::Drop,
            },
            MigrationStep::Policy(op) => match op {
                PolicyOperation::Create(_) => DiffOperationKind::Create,
                PolicyOperation::Drop { .. } => DiffOperationKind::Drop,
                PolicyOperation::Replace { .. }
                | PolicyOperation::Alter { .. }
                | PolicyOperation::SetRowLevelSecurity { .. } => DiffOperationKind::Alter,
            },
            MigrationStep::Privilege(op) => match op {
                PrivilegeOperation::Grant { .. } => DiffOperationKind::Create,
                PrivilegeOperation::Revoke { .. } => DiffOperationKind::Drop,
                PrivilegeOperation::RevokeGrantOption { .. } => DiffOperationKind::Alter,
            },
        }
    }

    /// `Diff.Path`: `<schema>.<object>[.<child>]`.
    pub fn path(&self, target_schema: &str) -> String {
        let id = self.db_object_id();
        let schema = id.schema().unwrap_or(target_schema);
        format!("{schema}.{}", object_path_suffix(&id))
    }
}

fn object_path_suffix(id: &ObjectId) -> String {
    match id {
        ObjectId::Schema { name } => name.clone(),
        ObjectId::Extension { name } => name.clone(),
        ObjectId::Type { name, .. } | ObjectId::Domain { name, .. } => name.clone(),
        ObjectId::Sequence { name, .. } => name.clone(),
        ObjectId::Table { name, .. } => name.clone(),
        ObjectId::Column { table, column, .. } => format!("{table}.{column}"),
        ObjectId::Constraint { table, name, .. } => format!("{table}.{name}"),
        ObjectId::Index { name, .. } => name.clone(),
        ObjectId::View { name, .. } => name.clone(),
        ObjectId::Function { name, arguments, .. } => format!("{name}({arguments})"),
        ObjectId::Trigger { table, name, .. } => format!("{table}.{name}"),
        ObjectId::Policy { table, name, .. } => format!("{table}.{name}"),
        ObjectId::ColumnPrivilege { table, grantee, .. } => format!("{table}.{grantee}"),
    }
}
