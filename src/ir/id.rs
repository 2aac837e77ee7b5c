//! A globally unique identifier for any database object this crate knows
//! about. No `Aggregate`, no standalone `Grant` or `Comment` variants —
//! comments are attached to the owning object's identity, and column
//! privileges carry their own composite key below.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectId {
    Schema {
        name: String,
    },
    Extension {
        name: String,
    },
    Type {
        schema: String,
        name: String,
    },
    Domain {
        schema: String,
        name: String,
    },
    Sequence {
        schema: String,
        name: String,
    },
    Table {
        schema: String,
        name: String,
    },
    Column {
        schema: String,
        table: String,
        column: String,
    },
    Constraint {
        schema: String,
        table: String,
        name: String,
    },
    Index {
        schema: String,
        name: String,
    },
    View {
        schema: String,
        name: String,
    },
    Function {
        schema: String,
        name: String,
        arguments: String,
    },
    Trigger {
        schema: String,
        table: String,
        name: String,
    },
    Policy {
        schema: String,
        table: String,
        name: String,
    },
    ColumnPrivilege {
        schema: String,
        table: String,
        grantee: String,
    },
}

impl ObjectId {
    /// The schema this object lives in, if any (Extensions are database-wide).
    pub fn schema(&self) -> Option<&str> {
        match self {
            ObjectId::Schema { name } => Some(name.as_str()),
            ObjectId::Extension { .. } => None,
            ObjectId::Type { schema, .. }
            | ObjectId::Domain { schema, .. }
            | ObjectId::Sequence { schema, .. }
            | ObjectId::Table { schema, .. }
            | ObjectId::Column { schema, .. }
            | ObjectId::Constraint { schema, .. }
            | ObjectId::Index { schema, .. }
            | ObjectId::View { schema, .. }
            | ObjectId::Function { schema, .. }
            | ObjectId::Trigger { schema, .. }
            | ObjectId::Policy { schema, .. }
            | ObjectId::ColumnPrivilege { schema, .. } => Some(schema.as_str()),
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Schema { name } => write!(f, "schema {name}"),
            ObjectId::Extension { name } => write!(f, "extension {name}"),
            ObjectId::Type { schema, name } => write!(f, "type {schema}.{name}"),
            ObjectId::Domain { schema, name } => write!(f, "domain {schema}.{name}"),
            ObjectId::Sequence { schema, name } => write!(f, "sequence {schema}.{name}"),
            ObjectId::Table { schema, name } => write!(f, "table {schema}.{name}"),
            ObjectId::Column {
                schema,
                table,
                column,
            } => write!(f, "column {schema}.{table}.{column}"),
            ObjectId::Constraint {
                schema,
                table,
                name,
            } => write!(f, "constraint {schema}.{table}.{name}"),
            ObjectId::Index { schema, name } => write!(f, "index {schema}.{name}"),
            ObjectId::View { schema, name } => write!(f, "view {schema}.{name}"),
            ObjectId::Function {
                schema,
                name,
                arguments,
            } => write!(f, "function {schema}.{name}({arguments})"),
            ObjectId::Trigger {
                schema,
                table,
                name,
            } => write!(f, "trigger {schema}.{table}.{name}"),
            ObjectId::Policy {
                schema,
                table,
                name,
            } => write!(f, "policy {schema}.{table}.{name}"),
            ObjectId::ColumnPrivilege {
                schema,
                table,
                grantee,
            } => write!(f, "privilege {schema}.{table}@{grantee}"),
        }
    }
}
