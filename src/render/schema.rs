//! Schema statement rendering.

use crate::ir::{ObjectId, Schema};
use crate::render::{quote_ident, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOperation {
    Create(Schema),
    Drop { name: String },
    AlterOwner { name: String, new_owner: String },
}

impl SqlRenderer for SchemaOperation {
    fn db_object_id(&self) -> ObjectId {
        let name = match self {
            SchemaOperation::Create(s) => s.name.clone(),
            SchemaOperation::Drop { name } | SchemaOperation::AlterOwner { name, .. } => {
                name.clone()
            }
        };
        ObjectId::Schema { name }
    }

    fn to_sql(&self, _target_schema: &str) -> Vec<SqlStatement> {
        match self {
            SchemaOperation::Create(schema) => {
                let q = quote_ident(&schema.name);
                let sql = match &schema.owner {
                    Some(owner) if !owner.is_empty() => {
                        format!("CREATE SCHEMA {q} AUTHORIZATION {};", quote_ident(owner))
                    }
                    _ => format!("CREATE SCHEMA {q};"),
                };
                vec![SqlStatement::new(sql)]
            }
            SchemaOperation::Drop { name } => {
                vec![SqlStatement::new(format!(
                    "DROP SCHEMA IF EXISTS {} CASCADE;",
                    quote_ident(name)
                ))]
            }
            SchemaOperation::AlterOwner { name, new_owner } => {
                vec![SqlStatement::new(format!(
                    "ALTER SCHEMA {} OWNER TO {};",
                    quote_ident(name),
                    quote_ident(new_owner)
                ))]
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, SchemaOperation::Drop { .. })
    }
}
