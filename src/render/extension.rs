//! Extension statement rendering.

use crate::ir::{Extension, ObjectId};
use crate::render::{quote_ident, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionOperation {
    Create(Extension),
    Drop { name: String },
}

impl SqlRenderer for ExtensionOperation {
    fn db_object_id(&self) -> ObjectId {
        let name = match self {
            ExtensionOperation::Create(e) => e.name.clone(),
            ExtensionOperation::Drop { name } => name.clone(),
        };
        ObjectId::Extension { name }
    }

    fn to_sql(&self, _target_schema: &str) -> Vec<SqlStatement> {
        match self {
            ExtensionOperation::Create(ext) => {
                let mut sql = format!("CREATE EXTENSION IF NOT EXISTS {}", quote_ident(&ext.name));
                if let Some(schema) = &ext.schema {
                    if !schema.is_empty() {
                        sql.push_str(&format!(" WITH SCHEMA {}", quote_ident(schema)));
                    }
                }
                sql.push(';');
                vec![SqlStatement::new(sql)]
            }
            ExtensionOperation::Drop { name } => vec![SqlStatement::new(format!(
                "DROP EXTENSION IF EXISTS {};",
                quote_ident(name)
            ))],
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, ExtensionOperation::Drop { .. })
    }
}
