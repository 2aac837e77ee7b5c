//! View statement rendering.

use crate::ir::{ObjectId, View};
use crate::render::{qualify, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOperation {
    CreateOrReplace(View),
    Drop { schema: String, name: String },
}

impl SqlRenderer for ViewOperation {
    fn db_object_id(&self) -> ObjectId {
        let (schema, name) = match self {
            ViewOperation::CreateOrReplace(v) => (v.schema.clone(), v.name.clone()),
            ViewOperation::Drop { schema, name } => (schema.clone(), name.clone()),
        };
        ObjectId::View { schema, name }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            ViewOperation::CreateOrReplace(view) => {
                let q = qualify(&view.schema, &view.name, target_schema);
                vec![SqlStatement::new(format!(
                    "CREATE OR REPLACE VIEW {q} AS {};",
                    view.definition.trim_end_matches(';').trim()
                ))]
            }
            ViewOperation::Drop { schema, name } => {
                let q = qualify(schema, name, target_schema);
                vec![SqlStatement::new(format!(
                    "DROP VIEW IF EXISTS {q} CASCADE;"
                ))]
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, ViewOperation::Drop { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_or_replace() {
        let v = View {
            schema: "public".into(),
            name: "active_users".into(),
            definition: "SELECT * FROM users WHERE active".into(),
        };
        assert_eq!(
            ViewOperation::CreateOrReplace(v).to_sql("public")[0].sql,
            "CREATE OR REPLACE VIEW active_users AS SELECT * FROM users WHERE active;"
        );
    }

    #[test]
    fn drop_cascades() {
        let op = ViewOperation::Drop {
            schema: "public".into(),
            name: "active_users".into(),
        };
        assert_eq!(
            op.to_sql("public")[0].sql,
            "DROP VIEW IF EXISTS active_users CASCADE;"
        );
    }
}
