//! Function statement rendering.

use crate::ir::{Function, ObjectId};
use crate::render::{qualify, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionOperation {
    CreateOrReplace(Function),
    Drop {
        schema: String,
        name: String,
        arguments: String,
    },
}

impl SqlRenderer for FunctionOperation {
    fn db_object_id(&self) -> ObjectId {
        let (schema, name, arguments) = match self {
            FunctionOperation::CreateOrReplace(f) => {
                (f.schema.clone(), f.name.clone(), f.arguments.clone())
            }
            FunctionOperation::Drop {
                schema,
                name,
                arguments,
            } => (schema.clone(), name.clone(), arguments.clone()),
        };
        ObjectId::Function {
            schema,
            name,
            arguments,
        }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            FunctionOperation::CreateOrReplace(f) => {
                let q = qualify(&f.schema, &f.name, target_schema);
                vec![SqlStatement::new(format!(
                    "CREATE OR REPLACE FUNCTION {q}({}) {}",
                    f.arguments,
                    f.definition.trim_end()
                ))]
            }
            FunctionOperation::Drop {
                schema,
                name,
                arguments,
            } => {
                let q = qualify(schema, name, target_schema);
                vec![SqlStatement::new(format!(
                    "DROP FUNCTION IF EXISTS {q}({arguments}) CASCADE;"
                ))]
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, FunctionOperation::Drop { .. })
    }
}
