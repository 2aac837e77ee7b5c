//! Sequence statement rendering.

use crate::ir::sequence::{DEFAULT_CACHE, DEFAULT_INCREMENT, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_START};
use crate::ir::{ObjectId, Sequence};
use crate::render::{qualify, quote_ident, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceAlterItem {
    Restart(i64),
    Increment(i64),
    MinValue(Option<i64>),
    MaxValue(Option<i64>),
    Cache(i64),
    Cycle(bool),
    DataType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceOperation {
    Create(Sequence),
    Drop { schema: String, name: String },
    Alter {
        schema: String,
        name: String,
        items: Vec<SequenceAlterItem>,
    },
}

impl SqlRenderer for SequenceOperation {
    fn db_object_id(&self) -> ObjectId {
        let (schema, name) = match self {
            SequenceOperation::Create(s) => (s.schema.clone(), s.name.clone()),
            SequenceOperation::Drop { schema, name }
            | SequenceOperation::Alter { schema, name, .. } => (schema.clone(), name.clone()),
        };
        ObjectId::Sequence { schema, name }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            SequenceOperation::Create(seq) => {
                let q = qualify(&seq.schema, &seq.name, target_schema);
                let mut sql = format!("CREATE SEQUENCE IF NOT EXISTS {q}");
                if seq.effective_data_type() != "bigint" {
                    sql.push_str(&format!(" AS {}", seq.effective_data_type()));
                }
                if seq.start_value != DEFAULT_START {
                    sql.push_str(&format!(" START WITH {}", seq.start_value));
                }
                if seq.increment != DEFAULT_INCREMENT {
                    sql.push_str(&format!(" INCREMENT BY {}", seq.increment));
                }
                if seq.effective_min() != DEFAULT_MIN {
                    sql.push_str(&format!(" MINVALUE {}", seq.effective_min()));
                }
                if seq.effective_max() != DEFAULT_MAX {
                    sql.push_str(&format!(" MAXVALUE {}", seq.effective_max()));
                }
                if seq.effective_cache() != DEFAULT_CACHE {
                    sql.push_str(&format!(" CACHE {}", seq.effective_cache()));
                }
                if seq.cycle {
                    sql.push_str(" CYCLE");
                }
                if let Some((table, column)) = &seq.owned_by {
                    sql.push_str(&format!(
                        " OWNED BY {}.{}",
                        quote_ident(table),
                        quote_ident(column)
                    ));
                }
                sql.push(';');
                vec![SqlStatement::new(sql)]
            }
            SequenceOperation::Drop { schema, name } => {
                let q = qualify(schema, name, target_schema);
                vec![SqlStatement::new(format!(
                    "DROP SEQUENCE IF EXISTS {q} CASCADE;"
                ))]
            }
            SequenceOperation::Alter {
                schema,
                name,
                items,
            } => {
                let q = qualify(schema, name, target_schema);
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        SequenceAlterItem::Restart(n) => format!("RESTART WITH {n}"),
                        SequenceAlterItem::Increment(n) => format!("INCREMENT BY {n}"),
                        SequenceAlterItem::MinValue(Some(n)) => format!("MINVALUE {n}"),
                        SequenceAlterItem::MinValue(None) => "NO MINVALUE".to_string(),
                        SequenceAlterItem::MaxValue(Some(n)) => format!("MAXVALUE {n}"),
                        SequenceAlterItem::MaxValue(None) => "NO MAXVALUE".to_string(),
                        SequenceAlterItem::Cache(n) => format!("CACHE {n}"),
                        SequenceAlterItem::Cycle(true) => "CYCLE".to_string(),
                        SequenceAlterItem::Cycle(false) => "NO CYCLE".to_string(),
                        SequenceAlterItem::DataType(t) => format!("AS {t}"),
                    })
                    .collect();
                vec![SqlStatement::new(format!(
                    "ALTER SEQUENCE {q} {};",
                    parts.join(" ")
                ))]
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, SequenceOperation::Drop { .. })
    }
}
