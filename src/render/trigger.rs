//! Trigger statement rendering.

use crate::ir::trigger::{Trigger, TriggerEvent, TriggerLevel, TriggerTiming};
use crate::ir::ObjectId;
use crate::render::{qualify, quote_ident, SqlRenderer, SqlStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOperation {
    CreateOrReplace(Trigger),
    Drop { schema: String, table: String, name: String },
}

fn timing_sql(timing: TriggerTiming) -> &'static str {
    match timing {
        TriggerTiming::Before => "BEFORE",
        TriggerTiming::After => "AFTER",
        TriggerTiming::InsteadOf => "INSTEAD OF",
    }
}

fn event_sql(event: TriggerEvent) -> &'static str {
    match event {
        TriggerEvent::Insert => "INSERT",
        TriggerEvent::Update => "UPDATE",
        TriggerEvent::Delete => "DELETE",
    }
}

fn level_sql(level: TriggerLevel) -> &'static str {
    match level {
        TriggerLevel::Row => "ROW",
        TriggerLevel::Statement => "STATEMENT",
    }
}

impl SqlRenderer for TriggerOperation {
    fn db_object_id(&self) -> ObjectId {
        let (schema, table, name) = match self {
            TriggerOperation::CreateOrReplace(t) => {
                (t.schema.clone(), t.table.clone(), t.name.clone())
            }
            TriggerOperation::Drop { schema, table, name } => {
                (schema.clone(), table.clone(), name.clone())
            }
        };
        ObjectId::Trigger { schema, table, name }
    }

    fn to_sql(&self, target_schema: &str) -> Vec<SqlStatement> {
        match self {
            TriggerOperation::CreateOrReplace(t) => {
                let table_q = qualify(&t.schema, &t.table, target_schema);
                let events = t
                    .events_in_canonical_order()
                    .into_iter()
                    .map(event_sql)
                    .collect::<Vec<_>>()
                    .join(" OR ");
                let mut sql = format!(
                    "CREATE OR REPLACE TRIGGER {}\n    {} {events} ON {table_q}\n    FOR EACH {}",
                    quote_ident(&t.name),
                    timing_sql(t.timing),
                    level_sql(t.level)
                );
                if let Some(cond) = &t.condition {
                    sql.push_str(&format!("\n    WHEN ({cond})"));
                }
                sql.push_str(&format!("\n    EXECUTE FUNCTION {};", t.function));
                vec![SqlStatement::new(sql)]
            }
            TriggerOperation::Drop { schema, table, name } => {
                let table_q = qualify(schema, table, target_schema);
                vec![SqlStatement::new(format!(
                    "DROP TRIGGER IF EXISTS {} ON {table_q};",
                    quote_ident(name)
                ))]
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, TriggerOperation::Drop { .. })
    }
}
