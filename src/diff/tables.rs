//! Diff tables: table-level existence, plus columns, constraints, indexes,
//! triggers, policies, and row-level security for tables present in both
//! snapshots.
//!
//! Added tables emit `CREATE TABLE`, then their owned indexes, triggers,
//! policies, and RLS-enable statement, in that order. Foreign-key
//! dependencies between newly added tables are resolved with the same
//! topological sort used for the final migration order.

use std::collections::BTreeMap;

use crate::ir::table::Table;
use crate::operations::MigrationStep;
use crate::render::index::EmissionMode;
use crate::render::policy::PolicyOperation;
use crate::render::table::TableOperation;
use crate::{diff, topo};

fn table_key(t: &Table) -> (String, String) {
    (t.schema.clone(), t.name.clone())
}

fn emit_new_table(table: &Table, mode: EmissionMode, steps: &mut Vec<MigrationStep>) {
    steps.push(MigrationStep::Table(TableOperation::Create(table.clone())));
    for idx in &table.indexes {
        if idx.is_primary() {
            continue;
        }
        steps.push(MigrationStep::Index(
            crate::render::index::IndexOperation::Create {
                index: idx.clone(),
                mode,
            },
        ));
    }
    let mut triggers = table.triggers.clone();
    triggers.sort_by(|a, b| a.name.cmp(&b.name));
    for t in triggers {
        steps.push(MigrationStep::Trigger(
            crate::render::trigger::TriggerOperation::CreateOrReplace(t),
        ));
    }
    let mut policies = table.policies.clone();
    policies.sort_by(|a, b| a.name.cmp(&b.name));
    for p in policies {
        steps.push(MigrationStep::Policy(PolicyOperation::Create(p)));
    }
    if table.rls_enabled {
        steps.push(MigrationStep::Policy(
            PolicyOperation::SetRowLevelSecurity {
                schema: table.schema.clone(),
                table: table.name.clone(),
                enabled: true,
            },
        ));
    }
}

pub fn diff(old: &[Table], new: &[Table], mode: EmissionMode) -> Vec<MigrationStep> {
    let old_by_key: BTreeMap<(String, String), &Table> =
        old.iter().map(|t| (table_key(t), t)).collect();
    let new_by_key: BTreeMap<(String, String), &Table> =
        new.iter().map(|t| (table_key(t), t)).collect();

    let mut steps = Vec::new();

    let dropped: Vec<Table> = old
        .iter()
        .filter(|t| !new_by_key.contains_key(&table_key(t)))
        .cloned()
        .collect();
    let dropped_sorted = topo::tables::sort(&dropped);
    for table in dropped_sorted.into_iter().rev() {
        if table.rls_enabled {
            steps.push(MigrationStep::Policy(
                PolicyOperation::SetRowLevelSecurity {
                    schema: table.schema.clone(),
                    table: table.name.clone(),
                    enabled: false,
                },
            ));
        }
        steps.push(MigrationStep::Table(TableOperation::Drop {
            schema: table.schema.clone(),
            name: table.name.clone(),
        }));
    }

    let added: Vec<Table> = new
        .iter()
        .filter(|t| !old_by_key.contains_key(&table_key(t)))
        .cloned()
        .collect();
    for table in topo::tables::sort(&added) {
        emit_new_table(table, mode, &mut steps);
    }

    for new_table in new {
        let Some(old_table) = old_by_key.get(&table_key(new_table)) else {
            continue;
        };

        steps.extend(diff::columns::diff(
            &new_table.schema,
            &new_table.name,
            &old_table.columns,
            &new_table.columns,
        ));
        steps.extend(diff::constraints::diff(
            &new_table.schema,
            &new_table.name,
            &old_table.constraints,
            &new_table.constraints,
        ));
        steps.extend(diff::indexes::diff(
            &old_table.indexes,
            &new_table.indexes,
            mode,
        ));
        steps.extend(diff::triggers::diff(&old_table.triggers, &new_table.triggers));
        steps.extend(diff::policies::diff(&old_table.policies, &new_table.policies));

        if old_table.rls_enabled != new_table.rls_enabled {
            steps.push(MigrationStep::Policy(
                PolicyOperation::SetRowLevelSecurity {
                    schema: new_table.schema.clone(),
                    table: new_table.name.clone(),
                    enabled: new_table.rls_enabled,
                },
            ));
        }

        if old_table.comment != new_table.comment {
            steps.push(MigrationStep::Table(TableOperation::Comment {
                schema: new_table.schema.clone(),
                name: new_table.name.clone(),
                comment: new_table.comment.clone(),
            }));
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_table(name: &str) -> Table {
        Table {
            schema: "public".into(),
            name: name.into(),
            columns: vec![],
            constraints: vec![],
            indexes: vec![],
            triggers: vec![],
            policies: vec![],
            rls_enabled: false,
            comment: None,
        }
    }

    #[test]
    fn new_table_with_rls_emits_enable_statement_last() {
        let mut table = empty_table("accounts");
        table.rls_enabled = true;
        let steps = diff(&[], &[table], EmissionMode::Dump);
        assert!(matches!(
            steps.last().unwrap(),
            MigrationStep::Policy(PolicyOperation::SetRowLevelSecurity { enabled: true, .. })
        ));
        assert!(matches!(steps[0], MigrationStep::Table(TableOperation::Create(_))));
    }

    #[test]
    fn dropped_table_disables_rls_before_dropping() {
        let mut table = empty_table("accounts");
        table.rls_enabled = true;
        let steps = diff(&[table], &[], EmissionMode::Dump);
        assert_eq!(steps.len(), 2);
        assert!(matches!(
            steps[0],
            MigrationStep::Policy(PolicyOperation::SetRowLevelSecurity { enabled: false, .. })
        ));
        assert!(matches!(steps[1], MigrationStep::Table(TableOperation::Drop { .. })));
    }

    #[test]
    fn comment_only_change_is_a_comment_step() {
        let mut old = empty_table("accounts");
        old.comment = None;
        let mut new = empty_table("accounts");
        new.comment = Some("ledger".into());
        let steps = diff(&[old], &[new], EmissionMode::Dump);
        assert_eq!(steps.len(), 1);
        assert!(matches!(steps[0], MigrationStep::Table(TableOperation::Comment { .. })));
    }
}
