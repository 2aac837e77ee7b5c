//! The 20-phase global migration order. The diff builders in `diff::*`
//! classify individual objects as added/dropped/modified; this module is
//! the only place that decides in what order their output actually runs.

use std::collections::BTreeMap;

use crate::error::DiffError;
use crate::ir::table::Table;
use crate::ir::Snapshot;
use crate::operations::{DiffOperationKind, MigrationStep};
use crate::render::index::EmissionMode;
use crate::render::policy::PolicyOperation;
use crate::{diff, topo};

fn table_key(t: &Table) -> (String, String) {
    (t.schema.clone(), t.name.clone())
}

fn split_by_kind(
    steps: Vec<MigrationStep>,
    kind: DiffOperationKind,
) -> (Vec<MigrationStep>, Vec<MigrationStep>) {
    steps
        .into_iter()
        .partition(|s| s.operation_kind() == kind)
}

/// A function is referenced by a policy expression if its bare name
/// appears as a call (`name(`), word-bounded, in the policy's USING or
/// WITH CHECK clause.
fn policy_references_function(policy_expr: &str, function_name: &str) -> bool {
    let pattern = format!("{function_name}(");
    let mut search_from = 0;
    while let Some(pos) = policy_expr[search_from..].find(&pattern) {
        let abs = search_from + pos;
        let boundary_ok = abs == 0
            || !policy_expr.as_bytes()[abs - 1].is_ascii_alphanumeric()
                && policy_expr.as_bytes()[abs - 1] != b'_';
        if boundary_ok {
            return true;
        }
        search_from = abs + pattern.len();
    }
    false
}

pub fn generate(
    old: &Snapshot,
    new: &Snapshot,
    target_schema: &str,
    mode: EmissionMode,
) -> (Vec<MigrationStep>, Vec<DiffError>) {
    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    let old_tables_by_key: BTreeMap<(String, String), &Table> =
        old.tables.iter().map(|t| (table_key(t), t)).collect();

    let matched_tables: Vec<(&Table, &Table)> = new
        .tables
        .iter()
        .filter_map(|nt| old_tables_by_key.get(&table_key(nt)).map(|ot| (*ot, nt)))
        .collect();

    // Per-table policy/trigger/index/column/constraint diffs, computed once
    // and partitioned by operation kind into the phases below.
    let mut policy_drops = Vec::new();
    let mut policy_creates = Vec::new();
    let mut policy_alters = Vec::new();
    let mut trigger_drops = Vec::new();
    let mut trigger_creates = Vec::new();
    let mut trigger_alters = Vec::new();
    let mut index_drops = Vec::new();
    let mut index_creates = Vec::new();
    let mut constraint_drops = Vec::new();
    let mut constraint_creates = Vec::new();
    let mut column_steps = Vec::new();
    let mut rls_disables = Vec::new();
    let mut rls_enables = Vec::new();
    let mut table_comments = Vec::new();

    for (old_t, new_t) in &matched_tables {
        let (drops, rest) = split_by_kind(
            diff::policies::diff(&old_t.policies, &new_t.policies),
            DiffOperationKind::Drop,
        );
        policy_drops.extend(drops);
        let (creates, alters) = split_by_kind(rest, DiffOperationKind::Create);
        policy_creates.extend(creates);
        policy_alters.extend(alters);

        let (drops, rest) = split_by_kind(
            diff::triggers::diff(&old_t.triggers, &new_t.triggers),
            DiffOperationKind::Drop,
        );
        trigger_drops.extend(drops);
        let (creates, alters) = split_by_kind(rest, DiffOperationKind::Create);
        trigger_creates.extend(creates);
        trigger_alters.extend(alters);

        let (drops, creates) = split_by_kind(
            diff::indexes::diff(&old_t.indexes, &new_t.indexes, mode),
            DiffOperationKind::Drop,
        );
        index_drops.extend(drops);
        index_creates.extend(creates);

        let (drops, creates) = split_by_kind(
            diff::constraints::diff(&old_t.schema, &old_t.name, &old_t.constraints, &new_t.constraints),
            DiffOperationKind::Drop,
        );
        constraint_drops.extend(drops);
        constraint_creates.extend(creates);

        column_steps.extend(diff::columns::diff(
            &new_t.schema,
            &new_t.name,
            &old_t.columns,
            &new_t.columns,
        ));

        if old_t.rls_enabled && !new_t.rls_enabled {
            rls_disables.push(MigrationStep::Policy(PolicyOperation::SetRowLevelSecurity {
                schema: new_t.schema.clone(),
                table: new_t.name.clone(),
                enabled: false,
            }));
        } else if !old_t.rls_enabled && new_t.rls_enabled {
            rls_enables.push(MigrationStep::Policy(PolicyOperation::SetRowLevelSecurity {
                schema: new_t.schema.clone(),
                table: new_t.name.clone(),
                enabled: true,
            }));
        }

        if old_t.comment != new_t.comment {
            table_comments.push(MigrationStep::Table(
                crate::render::table::TableOperation::Comment {
                    schema: new_t.schema.clone(),
                    name: new_t.name.clone(),
                    comment: new_t.comment.clone(),
                },
            ));
        }
    }

    // Phase 1: drop policies, drop triggers, disable RLS.
    steps.extend(policy_drops);
    steps.extend(trigger_drops);
    steps.extend(rls_disables);

    // Phase 2: drop column privileges.
    let priv_steps = diff::privileges::diff(&old.column_privileges, &new.column_privileges);
    let (priv_drops, priv_rest) = split_by_kind(priv_steps, DiffOperationKind::Drop);
    steps.extend(priv_drops);

    // Phase 3: drop views.
    let view_steps = diff::views::diff(&old.views, &new.views);
    let (view_drops, view_rest) = split_by_kind(view_steps, DiffOperationKind::Drop);
    steps.extend(view_drops);

    // Phase 4: drop functions, drop indexes.
    let func_steps = diff::functions::diff(&old.functions, &new.functions);
    let (func_drops, func_rest) = split_by_kind(func_steps, DiffOperationKind::Drop);
    steps.extend(func_drops);
    steps.extend(index_drops);

    // Phase 5: drop table constraints being removed.
    steps.extend(constraint_drops);

    // Phase 6: drop tables, reverse topological order of the old FK graph.
    let dropped_tables: Vec<Table> = old
        .tables
        .iter()
        .filter(|t| !new.tables.iter().any(|nt| table_key(nt) == table_key(t)))
        .cloned()
        .collect();
    for table in topo::tables::sort(&dropped_tables).into_iter().rev() {
        steps.push(MigrationStep::Table(
            crate::render::table::TableOperation::Drop {
                schema: table.schema.clone(),
                name: table.name.clone(),
            },
        ));
    }

    // Phase 7: drop sequences, reverse order.
    let seq_steps = diff::sequences::diff(&old.sequences, &new.sequences);
    let (mut seq_drops, seq_rest) = split_by_kind(seq_steps, DiffOperationKind::Drop);
    seq_drops.reverse();
    steps.extend(seq_drops);

    // Phase 8: drop types/domains, reverse topological order.
    let (type_steps, type_warnings) = diff::types::diff(&old.types, &new.types);
    warnings.extend(type_warnings);
    let (type_drops, type_rest) = split_by_kind(type_steps, DiffOperationKind::Drop);
    let dropped_types: Vec<_> = type_drops
        .iter()
        .filter_map(|s| match s {
            MigrationStep::Type(crate::render::types::TypeOperation::Drop {
                schema,
                name,
                kind,
            }) => Some(crate::ir::types::Type {
                schema: schema.clone(),
                name: name.clone(),
                kind: kind.clone(),
            }),
            _ => None,
        })
        .collect();
    for t in topo::types::sort(&dropped_types).into_iter().rev() {
        steps.push(MigrationStep::Type(
            crate::render::types::TypeOperation::Drop {
                schema: t.schema.clone(),
                name: t.name.clone(),
                kind: t.kind.clone(),
            },
        ));
    }

    // Phase 9: drop extensions, drop schemas.
    let ext_steps = diff::extensions::diff(&old.extensions, &new.extensions);
    let (ext_drops, ext_rest) = split_by_kind(ext_steps, DiffOperationKind::Drop);
    steps.extend(ext_drops);
    let schema_steps = diff::schemas::diff(&old.schemas, &new.schemas, target_schema);
    let (schema_drops, schema_rest) = split_by_kind(schema_steps, DiffOperationKind::Drop);
    steps.extend(schema_drops);

    // Phase 10: create schemas, create extensions.
    let (schema_creates, schema_alters) = split_by_kind(schema_rest, DiffOperationKind::Create);
    steps.extend(schema_creates);
    let (ext_creates, ext_alters) = split_by_kind(ext_rest, DiffOperationKind::Create);
    steps.extend(ext_creates);

    // Phase 11: create types, topological.
    let (type_creates, type_alters) = split_by_kind(type_rest, DiffOperationKind::Create);
    steps.extend(type_creates);

    // Phase 12: create sequences.
    let (seq_creates, seq_alters) = split_by_kind(seq_rest, DiffOperationKind::Create);
    steps.extend(seq_creates);

    // Phase 13: create tables, topological; inline constraints/indexes,
    // then owned indexes, policies, triggers, RLS enable.
    let added_tables: Vec<Table> = new
        .tables
        .iter()
        .filter(|t| !old_tables_by_key.contains_key(&table_key(t)))
        .cloned()
        .collect();
    for table in topo::tables::sort(&added_tables) {
        steps.push(MigrationStep::Table(
            crate::render::table::TableOperation::Create(table.clone()),
        ));
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
            steps.push(MigrationStep::Policy(PolicyOperation::SetRowLevelSecurity {
                schema: table.schema.clone(),
                table: table.name.clone(),
                enabled: true,
            }));
        }
    }

    // Phase 14: modify existing tables (columns, constraints).
    steps.extend(column_steps);
    steps.extend(constraint_creates);

    // Phase 15: create remaining indexes (on pre-existing tables).
    steps.extend(index_creates);

    // Phase 16: create views.
    let (view_creates, view_alters) = split_by_kind(view_rest, DiffOperationKind::Create);
    steps.extend(view_creates);

    // Phase 17: create functions, topological; interleave policies that
    // reference a newly created function immediately after it.
    let added_functions: Vec<crate::ir::function::Function> = func_rest
        .iter()
        .filter_map(|s| match s {
            MigrationStep::Function(crate::render::function::FunctionOperation::CreateOrReplace(
                f,
            )) => Some(f.clone()),
            _ => None,
        })
        .collect();
    let func_alters: Vec<MigrationStep> = func_rest
        .into_iter()
        .filter(|s| {
            !matches!(
                s,
                MigrationStep::Function(crate::render::function::FunctionOperation::CreateOrReplace(_))
            )
        })
        .collect();

    let call_graph = topo::functions::build(&added_functions, target_schema);
    warnings.extend(call_graph.ambiguous.iter().map(|a| DiffError::AmbiguousFunctionCall {
        caller: a.caller.clone(),
        call_name: a.call_name.clone(),
        candidate_count: a.candidate_count,
        picked: a.picked.clone(),
    }));

    let mut remaining_policy_creates = policy_creates;
    for idx in call_graph.order {
        let f = &added_functions[idx];
        steps.push(MigrationStep::Function(
            crate::render::function::FunctionOperation::CreateOrReplace(f.clone()),
        ));
        let (referencing, rest): (Vec<_>, Vec<_>) = remaining_policy_creates.into_iter().partition(|s| {
            if let MigrationStep::Policy(PolicyOperation::Create(p)) = s {
                p.using_expr
                    .as_deref()
                    .is_some_and(|e| policy_references_function(e, &f.name))
                    || p.with_check_expr
                        .as_deref()
                        .is_some_and(|e| policy_references_function(e, &f.name))
            } else {
                false
            }
        });
        steps.extend(referencing);
        remaining_policy_creates = rest;
    }

    // Phase 18: create remaining triggers/policies, enable/disable RLS.
    steps.extend(trigger_creates);
    steps.extend(remaining_policy_creates);
    steps.extend(rls_enables);

    // Phase 19: apply column privilege grants/revokes.
    steps.extend(priv_rest);

    // Phase 20: alters.
    steps.extend(schema_alters);
    steps.extend(ext_alters);
    steps.extend(type_alters);
    steps.extend(seq_alters);
    steps.extend(view_alters);
    steps.extend(func_alters);
    steps.extend(trigger_alters);
    steps.extend(policy_alters);
    steps.extend(table_comments);

    (steps, warnings)
}
