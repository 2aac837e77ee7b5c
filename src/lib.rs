//! Computes minimal, dependency-correct, deterministic DDL migrations
//! between two PostgreSQL schema snapshots.
//!
//! The crate holds no I/O: [`Snapshot`] is handed in fully formed by an
//! external inspector or parser, and [`generate_migration`] returns an
//! ordered [`collector::Diff`] list a caller renders or executes.

pub mod collector;
pub mod error;
pub mod ir;
pub mod operations;
pub mod order;
pub mod render;
pub mod topo;

mod diff;

pub use collector::{Diff, DiffCollector};
pub use error::{DiffError, Result};
pub use ir::Snapshot;
pub use render::index::EmissionMode;

/// The only configuration this crate accepts: the schema the migration
/// will run against (identifier qualification is elided when an object's
/// own schema equals this one) and which index-creation strategy to emit.
#[derive(Debug, Clone)]
pub struct Config {
    pub target_schema: String,
    pub emission_mode: EmissionMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_schema: "public".to_string(),
            emission_mode: EmissionMode::Dump,
        }
    }
}

fn validate(snapshot: &Snapshot) -> Result<()> {
    for table in &snapshot.tables {
        for constraint in &table.constraints {
            for col in &constraint.columns {
                if table.column(&col.name).is_none() {
                    return Err(DiffError::InvalidIr {
                        object: constraint.id(),
                        reference: ir::ObjectId::Column {
                            schema: table.schema.clone(),
                            table: table.name.clone(),
                            column: col.name.clone(),
                        },
                    });
                }
            }
            if let ir::ConstraintKind::ForeignKey {
                referenced_schema,
                referenced_table,
                ..
            } = &constraint.kind
            {
                if snapshot
                    .table(referenced_schema, referenced_table)
                    .is_none()
                {
                    return Err(DiffError::InvalidIr {
                        object: constraint.id(),
                        reference: ir::ObjectId::Table {
                            schema: referenced_schema.clone(),
                            name: referenced_table.clone(),
                        },
                    });
                }
            }
        }
        for trigger in &table.triggers {
            if trigger.schema != table.schema || trigger.table != table.name {
                return Err(DiffError::InvalidIr {
                    object: trigger.id(),
                    reference: table.id(),
                });
            }
        }
        for policy in &table.policies {
            if policy.schema != table.schema || policy.table != table.name {
                return Err(DiffError::InvalidIr {
                    object: policy.id(),
                    reference: table.id(),
                });
            }
        }
    }
    Ok(())
}

/// Diffs `old` against `new` and returns the ordered migration.
///
/// Non-fatal conditions (an unnamed domain constraint removal, an
/// ambiguous function call) are logged via `tracing::warn!` and also
/// returned alongside the diff list rather than aborting it.
pub fn generate_migration(
    old: &Snapshot,
    new: &Snapshot,
    config: &Config,
) -> Result<(Vec<Diff>, Vec<DiffError>)> {
    validate(old)?;
    validate(new)?;

    let (migration_steps, warnings) = order::generate(
        old,
        new,
        &config.target_schema,
        config.emission_mode,
    );

    for warning in &warnings {
        tracing::warn!(%warning, "non-fatal diff condition");
    }

    let mut collector = DiffCollector::new();
    for step in &migration_steps {
        collector.push_step(step, &config.target_schema)?;
    }

    Ok((collector.into_vec(), warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_snapshots_produce_no_diff() {
        let snapshot = Snapshot::default();
        let config = Config::default();
        let (diffs, warnings) = generate_migration(&snapshot, &snapshot, &config).unwrap();
        assert!(diffs.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn invalid_fk_target_is_rejected() {
        use crate::ir::constraint::{Constraint, ConstraintColumn, ConstraintKind};
        use crate::ir::table::Table;

        let table = Table {
            schema: "public".into(),
            name: "orders".into(),
            columns: vec![crate::ir::column::Column {
                name: "user_id".into(),
                data_type: "bigint".into(),
                is_nullable: false,
                default_value: None,
                max_length: None,
                identity_generation: None,
                comment: None,
            }],
            constraints: vec![Constraint {
                schema: "public".into(),
                table: "orders".into(),
                name: "orders_user_fk".into(),
                kind: ConstraintKind::ForeignKey {
                    referenced_schema: "public".into(),
                    referenced_table: "users".into(),
                    referenced_columns: vec!["id".into()],
                    update_rule: "NO ACTION".into(),
                    delete_rule: "NO ACTION".into(),
                    deferrable: false,
                    initially_deferred: false,
                },
                columns: vec![ConstraintColumn {
                    name: "user_id".into(),
                    position: 1,
                }],
                comment: None,
            }],
            indexes: vec![],
            triggers: vec![],
            policies: vec![],
            rls_enabled: false,
            comment: None,
        };
        let mut snapshot = Snapshot::default();
        snapshot.tables.push(table);

        let config = Config::default();
        let err = generate_migration(&snapshot, &snapshot, &config).unwrap_err();
        assert!(matches!(err, DiffError::InvalidIr { .. }));
    }
}
