//! Whole-pipeline integration tests driving `generate_migration` directly
//! against in-memory IR fixtures, asserting on the rendered SQL text.

use pg_ddl_differ::render::index::EmissionMode;
use pg_ddl_differ::Config;
use pg_ddl_differ::{generate_migration, Snapshot};

use pg_ddl_differ::ir::column::Column;
use pg_ddl_differ::ir::constraint::{Constraint, ConstraintColumn, ConstraintKind};
use pg_ddl_differ::ir::index::{Index, IndexColumn, IndexKind, SortDirection};
use pg_ddl_differ::ir::policy::{Policy, PolicyCommand};
use pg_ddl_differ::ir::table::Table;
use pg_ddl_differ::ir::types::{Type, TypeKind};

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

fn nullable_column(name: &str) -> Column {
    Column {
        name: name.into(),
        data_type: "text".into(),
        is_nullable: true,
        default_value: None,
        max_length: None,
        identity_generation: None,
        comment: None,
    }
}

fn snapshot_with_tables(tables: Vec<Table>) -> Snapshot {
    let mut snapshot = Snapshot::default();
    snapshot.tables = tables;
    snapshot
}

fn all_sql(diffs: &[pg_ddl_differ::Diff]) -> String {
    diffs
        .iter()
        .flat_map(|d| d.statements.iter())
        .map(|s| s.sql.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn not_null_addition_emits_online_safe_three_step_pattern() {
    let mut old_table = empty_table("users");
    let mut email = nullable_column("email");
    old_table.columns.push(email.clone());

    let mut new_table = old_table.clone();
    email.is_nullable = false;
    new_table.columns = vec![email];

    let old = snapshot_with_tables(vec![old_table]);
    let new = snapshot_with_tables(vec![new_table]);

    let (diffs, warnings) = generate_migration(&old, &new, &Config::default()).unwrap();
    assert!(warnings.is_empty());

    let sql = all_sql(&diffs);
    assert!(sql.contains("ADD CONSTRAINT email_not_null CHECK (email IS NOT NULL) NOT VALID"));
    assert!(sql.contains("VALIDATE CONSTRAINT email_not_null"));
    assert!(sql.contains("ALTER COLUMN email SET NOT NULL"));

    let check_pos = sql.find("NOT VALID").unwrap();
    let validate_pos = sql.find("VALIDATE CONSTRAINT").unwrap();
    let set_pos = sql.find("SET NOT NULL").unwrap();
    assert!(check_pos < validate_pos && validate_pos < set_pos);
}

#[test]
fn enum_value_insertion_anchors_on_neighbor() {
    let old_type = Type {
        schema: "public".into(),
        name: "status".into(),
        kind: TypeKind::Enum {
            values: vec!["active".into()],
        },
    };
    let new_type = Type {
        schema: "public".into(),
        name: "status".into(),
        kind: TypeKind::Enum {
            values: vec!["active".into(), "archived".into()],
        },
    };

    let mut old = Snapshot::default();
    old.types = vec![old_type];
    let mut new = Snapshot::default();
    new.types = vec![new_type];

    let (diffs, warnings) = generate_migration(&old, &new, &Config::default()).unwrap();
    assert!(warnings.is_empty());
    let sql = all_sql(&diffs);
    assert!(sql.contains("ALTER TYPE status ADD VALUE 'archived' AFTER 'active';"));
}

#[test]
fn policy_rename_is_drop_and_create() {
    let mut table = empty_table("accounts");
    table.policies.push(Policy {
        schema: "public".into(),
        table: "accounts".into(),
        name: "old_policy".into(),
        command: PolicyCommand::Select,
        permissive: true,
        roles: vec!["app".into()],
        using_expr: Some("true".into()),
        with_check_expr: None,
    });

    let mut new_table = empty_table("accounts");
    new_table.policies.push(Policy {
        schema: "public".into(),
        table: "accounts".into(),
        name: "new_policy".into(),
        command: PolicyCommand::Select,
        permissive: true,
        roles: vec!["app".into()],
        using_expr: Some("true".into()),
        with_check_expr: None,
    });

    let old = snapshot_with_tables(vec![table]);
    let new = snapshot_with_tables(vec![new_table]);

    let (diffs, warnings) = generate_migration(&old, &new, &Config::default()).unwrap();
    assert!(warnings.is_empty());
    let sql = all_sql(&diffs);
    assert!(sql.contains("DROP POLICY"));
    assert!(sql.contains("old_policy"));
    assert!(sql.contains("CREATE POLICY"));
    assert!(sql.contains("new_policy"));
}

#[test]
fn policy_role_change_is_alter_not_replace() {
    let mut table = empty_table("accounts");
    table.policies.push(Policy {
        schema: "public".into(),
        table: "accounts".into(),
        name: "read_policy".into(),
        command: PolicyCommand::Select,
        permissive: true,
        roles: vec!["app".into()],
        using_expr: Some("true".into()),
        with_check_expr: None,
    });

    let mut new_table = empty_table("accounts");
    new_table.policies.push(Policy {
        schema: "public".into(),
        table: "accounts".into(),
        name: "read_policy".into(),
        command: PolicyCommand::Select,
        permissive: true,
        roles: vec!["app".into(), "admin".into()],
        using_expr: Some("true".into()),
        with_check_expr: None,
    });

    let old = snapshot_with_tables(vec![table]);
    let new = snapshot_with_tables(vec![new_table]);

    let (diffs, _) = generate_migration(&old, &new, &Config::default()).unwrap();
    let sql = all_sql(&diffs);
    assert!(sql.contains("ALTER POLICY"));
    assert!(!sql.contains("DROP POLICY"));
    assert!(!sql.contains("CREATE POLICY"));
}

fn bigint_column(name: &str) -> Column {
    Column {
        name: name.into(),
        data_type: "bigint".into(),
        is_nullable: false,
        default_value: None,
        max_length: None,
        identity_generation: None,
        comment: None,
    }
}

#[test]
fn multi_column_unique_constraint_is_inlined_in_create_table() {
    let mut table = empty_table("memberships");
    table.columns = vec![bigint_column("org_id"), bigint_column("user_id")];
    table.constraints.push(Constraint {
        schema: "public".into(),
        table: "memberships".into(),
        name: "memberships_org_user_key".into(),
        kind: ConstraintKind::Unique,
        columns: vec![
            ConstraintColumn {
                name: "org_id".into(),
                position: 1,
            },
            ConstraintColumn {
                name: "user_id".into(),
                position: 2,
            },
        ],
        comment: None,
    });

    let old = Snapshot::default();
    let new = snapshot_with_tables(vec![table]);

    let (diffs, warnings) = generate_migration(&old, &new, &Config::default()).unwrap();
    assert!(warnings.is_empty());
    let sql = all_sql(&diffs);
    assert!(sql.contains("CONSTRAINT memberships_org_user_key UNIQUE (org_id, user_id)"));
}

#[test]
fn concurrent_index_pairs_with_wait_directive_in_plan_mode() {
    let mut table = empty_table("users");
    table.columns.push(nullable_column("email"));

    let mut new_table = table.clone();
    new_table.indexes.push(Index {
        schema: "public".into(),
        table: "users".into(),
        name: "idx_users_email".into(),
        kind: IndexKind::Plain,
        method: "btree".into(),
        columns: vec![IndexColumn {
            name: "email".into(),
            direction: SortDirection::Asc,
        }],
        is_partial: false,
        where_clause: None,
        comment: None,
    });

    let old = snapshot_with_tables(vec![table]);
    let new = snapshot_with_tables(vec![new_table]);

    let config = Config {
        target_schema: "public".into(),
        emission_mode: EmissionMode::Plan,
    };
    let (diffs, warnings) = generate_migration(&old, &new, &config).unwrap();
    assert!(warnings.is_empty());

    let index_diff = diffs
        .iter()
        .find(|d| d.diff_type == "table.index")
        .expect("an index diff was produced");
    assert_eq!(index_diff.statements.len(), 2);
    assert!(!index_diff.statements[0].can_run_in_transaction);
    assert!(index_diff.statements[0].sql.contains("CONCURRENTLY"));
    assert!(index_diff.statements[1].can_run_in_transaction);
    assert!(index_diff.statements[1]
        .directive
        .as_ref()
        .is_some_and(|d| d.kind == pg_ddl_differ::render::DirectiveKind::Wait));
}

#[test]
fn column_index_and_constraint_comment_changes_emit_comment_statements_only() {
    let mut old_table = empty_table("widgets");
    old_table.columns.push(nullable_column("label"));
    old_table.constraints.push(Constraint {
        schema: "public".into(),
        table: "widgets".into(),
        name: "widgets_label_key".into(),
        kind: ConstraintKind::Unique,
        columns: vec![ConstraintColumn {
            name: "label".into(),
            position: 1,
        }],
        comment: None,
    });
    old_table.indexes.push(Index {
        schema: "public".into(),
        table: "widgets".into(),
        name: "idx_widgets_label".into(),
        kind: IndexKind::Plain,
        method: "btree".into(),
        columns: vec![IndexColumn {
            name: "label".into(),
            direction: SortDirection::Asc,
        }],
        is_partial: false,
        where_clause: None,
        comment: None,
    });

    let mut new_table = old_table.clone();
    new_table.columns[0].comment = Some("display label".into());
    new_table.constraints[0].comment = Some("enforces unique labels".into());
    new_table.indexes[0].comment = Some("speeds up label lookups".into());

    let old = snapshot_with_tables(vec![old_table]);
    let new = snapshot_with_tables(vec![new_table]);

    let (diffs, warnings) = generate_migration(&old, &new, &Config::default()).unwrap();
    assert!(warnings.is_empty());

    let sql = all_sql(&diffs);
    assert!(sql.contains("COMMENT ON COLUMN widgets.label IS 'display label';"));
    assert!(sql.contains("COMMENT ON CONSTRAINT widgets_label_key ON widgets IS 'enforces unique labels';"));
    assert!(sql.contains("COMMENT ON INDEX idx_widgets_label IS 'speeds up label lookups';"));

    assert!(!sql.contains("DROP COLUMN"));
    assert!(!sql.contains("DROP CONSTRAINT"));
    assert!(!sql.contains("DROP INDEX"));
}

#[test]
fn idempotent_after_applying_generated_steps_no_remaining_diff() {
    let mut old_table = empty_table("widgets");
    old_table.columns.push(nullable_column("label"));

    let mut new_table = old_table.clone();
    new_table.comment = Some("stores widgets".into());

    let old = snapshot_with_tables(vec![old_table]);
    let new = snapshot_with_tables(vec![new_table.clone()]);

    let (diffs, _) = generate_migration(&old, &new, &Config::default()).unwrap();
    assert_eq!(diffs.len(), 1);

    let (second_diffs, second_warnings) =
        generate_migration(&new, &new, &Config::default()).unwrap();
    assert!(second_diffs.is_empty());
    assert!(second_warnings.is_empty());
}
