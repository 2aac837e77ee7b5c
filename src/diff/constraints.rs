//! Diff the constraints of a single table.
//!
//! CHECK constraints are compared by clause and validity only, not by
//! column list (the column list for a CHECK is informational, not part of
//! its identity). PRIMARY KEY/UNIQUE/FOREIGN KEY compare columns; `isValid`
//! only matters for CHECK and FOREIGN KEY. A change confined to `comment`
//! emits `COMMENT ON CONSTRAINT` rather than a drop + add.

use crate::ir::constraint::{Constraint, ConstraintKind};
use crate::operations::MigrationStep;
use crate::render::table::TableOperation;

pub fn equal(old: &Constraint, new: &Constraint) -> bool {
    old.comment == new.comment && kind_equal(old, new)
}

/// Structural equality, ignoring `comment`: used to tell a comment-only
/// change apart from a change that needs a drop + add.
fn kind_equal(old: &Constraint, new: &Constraint) -> bool {
    match (&old.kind, &new.kind) {
        (ConstraintKind::PrimaryKey, ConstraintKind::PrimaryKey) => old.columns == new.columns,
        (ConstraintKind::Unique, ConstraintKind::Unique) => old.columns == new.columns,
        (
            ConstraintKind::ForeignKey {
                referenced_schema: rsa,
                referenced_table: rta,
                referenced_columns: rca,
                update_rule: ua,
                delete_rule: da,
                deferrable: defa,
                initially_deferred: ida,
            },
            ConstraintKind::ForeignKey {
                referenced_schema: rsb,
                referenced_table: rtb,
                referenced_columns: rcb,
                update_rule: ub,
                delete_rule: db,
                deferrable: defb,
                initially_deferred: idb,
            },
        ) => {
            old.columns == new.columns
                && rsa == rsb
                && rta == rtb
                && rca == rcb
                && ua == ub
                && da == db
                && defa == defb
                && ida == idb
        }
        (
            ConstraintKind::Check {
                check_clause: ca,
                is_valid: va,
            },
            ConstraintKind::Check {
                check_clause: cb,
                is_valid: vb,
            },
        ) => ca == cb && va == vb,
        _ => false,
    }
}

pub fn diff(schema: &str, table: &str, old: &[Constraint], new: &[Constraint]) -> Vec<MigrationStep> {
    let (added, dropped, modified) =
        crate::diff::diff_list(old, new, |c| c.name.clone(), equal);

    let mut steps = Vec::new();

    for c in dropped {
        steps.push(MigrationStep::Table(TableOperation::DropConstraint {
            schema: schema.to_string(),
            table: table.to_string(),
            name: c.name.clone(),
        }));
    }

    for c in added {
        steps.push(MigrationStep::Table(TableOperation::AddConstraint {
            schema: schema.to_string(),
            table: table.to_string(),
            constraint: c.clone(),
        }));
    }

    // A comment-only change needs no structural rebuild. Anything else has
    // no in-place ALTER form: drop + add under the same name.
    for (old_c, new_c) in modified {
        if kind_equal(old_c, new_c) {
            steps.push(MigrationStep::Table(TableOperation::CommentConstraint {
                schema: schema.to_string(),
                table: table.to_string(),
                name: new_c.name.clone(),
                comment: new_c.comment.clone(),
            }));
            continue;
        }
        steps.push(MigrationStep::Table(TableOperation::DropConstraint {
            schema: schema.to_string(),
            table: table.to_string(),
            name: old_c.name.clone(),
        }));
        steps.push(MigrationStep::Table(TableOperation::AddConstraint {
            schema: schema.to_string(),
            table: table.to_string(),
            constraint: new_c.clone(),
        }));
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::constraint::ConstraintColumn;

    fn check(clause: &str, valid: bool) -> Constraint {
        Constraint {
            schema: "public".into(),
            table: "users".into(),
            name: "users_email_check".into(),
            kind: ConstraintKind::Check {
                check_clause: clause.into(),
                is_valid: valid,
            },
            columns: vec![ConstraintColumn {
                name: "email".into(),
                position: 1,
            }],
            comment: None,
        }
    }

    #[test]
    fn check_column_list_change_alone_is_not_a_modification() {
        let old = check("email LIKE '%@%'", true);
        let mut new = check("email LIKE '%@%'", true);
        new.columns = vec![];
        assert!(equal(&old, &new));
    }

    #[test]
    fn check_validity_change_is_a_modification() {
        let old = check("email LIKE '%@%'", false);
        let new = check("email LIKE '%@%'", true);
        assert!(!equal(&old, &new));
        let steps = diff("public", "users", &[old], &[new]);
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn comment_only_change_emits_comment_constraint_not_drop_add() {
        let old = check("email LIKE '%@%'", true);
        let mut new = check("email LIKE '%@%'", true);
        new.comment = Some("basic shape check".into());

        assert!(!equal(&old, &new));
        let steps = diff("public", "users", &[old], &[new]);
        assert_eq!(steps.len(), 1);
        assert!(matches!(
            steps[0],
            MigrationStep::Table(TableOperation::CommentConstraint { .. })
        ));
    }
}
