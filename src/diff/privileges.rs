//! Diff column-level privilege grants.

use std::collections::BTreeSet;

use crate::ir::privilege::ColumnPrivilege;
use crate::operations::MigrationStep;
use crate::render::privilege::PrivilegeOperation;

pub fn equal(old: &ColumnPrivilege, new: &ColumnPrivilege) -> bool {
    old.privileges == new.privileges && old.with_grant_option == new.with_grant_option
}

pub fn diff(old: &[ColumnPrivilege], new: &[ColumnPrivilege]) -> Vec<MigrationStep> {
    let (added, dropped, modified) = crate::diff::diff_list(
        old,
        new,
        |p| {
            (
                p.schema.clone(),
                p.table.clone(),
                p.grantee.clone(),
                p.columns.clone(),
            )
        },
        equal,
    );

    let mut steps = Vec::new();

    for p in dropped {
        steps.push(MigrationStep::Privilege(PrivilegeOperation::Revoke {
            schema: p.schema.clone(),
            table: p.table.clone(),
            grantee: p.grantee.clone(),
            columns: p.columns.clone(),
            privileges: p.privileges.clone(),
        }));
    }

    for p in added {
        steps.push(MigrationStep::Privilege(PrivilegeOperation::Grant {
            schema: p.schema.clone(),
            table: p.table.clone(),
            grantee: p.grantee.clone(),
            columns: p.columns.clone(),
            privileges: p.privileges.clone(),
            with_grant_option: p.with_grant_option,
        }));
    }

    for (old_p, new_p) in modified {
        let removed: BTreeSet<_> = old_p
            .privileges
            .difference(&new_p.privileges)
            .cloned()
            .collect();
        let gained: BTreeSet<_> = new_p
            .privileges
            .difference(&old_p.privileges)
            .cloned()
            .collect();

        if !removed.is_empty() {
            steps.push(MigrationStep::Privilege(PrivilegeOperation::Revoke {
                schema: new_p.schema.clone(),
                table: new_p.table.clone(),
                grantee: new_p.grantee.clone(),
                columns: new_p.columns.clone(),
                privileges: removed,
            }));
        }
        if !gained.is_empty() {
            steps.push(MigrationStep::Privilege(PrivilegeOperation::Grant {
                schema: new_p.schema.clone(),
                table: new_p.table.clone(),
                grantee: new_p.grantee.clone(),
                columns: new_p.columns.clone(),
                privileges: gained,
                with_grant_option: new_p.with_grant_option,
            }));
        } else if old_p.with_grant_option != new_p.with_grant_option {
            if new_p.with_grant_option {
                steps.push(MigrationStep::Privilege(PrivilegeOperation::Grant {
                    schema: new_p.schema.clone(),
                    table: new_p.table.clone(),
                    grantee: new_p.grantee.clone(),
                    columns: new_p.columns.clone(),
                    privileges: new_p.privileges.clone(),
                    with_grant_option: true,
                }));
            } else {
                steps.push(MigrationStep::Privilege(
                    PrivilegeOperation::RevokeGrantOption {
                        schema: new_p.schema.clone(),
                        table: new_p.table.clone(),
                        grantee: new_p.grantee.clone(),
                        columns: new_p.columns.clone(),
                        privileges: new_p.privileges.clone(),
                    },
                ));
            }
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::privilege::Privilege;

    fn priv_for(privileges: BTreeSet<Privilege>, with_grant_option: bool) -> ColumnPrivilege {
        ColumnPrivilege {
            schema: "public".into(),
            table: "users".into(),
            grantee: "app_role".into(),
            columns: BTreeSet::from(["email".to_string()]),
            privileges,
            with_grant_option,
        }
    }

    #[test]
    fn grant_option_revoked_when_privileges_unchanged() {
        let old = vec![priv_for(BTreeSet::from([Privilege::Select]), true)];
        let new = vec![priv_for(BTreeSet::from([Privilege::Select]), false)];
        let steps = diff(&old, &new);
        assert_eq!(steps.len(), 1);
        assert!(matches!(
            steps[0],
            MigrationStep::Privilege(PrivilegeOperation::RevokeGrantOption { .. })
        ));
    }

    #[test]
    fn added_privilege_is_granted_alone() {
        let old = vec![priv_for(BTreeSet::from([Privilege::Select]), false)];
        let new = vec![priv_for(
            BTreeSet::from([Privilege::Select, Privilege::Update]),
            false,
        )];
        let steps = diff(&old, &new);
        assert_eq!(steps.len(), 1);
        match &steps[0] {
            MigrationStep::Privilege(PrivilegeOperation::Grant { privileges, .. }) => {
                assert_eq!(privileges, &BTreeSet::from([Privilege::Update]));
            }
            _ => panic!("expected Grant"),
        }
    }
}
