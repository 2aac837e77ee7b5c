//! Diff row-level-security policies, per table.

use crate::ir::policy::Policy;
use crate::operations::MigrationStep;
use crate::render::policy::{PolicyAlterItem, PolicyOperation};

pub fn equal(old: &Policy, new: &Policy) -> bool {
    old.command == new.command
        && old.permissive == new.permissive
        && old.roles == new.roles
        && old.using_expr == new.using_expr
        && old.with_check_expr == new.with_check_expr
}

fn renames_require_replace(old: &Policy, new: &Policy) -> bool {
    old.command != new.command || old.permissive != new.permissive
}

pub fn diff(old: &[Policy], new: &[Policy]) -> Vec<MigrationStep> {
    let (added, dropped, modified) = crate::diff::diff_list(
        old,
        new,
        |p| (p.schema.clone(), p.table.clone(), p.name.clone()),
        equal,
    );

    let mut added: Vec<&Policy> = added;
    added.sort_by_key(|p| p.name.clone());
    let mut dropped: Vec<&Policy> = dropped;
    dropped.sort_by_key(|p| p.name.clone());

    let mut steps = Vec::new();

    for p in dropped {
        steps.push(MigrationStep::Policy(PolicyOperation::Drop {
            schema: p.schema.clone(),
            table: p.table.clone(),
            name: p.name.clone(),
        }));
    }

    for p in added {
        steps.push(MigrationStep::Policy(PolicyOperation::Create(p.clone())));
    }

    for (old_p, new_p) in modified {
        if renames_require_replace(old_p, new_p) {
            steps.push(MigrationStep::Policy(PolicyOperation::Replace {
                schema: new_p.schema.clone(),
                table: new_p.table.clone(),
                old_name: old_p.name.clone(),
                new: new_p.clone(),
            }));
            continue;
        }

        let mut items = Vec::new();
        if old_p.roles != new_p.roles {
            items.push(PolicyAlterItem::Roles(new_p.roles.clone()));
        }
        if old_p.using_expr != new_p.using_expr {
            if let Some(using) = &new_p.using_expr {
                items.push(PolicyAlterItem::Using(using.clone()));
            }
        }
        if old_p.with_check_expr != new_p.with_check_expr {
            if let Some(check) = &new_p.with_check_expr {
                items.push(PolicyAlterItem::WithCheck(check.clone()));
            }
        }
        if !items.is_empty() {
            steps.push(MigrationStep::Policy(PolicyOperation::Alter {
                schema: new_p.schema.clone(),
                table: new_p.table.clone(),
                name: new_p.name.clone(),
                items,
            }));
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::policy::PolicyCommand;

    fn policy(name: &str, roles: Vec<&str>) -> Policy {
        Policy {
            schema: "public".into(),
            table: "users".into(),
            name: name.into(),
            command: PolicyCommand::All,
            permissive: true,
            roles: roles.into_iter().map(String::from).collect(),
            using_expr: Some("true".into()),
            with_check_expr: None,
        }
    }

    #[test]
    fn role_change_is_alter_not_replace() {
        let old = vec![policy("p1", vec![])];
        let new = vec![policy("p1", vec!["admin"])];
        let steps = diff(&old, &new);
        assert_eq!(steps.len(), 1);
        assert!(matches!(
            steps[0],
            MigrationStep::Policy(PolicyOperation::Alter { .. })
        ));
    }

    #[test]
    fn command_change_is_replace() {
        let old = vec![policy("p1", vec![])];
        let mut new_p = policy("p1", vec![]);
        new_p.command = PolicyCommand::Select;
        let steps = diff(&old, &[new_p]);
        assert_eq!(steps.len(), 1);
        assert!(matches!(
            steps[0],
            MigrationStep::Policy(PolicyOperation::Replace { .. })
        ));
    }
}
