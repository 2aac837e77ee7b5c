//! Diff schemas.
//!
//! The target schema is never created or dropped by the differ.

use crate::ir::Schema;
use crate::operations::MigrationStep;
use crate::render::schema::SchemaOperation;

pub fn equal(old: &Schema, new: &Schema) -> bool {
    old.owner == new.owner
}

pub fn diff(old: &[Schema], new: &[Schema], target_schema: &str) -> Vec<MigrationStep> {
    let (added, dropped, modified) =
        crate::diff::diff_list(old, new, |s| s.name.clone(), equal);

    let mut steps = Vec::new();

    for schema in dropped {
        if schema.name == target_schema {
            continue;
        }
        steps.push(MigrationStep::Schema(SchemaOperation::Drop {
            name: schema.name.clone(),
        }));
    }

    let mut to_create: Vec<&Schema> = added.into_iter().filter(|s| s.name != target_schema).collect();
    to_create.sort_by_key(|s| (s.owner.is_some(), s.name.clone()));
    for schema in to_create {
        steps.push(MigrationStep::Schema(SchemaOperation::Create(
            schema.clone(),
        )));
    }

    for (old_schema, new_schema) in modified {
        if let Some(new_owner) = &new_schema.owner {
            if old_schema.owner.as_ref() != Some(new_owner) {
                steps.push(MigrationStep::Schema(SchemaOperation::AlterOwner {
                    name: new_schema.name.clone(),
                    new_owner: new_owner.clone(),
                }));
            }
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_creates_or_drops_the_target_schema() {
        let old = vec![];
        let new = vec![Schema {
            name: "public".into(),
            owner: None,
        }];
        assert!(diff(&old, &new, "public").is_empty());
    }

    #[test]
    fn creates_new_non_target_schema() {
        let old = vec![];
        let new = vec![Schema {
            name: "app".into(),
            owner: None,
        }];
        let steps = diff(&old, &new, "public");
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn owner_change_emits_alter() {
        let old = vec![Schema {
            name: "app".into(),
            owner: Some("alice".into()),
        }];
        let new = vec![Schema {
            name: "app".into(),
            owner: Some("bob".into()),
        }];
        let steps = diff(&old, &new, "public");
        assert_eq!(steps.len(), 1);
        match &steps[0] {
            MigrationStep::Schema(SchemaOperation::AlterOwner { new_owner, .. }) => {
                assert_eq!(new_owner, "bob")
            }
            _ => panic!("expected AlterOwner"),
        }
    }
}
