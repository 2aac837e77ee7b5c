//! Diff extensions. Extensions cannot be altered in place: a changed
//! install schema is a drop+create. There is no `comment` field on
//! `Extension` to diff separately.

use crate::ir::Extension;
use crate::operations::MigrationStep;
use crate::render::extension::ExtensionOperation;

pub fn equal(old: &Extension, new: &Extension) -> bool {
    old.schema == new.schema
}

pub fn diff(old: &[Extension], new: &[Extension]) -> Vec<MigrationStep> {
    let (added, dropped, modified) =
        crate::diff::diff_list(old, new, |e| e.name.clone(), equal);

    let mut steps = Vec::new();

    let mut dropped: Vec<&Extension> = dropped;
    dropped.sort_by_key(|e| e.name.clone());
    for ext in dropped {
        steps.push(MigrationStep::Extension(ExtensionOperation::Drop {
            name: ext.name.clone(),
        }));
    }

    let mut added: Vec<&Extension> = added;
    added.sort_by_key(|e| e.name.clone());
    for ext in added {
        steps.push(MigrationStep::Extension(ExtensionOperation::Create(
            ext.clone(),
        )));
    }

    for (old_ext, new_ext) in modified {
        if old_ext.schema != new_ext.schema {
            // An extension's install schema can't be altered; drop+create.
            steps.push(MigrationStep::Extension(ExtensionOperation::Drop {
                name: old_ext.name.clone(),
            }));
            steps.push(MigrationStep::Extension(ExtensionOperation::Create(
                new_ext.clone(),
            )));
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabetical_create_order() {
        let old = vec![];
        let new = vec![
            Extension {
                name: "uuid-ossp".into(),
                schema: None,
            },
            Extension {
                name: "pgcrypto".into(),
                schema: None,
            },
        ];
        let steps = diff(&old, &new);
        let names: Vec<String> = steps
            .iter()
            .map(|s| match s {
                MigrationStep::Extension(ExtensionOperation::Create(e)) => e.name.clone(),
                _ => panic!(),
            })
            .collect();
        assert_eq!(names, vec!["pgcrypto", "uuid-ossp"]);
    }
}
