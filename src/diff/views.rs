//! Diff views.
//!
//! True semantic equivalence would need a real SQL parse, which belongs
//! to an external parser this crate does not implement. Instead this
//! normalizes whitespace and a trailing semicolon before falling back to
//! exact string match.

use crate::ir::View;
use crate::operations::MigrationStep;
use crate::render::view::ViewOperation;

fn normalize(definition: &str) -> String {
    definition
        .trim()
        .trim_end_matches(';')
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn equal(old: &View, new: &View) -> bool {
    normalize(&old.definition) == normalize(&new.definition)
}

pub fn diff(old: &[View], new: &[View]) -> Vec<MigrationStep> {
    let (added, dropped, modified) =
        crate::diff::diff_list(old, new, |v| (v.schema.clone(), v.name.clone()), equal);

    let mut steps = Vec::new();

    for view in dropped {
        steps.push(MigrationStep::View(ViewOperation::Drop {
            schema: view.schema.clone(),
            name: view.name.clone(),
        }));
    }

    for view in added {
        steps.push(MigrationStep::View(ViewOperation::CreateOrReplace(
            view.clone(),
        )));
    }

    for (_old_view, new_view) in modified {
        steps.push(MigrationStep::View(ViewOperation::CreateOrReplace(
            new_view.clone(),
        )));
    }

    steps
}
