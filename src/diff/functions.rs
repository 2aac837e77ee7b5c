//! Diff functions.
//!
//! Call-graph ordering is not this module's concern: it only classifies
//! added/dropped/modified functions. `topo::functions` sorts the resulting
//! creates/replaces once the full `new` snapshot is available, in
//! `order.rs`.

use crate::ir::Function;
use crate::operations::MigrationStep;
use crate::render::function::FunctionOperation;

fn normalize_body(definition: &str) -> String {
    definition.trim().to_string()
}

pub fn equal(old: &Function, new: &Function) -> bool {
    old.arguments == new.arguments
        && old.language == new.language
        && normalize_body(&old.definition) == normalize_body(&new.definition)
}

pub fn diff(old: &[Function], new: &[Function]) -> Vec<MigrationStep> {
    let (added, dropped, modified) = crate::diff::diff_list(
        old,
        new,
        |f| (f.schema.clone(), f.name.clone(), f.arguments.clone()),
        equal,
    );

    let mut steps = Vec::new();

    for f in dropped {
        steps.push(MigrationStep::Function(FunctionOperation::Drop {
            schema: f.schema.clone(),
            name: f.name.clone(),
            arguments: f.arguments.clone(),
        }));
    }

    for f in added {
        steps.push(MigrationStep::Function(FunctionOperation::CreateOrReplace(
            f.clone(),
        )));
    }

    for (_old_f, new_f) in modified {
        steps.push(MigrationStep::Function(FunctionOperation::CreateOrReplace(
            new_f.clone(),
        )));
    }

    steps
}
