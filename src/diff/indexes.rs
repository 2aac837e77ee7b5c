//! Diff indexes. Skips any index backing a primary key — that index is
//! emitted implicitly by the PRIMARY KEY constraint and never gets its own
//! CREATE/DROP INDEX statement.

use crate::ir::index::Index;
use crate::operations::MigrationStep;
use crate::render::index::{EmissionMode, IndexOperation};

pub fn equal(old: &Index, new: &Index) -> bool {
    old.kind == new.kind
        && old.method == new.method
        && old.columns == new.columns
        && old.is_partial == new.is_partial
        && old.where_clause == new.where_clause
        && old.comment == new.comment
}

/// True when every structural attribute of `old` and `new` matches and
/// only `comment` differs, so the caller can emit a single `COMMENT ON
/// INDEX` instead of a drop + recreate.
fn only_comment_differs(old: &Index, new: &Index) -> bool {
    old.kind == new.kind
        && old.method == new.method
        && old.columns == new.columns
        && old.is_partial == new.is_partial
        && old.where_clause == new.where_clause
        && old.comment != new.comment
}

pub fn diff(old: &[Index], new: &[Index], mode: EmissionMode) -> Vec<MigrationStep> {
    let old: Vec<&Index> = old.iter().filter(|i| !i.is_primary()).collect();
    let new: Vec<&Index> = new.iter().filter(|i| !i.is_primary()).collect();

    let (added, dropped, modified) = crate::diff::diff_list(
        &old,
        &new,
        |i: &&Index| (i.schema.clone(), i.name.clone()),
        |a: &&Index, b: &&Index| equal(a, b),
    );

    let mut added: Vec<&&Index> = added;
    added.sort_by_key(|i| i.name.clone());
    let mut dropped: Vec<&&Index> = dropped;
    dropped.sort_by_key(|i| i.name.clone());

    let mut steps = Vec::new();

    for idx in dropped {
        steps.push(MigrationStep::Index(IndexOperation::Drop {
            schema: idx.schema.clone(),
            name: idx.name.clone(),
        }));
    }

    for idx in added {
        steps.push(MigrationStep::Index(IndexOperation::Create {
            index: (*idx).clone(),
            mode,
        }));
    }

    // A comment-only change has no structural impact: emit `COMMENT ON
    // INDEX` directly rather than dropping and recreating. Everything
    // else has no in-place ALTER INDEX form: drop + recreate.
    for (old_idx, new_idx) in modified {
        if only_comment_differs(old_idx, new_idx) {
            steps.push(MigrationStep::Index(IndexOperation::Comment {
                schema: new_idx.schema.clone(),
                name: new_idx.name.clone(),
                comment: new_idx.comment.clone(),
            }));
            continue;
        }
        steps.push(MigrationStep::Index(IndexOperation::Drop {
            schema: old_idx.schema.clone(),
            name: old_idx.name.clone(),
        }));
        steps.push(MigrationStep::Index(IndexOperation::Create {
            index: (*new_idx).clone(),
            mode,
        }));
    }

    steps
}
