//! Diff types/domains.

use std::collections::HashSet;

use crate::error::DiffError;
use crate::ir::types::{Type, TypeKind};
use crate::operations::MigrationStep;
use crate::render::types::{DomainAlterItem, TypeOperation};

pub fn equal(old: &Type, new: &Type) -> bool {
    match (&old.kind, &new.kind) {
        (TypeKind::Enum { values: a }, TypeKind::Enum { values: b }) => a == b,
        (TypeKind::Composite { columns: a }, TypeKind::Composite { columns: b }) => a == b,
        (
            TypeKind::Domain {
                base_type: ba,
                default: da,
                not_null: na,
                constraints: ca,
            },
            TypeKind::Domain {
                base_type: bb,
                default: db,
                not_null: nb,
                constraints: cb,
            },
        ) => ba == bb && da == db && na == nb && ca == cb,
        _ => false,
    }
}

/// Positional enum-value diff: the anchor for an inserted value at
/// position `i` is the element at `i+1` when `i == 0`, otherwise `i-1`.
fn enum_insertions(old_values: &[String], new_values: &[String]) -> Vec<(String, String, bool)> {
    let old_set: HashSet<&String> = old_values.iter().collect();
    let mut insertions = Vec::new();
    for (i, v) in new_values.iter().enumerate() {
        if old_set.contains(v) {
            continue;
        }
        if i == 0 {
            if let Some(neighbor) = new_values.get(1) {
                insertions.push((v.clone(), neighbor.clone(), true));
            }
        } else {
            insertions.push((v.clone(), new_values[i - 1].clone(), false));
        }
    }
    insertions
}

pub fn diff(old: &[Type], new: &[Type]) -> (Vec<MigrationStep>, Vec<DiffError>) {
    let (added, dropped, modified) =
        crate::diff::diff_list(old, new, |t| (t.schema.clone(), t.name.clone()), equal);

    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    for t in dropped {
        steps.push(MigrationStep::Type(TypeOperation::Drop {
            schema: t.schema.clone(),
            name: t.name.clone(),
            kind: t.kind.clone(),
        }));
    }

    // Non-domain types before domains within the same dependency depth;
    // `topo::types::sort` then orders referenced types ahead of the types
    // that nest them.
    let mut to_create: Vec<Type> = added.into_iter().cloned().collect();
    to_create.sort_by_key(|t| (t.kind.is_domain(), t.name.clone()));
    for t in crate::topo::types::sort(&to_create) {
        steps.push(MigrationStep::Type(TypeOperation::Create(t.clone())));
    }

    for (old_t, new_t) in modified {
        match (&old_t.kind, &new_t.kind) {
            (TypeKind::Enum { values: old_values }, TypeKind::Enum { values: new_values }) => {
                let insertions = enum_insertions(old_values, new_values);
                if !insertions.is_empty() {
                    steps.push(MigrationStep::Type(TypeOperation::AlterEnum {
                        schema: new_t.schema.clone(),
                        name: new_t.name.clone(),
                        insertions,
                    }));
                }
            }
            (
                TypeKind::Domain {
                    base_type: _,
                    default: old_default,
                    not_null: old_not_null,
                    constraints: old_constraints,
                },
                TypeKind::Domain {
                    base_type: _,
                    default: new_default,
                    not_null: new_not_null,
                    constraints: new_constraints,
                },
            ) => {
                let mut items = Vec::new();
                if old_default != new_default {
                    items.push(match new_default {
                        Some(d) => DomainAlterItem::SetDefault(d.clone()),
                        None => DomainAlterItem::DropDefault,
                    });
                }
                if old_not_null != new_not_null {
                    items.push(if *new_not_null {
                        DomainAlterItem::SetNotNull
                    } else {
                        DomainAlterItem::DropNotNull
                    });
                }
                for dropped_constraint in old_constraints {
                    if !new_constraints.contains(dropped_constraint) {
                        match &dropped_constraint.name {
                            Some(name) => {
                                items.push(DomainAlterItem::DropConstraint(name.clone()))
                            }
                            None => warnings.push(DiffError::UnsupportedDomainChange {
                                domain: new_t.id(),
                            }),
                        }
                    }
                }
                for added_constraint in new_constraints {
                    if !old_constraints.contains(added_constraint) {
                        items.push(DomainAlterItem::AddConstraint {
                            name: added_constraint.name.clone(),
                            definition: added_constraint.definition.clone(),
                        });
                    }
                }
                if !items.is_empty() {
                    steps.push(MigrationStep::Type(TypeOperation::AlterDomain {
                        schema: new_t.schema.clone(),
                        name: new_t.name.clone(),
                        items,
                    }));
                }
            }
            // Composite column changes, or a kind change (e.g. domain ->
            // enum), have no in-place ALTER TYPE form: drop + create.
            _ => {
                steps.push(MigrationStep::Type(TypeOperation::Drop {
                    schema: old_t.schema.clone(),
                    name: old_t.name.clone(),
                    kind: old_t.kind.clone(),
                }));
                steps.push(MigrationStep::Type(TypeOperation::Create(new_t.clone())));
            }
        }
    }

    (steps, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_value_inserted_after_active() {
        let old_values = vec!["active".to_string()];
        let new_values = vec!["active".to_string(), "archived".to_string()];
        let insertions = enum_insertions(&old_values, &new_values);
        assert_eq!(
            insertions,
            vec![("archived".to_string(), "active".to_string(), false)]
        );
    }

    #[test]
    fn domain_unnamed_constraint_removal_warns_instead_of_panicking() {
        let old = Type {
            schema: "public".into(),
            name: "email".into(),
            kind: TypeKind::Domain {
                base_type: "text".into(),
                default: None,
                not_null: false,
                constraints: vec![crate::ir::types::DomainConstraint {
                    name: None,
                    definition: "CHECK (VALUE LIKE '%@%')".into(),
                }],
            },
        };
        let new = Type {
            schema: "public".into(),
            name: "email".into(),
            kind: TypeKind::Domain {
                base_type: "text".into(),
                default: None,
                not_null: false,
                constraints: vec![],
            },
        };
        let (steps, warnings) = diff(std::slice::from_ref(&old), std::slice::from_ref(&new));
        assert!(steps.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
