//! Tables ordered by foreign key.

use crate::ir::table::Table;
use crate::topo::kahn::topological_sort;

/// Returns `tables` reordered so that, for every FK `T -> T'`, `T'` appears
/// first. Self-references are ignored (`Table::fk_targets` already filters
/// them out). Cycle members (deferrable FKs) drain in their original order.
pub fn sort<'a>(tables: &'a [Table]) -> Vec<&'a Table> {
    let order = topological_sort(tables.len(), |i| {
        tables[i]
            .fk_targets()
            .into_iter()
            .filter_map(|(schema, name)| {
                tables
                    .iter()
                    .position(|t| t.schema == schema && t.name == name)
            })
            .collect()
    });
    order.into_iter().map(|i| &tables[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::constraint::{Constraint, ConstraintColumn, ConstraintKind};

    fn table(name: &str, fk_to: Option<&str>) -> Table {
        Table {
            schema: "public".into(),
            name: name.into(),
            columns: vec![],
            constraints: fk_to
                .map(|target| {
                    vec![Constraint {
                        schema: "public".into(),
                        table: name.into(),
                        name: format!("{name}_fk"),
                        kind: ConstraintKind::ForeignKey {
                            referenced_schema: "public".into(),
                            referenced_table: target.into(),
                            referenced_columns: vec!["id".into()],
                            update_rule: "NO ACTION".into(),
                            delete_rule: "NO ACTION".into(),
                            deferrable: false,
                            initially_deferred: false,
                        },
                        columns: vec![ConstraintColumn {
                            name: format!("{target}_id"),
                            position: 1,
                        }],
                        comment: None,
                    }]
                })
                .unwrap_or_default(),
            indexes: vec![],
            triggers: vec![],
            policies: vec![],
            rls_enabled: false,
            comment: None,
        }
    }

    #[test]
    fn referenced_table_comes_first() {
        let tables = vec![table("orders", Some("users")), table("users", None)];
        let sorted = sort(&tables);
        let names: Vec<&str> = sorted.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["users", "orders"]);
    }

    #[test]
    fn self_reference_is_ignored() {
        let tables = vec![table("nodes", Some("nodes"))];
        let sorted = sort(&tables);
        assert_eq!(sorted.len(), 1);
    }
}
