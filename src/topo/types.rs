//! Types ordered by nested reference: a composite or domain sorts after
//! any type it references as a column or base type.

use crate::ir::types::Type;
use crate::topo::kahn::topological_sort;

/// Strips a schema qualifier matching `schema` from `data_type`, so
/// `"public.status_type"` and `"status_type"` both resolve to the same
/// referenced type when `schema == "public"`.
fn bare_name<'a>(data_type: &'a str, schema: &str) -> &'a str {
    data_type
        .strip_prefix(&format!("{schema}."))
        .unwrap_or(data_type)
}

/// Returns `types` reordered so that, for every nested reference `T -> T'`,
/// `T'` appears first. Unknown base/member types (not present in `types`)
/// are treated as built-in and ignored.
pub fn sort<'a>(types: &'a [Type]) -> Vec<&'a Type> {
    let order = topological_sort(types.len(), |i| {
        let t = &types[i];
        t.nested_type_refs()
            .into_iter()
            .filter_map(|reference| {
                let bare = bare_name(reference, &t.schema);
                types
                    .iter()
                    .position(|candidate| candidate.schema == t.schema && candidate.name == bare)
            })
            .collect()
    });
    order.into_iter().map(|i| &types[i]).collect()
}
