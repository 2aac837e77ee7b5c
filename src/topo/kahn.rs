//! A cycle-tolerant Kahn's-algorithm sort shared by `topo::tables`,
//! `topo::types`, and `topo::functions`.
//!
//! Unlike a strict topological sort that errors on any cycle, this drains
//! unresolved cycle members in their original insertion order instead of
//! aborting. Deferrable foreign keys make cycles a normal, expected shape
//! of the dependency graph rather than an error condition.

/// Returns a permutation of `0..len` such that for every edge `(dependent,
/// dependency)` produced by `depends_on`, `dependency` appears before
/// `dependent` in the output — except inside an unresolved cycle, where the
/// cycle's members are appended in their original index order.
pub fn topological_sort(len: usize, depends_on: impl Fn(usize) -> Vec<usize>) -> Vec<usize> {
    let deps: Vec<Vec<usize>> = (0..len).map(&depends_on).collect();
    let mut remaining: Vec<usize> = deps.iter().map(|d| d.len()).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); len];
    for (i, ds) in deps.iter().enumerate() {
        for &d in ds {
            if d != i {
                dependents[d].push(i);
            }
        }
    }

    let mut emitted = vec![false; len];
    let mut order = Vec::with_capacity(len);

    loop {
        let mut progressed = false;
        for i in 0..len {
            if !emitted[i] && remaining[i] == 0 {
                emitted[i] = true;
                order.push(i);
                progressed = true;
                for &dependent in &dependents[i] {
                    if !emitted[dependent] {
                        remaining[dependent] = remaining[dependent].saturating_sub(1);
                    }
                }
            }
        }
        if !progressed {
            break;
        }
    }

    // Cycle-tolerant fallback: whatever never reached zero in-degree is
    // part of a cycle (or depends on one); drain it in original order.
    for i in 0..len {
        if !emitted[i] {
            order.push(i);
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_a_simple_chain() {
        // 0 depends on 1, 1 depends on 2.
        let order = topological_sort(3, |i| match i {
            0 => vec![1],
            1 => vec![2],
            _ => vec![],
        });
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn drains_a_cycle_in_original_order() {
        // 0 <-> 1 form a cycle; 2 depends on nothing.
        let order = topological_sort(3, |i| match i {
            0 => vec![1],
            1 => vec![0],
            _ => vec![],
        });
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn ignores_self_edges() {
        let order = topological_sort(1, |_| vec![0]);
        assert_eq!(order, vec![0]);
    }
}
