//! Cycle detection over the structural expansion of a variable.

use rustc_hash::FxHashSet;

use crate::content::{Content, FlatType};
use crate::var::{UnionFind, Variable};

/// Does the structural expansion of `var` loop back on any representative
/// already on the path from `var`? This is the occurs check: it guards
/// every place a variable is about to be bound to a structure that might
/// contain it.
///
/// Cycle-safe by construction: visited representatives are tracked as an
/// ancestor stack (pushed on entry, popped on exit), so a pre-existing
/// cyclic graph still terminates -- and, matching the source algorithm,
/// is reported as occurring regardless of whether the cycle actually
/// passes through `var` itself.
pub fn occurs(uf: &mut UnionFind, var: Variable) -> bool {
    let root = uf.find(var);
    let mut on_path = FxHashSet::default();
    occurs_at(uf, root, &mut on_path)
}

fn occurs_at(uf: &mut UnionFind, root: Variable, on_path: &mut FxHashSet<Variable>) -> bool {
    if !on_path.insert(root) {
        return true;
    }
    let found = match uf.descriptor(root).content {
        Content::FlexVar(_)
        | Content::FlexSuper(_, _)
        | Content::RigidVar(_)
        | Content::RigidSuper(_, _)
        | Content::Error(_) => false,
        Content::Alias(_, _, real_var) => occurs_child(uf, real_var, on_path),
        Content::Structure(flat) => occurs_flat(uf, flat, on_path),
    };
    on_path.remove(&root);
    found
}

fn occurs_child(uf: &mut UnionFind, var: Variable, on_path: &mut FxHashSet<Variable>) -> bool {
    let root = uf.find(var);
    occurs_at(uf, root, on_path)
}

fn occurs_flat(uf: &mut UnionFind, flat: FlatType, on_path: &mut FxHashSet<Variable>) -> bool {
    match flat {
        FlatType::App1(_, args) => args.into_iter().any(|v| occurs_child(uf, v, on_path)),
        FlatType::Fun1(arg, ret) => occurs_child(uf, arg, on_path) || occurs_child(uf, ret, on_path),
        FlatType::EmptyRecord1 => false,
        FlatType::Record1(fields, ext) => {
            fields.into_values().any(|v| occurs_child(uf, v, on_path)) || occurs_child(uf, ext, on_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Descriptor, FlatType};

    #[test]
    fn flex_var_does_not_occur_in_itself() {
        let mut uf = UnionFind::new();
        let a = uf.fresh(Descriptor::new(Content::FlexVar(None), 0));
        assert!(!occurs(&mut uf, a));
    }

    #[test]
    fn list_of_self_is_detected() {
        let mut uf = UnionFind::new();
        let a = uf.fresh(Descriptor::new(Content::FlexVar(None), 0));
        // tie the knot: a becomes `List a`
        uf.union(
            a,
            a,
            Descriptor::new(Content::Structure(FlatType::list(a)), 0),
        );
        assert!(occurs(&mut uf, a));
    }

    #[test]
    fn unrelated_structure_does_not_occur() {
        let mut uf = UnionFind::new();
        let int_var = uf.fresh(Descriptor::new(Content::Structure(FlatType::int()), 0));
        let list_var = uf.fresh(Descriptor::new(Content::Structure(FlatType::list(int_var)), 0));
        assert!(!occurs(&mut uf, list_var));
    }
}
