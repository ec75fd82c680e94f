//! Minimal `toSrcType`-style rendering: reconstructs a variable's current
//! shape from the graph for embedding in a reported error.
//!
//! Intentionally shallow -- a real pretty-printer (name disambiguation,
//! infix operators, parenthesization, alias un-expansion heuristics) is a
//! downstream, out-of-scope collaborator. This module only needs to
//! describe *what* two sides looked like when they failed to unify.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::content::{Content, FlatType, Name, Super};
use crate::var::{UnionFind, Variable};

/// A plain tree mirroring a resolved `Content`, detached from the graph so
/// it can be embedded in an error value and outlive the unification pass
/// that produced it. Record fields are sorted by name (`BTreeMap`) so two
/// renders of the same record compare equal regardless of the arbitrary
/// hash-map iteration order the solver built them in.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedType {
    Var(Option<Name>),
    Super(Super, Option<Name>),
    Rigid(Name),
    RigidSuper(Super, Name),
    Alias(Name, Vec<(Name, RenderedType)>, Box<RenderedType>),
    Apply(Name, Vec<RenderedType>),
    Fun(Box<RenderedType>, Box<RenderedType>),
    EmptyRecord,
    Record(BTreeMap<Name, RenderedType>, Box<RenderedType>),
    /// Emitted in place of re-descending into a representative already on
    /// the current render path -- only ever reachable through a graph an
    /// occurs-check has already flagged as cyclic.
    Recursive,
    Error,
}

/// Read a variable back out of the graph as a `RenderedType`, following
/// structure and alias edges without unioning or mutating anything.
pub fn to_src_type(uf: &mut UnionFind, var: Variable) -> RenderedType {
    let mut on_path = FxHashSet::default();
    render_var(uf, var, &mut on_path)
}

fn render_var(uf: &mut UnionFind, var: Variable, on_path: &mut FxHashSet<Variable>) -> RenderedType {
    let root = uf.find(var);
    if !on_path.insert(root) {
        return RenderedType::Recursive;
    }
    let rendered = match uf.descriptor(root).content {
        Content::FlexVar(name) => RenderedType::Var(name),
        Content::FlexSuper(s, name) => RenderedType::Super(s, name),
        Content::RigidVar(name) => RenderedType::Rigid(name),
        Content::RigidSuper(s, name) => RenderedType::RigidSuper(s, name),
        Content::Alias(name, args, real_var) => RenderedType::Alias(
            name,
            args.into_iter()
                .map(|(n, v)| (n, render_var(uf, v, on_path)))
                .collect(),
            Box::new(render_var(uf, real_var, on_path)),
        ),
        Content::Structure(flat) => render_flat(uf, flat, on_path),
        Content::Error(_) => RenderedType::Error,
    };
    on_path.remove(&root);
    rendered
}

fn render_flat(uf: &mut UnionFind, flat: FlatType, on_path: &mut FxHashSet<Variable>) -> RenderedType {
    match flat {
        FlatType::App1(name, args) => RenderedType::Apply(
            name,
            args.into_iter().map(|v| render_var(uf, v, on_path)).collect(),
        ),
        FlatType::Fun1(arg, ret) => RenderedType::Fun(
            Box::new(render_var(uf, arg, on_path)),
            Box::new(render_var(uf, ret, on_path)),
        ),
        FlatType::EmptyRecord1 => RenderedType::EmptyRecord,
        FlatType::Record1(fields, ext) => {
            let rendered_fields = fields
                .into_iter()
                .map(|(name, v)| (name, render_var(uf, v, on_path)))
                .collect();
            RenderedType::Record(rendered_fields, Box::new(render_var(uf, ext, on_path)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Descriptor;

    #[test]
    fn renders_int() {
        let mut uf = UnionFind::new();
        let v = uf.fresh(Descriptor::new(Content::Structure(FlatType::int()), 0));
        assert_eq!(to_src_type(&mut uf, v), RenderedType::Apply("Int".to_string(), vec![]));
    }

    #[test]
    fn renders_function_arrow() {
        let mut uf = UnionFind::new();
        let a = uf.fresh(Descriptor::new(Content::Structure(FlatType::int()), 0));
        let b = uf.fresh(Descriptor::new(Content::Structure(FlatType::string()), 0));
        let f = uf.fresh(Descriptor::new(Content::Structure(FlatType::Fun1(a, b)), 0));
        let rendered = to_src_type(&mut uf, f);
        assert_eq!(
            rendered,
            RenderedType::Fun(
                Box::new(RenderedType::Apply("Int".to_string(), vec![])),
                Box::new(RenderedType::Apply("String".to_string(), vec![])),
            )
        );
    }

    #[test]
    fn cyclic_graph_renders_as_recursive_marker_instead_of_looping() {
        let mut uf = UnionFind::new();
        let a = uf.fresh(Descriptor::new(Content::FlexVar(None), 0));
        uf.union(a, a, Descriptor::new(Content::Structure(FlatType::list(a)), 0));
        assert_eq!(
            to_src_type(&mut uf, a),
            RenderedType::Apply("List".to_string(), vec![RenderedType::Recursive])
        );
    }
}
