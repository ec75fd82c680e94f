//! Destructive union-find over type variables.
//!
//! Variables are stable indices into an arena of descriptor cells. Each
//! cell stores a mutable `parent` pointer (path-compressed by `find`) and,
//! meaningfully only at roots, a `Descriptor`.

use crate::content::Descriptor;

/// A handle into the union-find arena. Cheap to copy; meaningless once the
/// `UnionFind` that produced it is dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable(u32);

impl Variable {
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct Cell {
    parent: Variable,
    descriptor: Descriptor,
}

/// The destructive union-find forest backing one solver session.
#[derive(Default)]
pub struct UnionFind {
    cells: Vec<Cell>,
}

impl UnionFind {
    pub fn new() -> Self {
        UnionFind { cells: Vec::new() }
    }

    /// Register a brand new, isolated class and return its handle.
    pub fn fresh(&mut self, descriptor: Descriptor) -> Variable {
        let var = Variable(self.cells.len() as u32);
        self.cells.push(Cell {
            parent: var,
            descriptor,
        });
        var
    }

    /// Find the representative of `v`'s class, compressing the path to it.
    pub fn find(&mut self, v: Variable) -> Variable {
        let parent = self.cells[v.index()].parent;
        if parent == v {
            return v;
        }
        let root = self.find(parent);
        self.cells[v.index()].parent = root;
        root
    }

    /// Are `a` and `b` already in the same class?
    pub fn equivalent(&mut self, a: Variable, b: Variable) -> bool {
        self.find(a) == self.find(b)
    }

    /// The descriptor currently stored at `v`'s representative.
    pub fn descriptor(&mut self, v: Variable) -> Descriptor {
        let root = self.find(v);
        self.cells[root.index()].descriptor.clone()
    }

    /// Merge the classes of `a` and `b`, installing `new_descriptor` at the
    /// surviving root. The surviving root is whichever of `find(a)`,
    /// `find(b)` has the lower rank (ties broken toward `find(a)`); callers
    /// that need the merged rank/mark/copy to follow specific rules must
    /// bake that into `new_descriptor` themselves -- `union` only performs
    /// the graph surgery.
    pub fn union(&mut self, a: Variable, b: Variable, new_descriptor: Descriptor) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            self.cells[ra.index()].descriptor = new_descriptor;
            return;
        }
        let (root, other) = if self.cells[ra.index()].descriptor.rank <= self.cells[rb.index()].descriptor.rank {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.cells[other.index()].parent = root;
        self.cells[root.index()].descriptor = new_descriptor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, Mark};

    fn flex(uf: &mut UnionFind, rank: u32) -> Variable {
        uf.fresh(Descriptor::new(Content::FlexVar(None), rank))
    }

    #[test]
    fn fresh_variables_are_their_own_representative() {
        let mut uf = UnionFind::new();
        let a = flex(&mut uf, 0);
        assert_eq!(uf.find(a), a);
    }

    #[test]
    fn union_makes_variables_equivalent() {
        let mut uf = UnionFind::new();
        let a = flex(&mut uf, 0);
        let b = flex(&mut uf, 0);
        assert!(!uf.equivalent(a, b));
        uf.union(a, b, Descriptor::new(Content::FlexVar(None), 0));
        assert!(uf.equivalent(a, b));
    }

    #[test]
    fn union_installs_new_descriptor_at_surviving_root() {
        let mut uf = UnionFind::new();
        let a = flex(&mut uf, 0);
        let b = flex(&mut uf, 0);
        uf.union(a, b, Descriptor::new(Content::Structure(crate::content::FlatType::int()), 0));
        assert!(matches!(uf.descriptor(a).content, Content::Structure(_)));
        assert!(matches!(uf.descriptor(b).content, Content::Structure(_)));
    }

    #[test]
    fn union_by_rank_attaches_lower_rank_under_higher() {
        let mut uf = UnionFind::new();
        let a = flex(&mut uf, 0);
        let b = flex(&mut uf, 5);
        uf.union(a, b, Descriptor::new(Content::FlexVar(None), 0));
        // whichever carried the lower rank becomes the child; both still resolve together.
        assert_eq!(uf.find(a), uf.find(b));
    }

    #[test]
    fn mark_resets_to_none_on_a_fresh_descriptor() {
        let mut uf = UnionFind::new();
        let a = flex(&mut uf, 0);
        let mut d = uf.descriptor(a);
        d.mark = Mark(7);
        uf.union(a, a, d);
        assert_eq!(uf.descriptor(a).mark, Mark(7));
        let b = flex(&mut uf, 0);
        uf.union(a, b, Descriptor::new(Content::FlexVar(None), 0));
        assert_eq!(uf.descriptor(a).mark, Mark::NONE);
    }
}
