//! `SolverState`: this crate's minimal stand-in for the outer solver
//! driver's bookkeeping -- a registry of live variables, the union-find
//! arena, and an append-only error sink. A real compiler's driver owns
//! constraint generation and generalization on top of this; here it
//! exists so the unifier can be exercised and tested end-to-end without a
//! parser or a surrounding type-inference pass.

use rowan::TextRange;

use crate::content::{Content, Descriptor, FlatType, Name, Rank, Super};
use crate::error::TypeError;
use crate::var::{UnionFind, Variable};

/// A pre-computed source region. The region model itself -- mapping this
/// back to line/column text -- lives upstream, in whatever parser
/// produced the constraints; this crate treats it as an opaque, `Copy`
/// handle carried along purely for error reporting.
pub type Region = TextRange;

/// Owns the union-find arena, the registry of live variables, and the
/// append-only error sink for one solver session.
#[derive(Default)]
pub struct SolverState {
    uf: UnionFind,
    variables: Vec<Variable>,
    errors: Vec<(Region, TypeError)>,
}

impl SolverState {
    pub fn new() -> Self {
        SolverState {
            uf: UnionFind::new(),
            variables: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Allocate and register a fresh variable with the given content and
    /// rank.
    pub fn fresh(&mut self, content: Content, rank: Rank) -> Variable {
        let var = self.uf.fresh(Descriptor::new(content, rank));
        self.register(var);
        var
    }

    pub fn fresh_flex_var(&mut self, rank: Rank) -> Variable {
        self.fresh(Content::FlexVar(None), rank)
    }

    pub fn fresh_flex_super(&mut self, super_: Super, rank: Rank) -> Variable {
        self.fresh(Content::FlexSuper(super_, None), rank)
    }

    pub fn fresh_rigid_var(&mut self, name: impl Into<Name>, rank: Rank) -> Variable {
        self.fresh(Content::RigidVar(name.into()), rank)
    }

    pub fn fresh_rigid_super(&mut self, super_: Super, name: impl Into<Name>, rank: Rank) -> Variable {
        self.fresh(Content::RigidSuper(super_, name.into()), rank)
    }

    pub fn fresh_structure(&mut self, flat: FlatType, rank: Rank) -> Variable {
        self.fresh(Content::Structure(flat), rank)
    }

    /// Record a variable allocated elsewhere (e.g. inside a test helper
    /// building a `UnionFind` directly) as part of this session.
    pub fn register(&mut self, var: Variable) {
        self.variables.push(var);
    }

    pub fn add_error(&mut self, region: Region, err: TypeError) {
        self.errors.push((region, err));
    }

    pub fn errors(&self) -> &[(Region, TypeError)] {
        &self.errors
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn uf(&mut self) -> &mut UnionFind {
        &mut self.uf
    }
}
