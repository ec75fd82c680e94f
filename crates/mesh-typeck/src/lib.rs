//! A Hindley-Milner unification engine: rigid and flexible type
//! variables, a small built-in super-class lattice (`Number`,
//! `Comparable`, `Appendable`, `CompAppend`), transparent type aliases,
//! and extensible row-polymorphic records, backed by a destructive
//! rank-based union-find.
//!
//! This crate implements the solver's core comparison step only --
//! constraint generation, generalization, and diagnostic rendering are
//! the responsibility of an upstream driver. [`solver::SolverState`] is
//! this crate's minimal stand-in for that driver's bookkeeping, just
//! enough to exercise [`unify::unify`] end to end.
//!
//! # Modules
//!
//! - [`content`] -- the `Content`/`FlatType`/`Super` data model stored at
//!   every union-find representative.
//! - [`var`] -- the destructive, rank-based union-find arena.
//! - [`occurs`] -- cycle detection over a variable's structural expansion.
//! - [`solver`] -- `SolverState`, the variable registry and error sink.
//! - [`error`] -- the `Problem`/`TypeError`/`Reason` error model and
//!   orientation-flip.
//! - [`render`] -- reads a variable back out of the graph as a plain tree
//!   for embedding in a reported error.
//! - [`unify`] -- the unifier itself: every rule in the comparison.

pub mod content;
pub mod error;
pub mod occurs;
pub mod render;
pub mod solver;
pub mod unify;
pub mod var;

pub use content::{Content, Descriptor, FlatType, Mark, Name, Rank, Super, NO_RANK};
pub use error::{Hint, Orientation, Problem, Reason, SpecificThing, TypeError};
pub use render::{to_src_type, RenderedType};
pub use solver::{Region, SolverState};
pub use unify::unify;
pub use var::{UnionFind, Variable};
