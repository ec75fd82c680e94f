//! The `Content` sum type and its structural payloads -- the data stored
//! at every union-find representative (see [`crate::var::UnionFind`]).

use rustc_hash::FxHashMap;

use crate::var::Variable;

/// A type-variable or record-field name. Advisory in most positions (kept
/// around for diagnostics); load-bearing only where a rule cares about it
/// directly (alias constructor names, record field names, rigid-variable
/// identity for `RigidClash`).
pub type Name = String;

/// Generalization rank: the scope depth at which a variable was
/// introduced. Lower ranks generalize later (they're visible further out).
/// On union the surviving rank is the minimum of the two inputs.
pub type Rank = u32;

/// The rank synthetic/healed variables are born at -- lower than any rank
/// a real scope could introduce.
pub const NO_RANK: Rank = 0;

/// Sweep-local generation marker used by passes outside this crate (e.g. a
/// generalization walk marking which variables it has already visited).
/// Unification itself never reads a mark, only resets it to `NONE` when a
/// class is merged, since the merged class is logically a new node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Mark(pub u32);

impl Mark {
    pub const NONE: Mark = Mark(0);
}

/// One of the four built-in ad-hoc constraints ("super" variables) that
/// stand in for real typeclasses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Super {
    Number,
    Comparable,
    Appendable,
    CompAppend,
}

/// The payload stored at a union-find representative.
#[derive(Clone, Debug)]
pub struct Descriptor {
    pub content: Content,
    pub rank: Rank,
    pub mark: Mark,
    pub copy: Option<Variable>,
}

impl Descriptor {
    pub fn new(content: Content, rank: Rank) -> Self {
        Descriptor {
            content,
            rank,
            mark: Mark::NONE,
            copy: None,
        }
    }
}

/// The semantic shape stored at a type-graph node.
#[derive(Clone, Debug)]
pub enum Content {
    /// An unbound, fully polymorphic variable. Optionally user-named (as
    /// it would be after an annotation mentions it before it's pinned down).
    FlexVar(Option<Name>),
    /// An unbound variable additionally constrained to one of the four
    /// built-in super-classes.
    FlexSuper(Super, Option<Name>),
    /// A rigid (skolem) variable: introduced by an explicit annotation and
    /// not allowed to unify with any concrete type, only with itself.
    RigidVar(Name),
    /// A rigid variable additionally constrained to a super-class.
    RigidSuper(Super, Name),
    /// A type alias: the constructor name, its (name, argument) pairs as
    /// written at the use site, and the variable holding its expansion.
    /// Transparent for unification (everything actually happens through
    /// `real_var`); kept only so diagnostics can show the alias name the
    /// user wrote instead of its expansion.
    Alias(Name, Vec<(Name, Variable)>, Variable),
    /// A concrete structural type.
    Structure(FlatType),
    /// The absorbing content installed by healing after a reported
    /// mismatch. Unifies silently with anything to prevent cascades.
    Error(Name),
}

/// A concrete type shape: constructor application, function arrow, or
/// extensible record row.
#[derive(Clone, Debug)]
pub enum FlatType {
    /// A type constructor applied to zero or more arguments (`Int`,
    /// `List a`, `Tuple2 a b`, a user-defined `App1`).
    App1(Name, Vec<Variable>),
    /// A single-argument function arrow; curried functions are chains of
    /// these (`Fun1(a, Fun1(b, c))` for `a -> b -> c`).
    Fun1(Variable, Variable),
    /// The empty, fully closed record.
    EmptyRecord1,
    /// An extensible record: the fields known so far, plus a tail variable
    /// that may itself resolve to more fields, `EmptyRecord1`, or remain
    /// open (flex/rigid).
    Record1(FxHashMap<Name, Variable>, Variable),
}

impl FlatType {
    pub fn int() -> FlatType {
        FlatType::App1(INT.to_string(), Vec::new())
    }

    pub fn float() -> FlatType {
        FlatType::App1(FLOAT.to_string(), Vec::new())
    }

    pub fn string() -> FlatType {
        FlatType::App1(STRING.to_string(), Vec::new())
    }

    pub fn char() -> FlatType {
        FlatType::App1(CHAR.to_string(), Vec::new())
    }

    pub fn list(elem: Variable) -> FlatType {
        FlatType::App1(LIST.to_string(), vec![elem])
    }

    pub fn tuple(elems: Vec<Variable>) -> FlatType {
        FlatType::App1(format!("Tuple{}", elems.len()), elems)
    }
}

// ── Canonical names ──────────────────────────────────────────────────
//
// Constructor names are plain, already-canonicalized strings in this
// crate (module qualification, if any, is resolved upstream); these are
// just the handful of built-ins the super-class lattice and tuple/list
// rules need to recognize by name.

pub const INT: &str = "Int";
pub const FLOAT: &str = "Float";
pub const STRING: &str = "String";
pub const CHAR: &str = "Char";
pub const LIST: &str = "List";

/// Is `name` the given canonical primitive name?
pub fn is_prim(name: &str, canonical: &str) -> bool {
    name == canonical
}

/// Is `name` one of the synthesized tuple constructor names (`Tuple2`,
/// `Tuple3`, ...)?
pub fn is_tuple(name: &str) -> bool {
    name.starts_with("Tuple")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_constructor_naming() {
        let flat = FlatType::tuple(vec![]);
        match flat {
            FlatType::App1(name, args) => {
                assert_eq!(name, "Tuple0");
                assert!(args.is_empty());
                assert!(is_tuple(&name));
            }
            _ => panic!("expected App1"),
        }
    }

    #[test]
    fn is_prim_matches_canonical_name_only() {
        assert!(is_prim(INT, INT));
        assert!(!is_prim(INT, FLOAT));
    }
}
