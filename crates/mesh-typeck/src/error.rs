//! The closed mismatch-reason taxonomy, the orientation-flip operation,
//! and the two-tier `Problem` (internal) / `TypeError` (reported) error
//! model.

use crate::content::{Name, Super};
use crate::render::RenderedType;
use crate::solver::Region;

/// Which side of a constraint was the "expected" type coming in versus
/// the "actual"/inferred type. Exists purely so `Reason`s can be flipped
/// at the report site, keeping user-facing messages pointed at the right
/// side regardless of which order `unify`'s arguments happened to be in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    ExpectedActual,
    ActualExpected,
}

impl Orientation {
    pub fn reorient(self) -> Orientation {
        match self {
            Orientation::ExpectedActual => Orientation::ActualExpected,
            Orientation::ActualExpected => Orientation::ExpectedActual,
        }
    }
}

/// What specific thing a rigid variable was compared against, for the
/// `*TooGeneric` reasons.
#[derive(Clone, Debug, PartialEq)]
pub enum SpecificThing {
    SpecificType(Name),
    SpecificSuper(Super),
    Function,
    Record,
}

/// The closed taxonomy of specific mismatch reasons. `None` (elsewhere,
/// as `Option<Reason>`) stands for an unremarkable "these two types are
/// just different" mismatch with no more specific story to tell.
#[derive(Clone, Debug, PartialEq)]
pub enum Reason {
    BadFields(Vec<(Name, Option<Reason>)>),
    MessyFields(Vec<Name>, Vec<Name>, Vec<Name>),
    IntFloat,
    TooLongComparableTuple(usize),
    MissingArgs(usize),
    RigidClash(Name, Name),
    NotPartOfSuper(Super),
    RigidVarTooGeneric(Name, SpecificThing),
    RigidSuperTooGeneric(Super, Name, SpecificThing),
}

/// Structural and total. Swaps whatever in a `Reason` refers to "the left
/// side" versus "the right side" so that re-orienting a context and
/// flipping its reason together describe the same failure from the other
/// side. Idempotent: `flip_reason(flip_reason(r)) == r`, except that
/// `BadFields`'s nested reasons are flipped one level deeper each time,
/// which is still idempotent per-level since flipping is itself
/// idempotent at every depth.
pub fn flip_reason(reason: Reason) -> Reason {
    match reason {
        Reason::BadFields(fields) => Reason::BadFields(
            fields
                .into_iter()
                .map(|(name, r)| (name, r.map(flip_reason)))
                .collect(),
        ),
        Reason::MessyFields(shared, only_l, only_r) => Reason::MessyFields(shared, only_r, only_l),
        Reason::RigidClash(a, b) => Reason::RigidClash(b, a),
        other => other,
    }
}

/// Where a constraint came from -- why the solver decided two types
/// should be equal. Carried through to the reported error only; the
/// unifier never inspects it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hint {
    FnArg { call_site: Region, param_index: usize },
    BinOp { op_span: Region },
    IfBranches { if_span: Region, then_span: Region, else_span: Region },
    Annotation { annotation_span: Region },
    Return { return_span: Region, fn_span: Region },
    LetBinding { binding_span: Region },
    Assignment { lhs_span: Region, rhs_span: Region },
    Builtin,
}

/// The outcome of one failed `guardedUnify` call, before it's turned into
/// a reported `TypeError`. Exists so `mismatch` can route "this failed,
/// here's why" through a single construction point that also runs the
/// occurs check and the argument-spine arity adjustment.
#[derive(Clone, Debug, PartialEq)]
pub enum Problem {
    /// An unremarkable mismatch: no special reason, same arity.
    Typical,
    /// A mismatch with a specific, named reason.
    Special(Reason),
    /// The occurs check tripped: binding would create an infinite type.
    Infinite,
}

/// A mismatch reported to `SolverState` once a top-level `unify` call
/// fails.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeError {
    Mismatch {
        hint: Hint,
        left: RenderedType,
        right: RenderedType,
        reason: Option<Reason>,
    },
    InfiniteType { hint: Hint, rendered: RenderedType },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_reason_is_identity_for_most_variants() {
        let r = Reason::IntFloat;
        assert_eq!(flip_reason(r.clone()), r);
    }

    #[test]
    fn flip_reason_swaps_rigid_clash_names() {
        let r = Reason::RigidClash("a".to_string(), "b".to_string());
        assert_eq!(flip_reason(r), Reason::RigidClash("b".to_string(), "a".to_string()));
    }

    #[test]
    fn flip_reason_swaps_messy_fields_only_sides() {
        let r = Reason::MessyFields(vec!["x".to_string()], vec!["l".to_string()], vec!["r".to_string()]);
        assert_eq!(
            flip_reason(r),
            Reason::MessyFields(vec!["x".to_string()], vec!["r".to_string()], vec!["l".to_string()])
        );
    }

    #[test]
    fn flip_reason_is_idempotent_after_two_applications() {
        let r = Reason::BadFields(vec![("x".to_string(), Some(Reason::IntFloat)), ("y".to_string(), None)]);
        assert_eq!(flip_reason(flip_reason(r.clone())), r);
    }
}
