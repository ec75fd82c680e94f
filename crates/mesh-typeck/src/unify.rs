//! The unifier: `unify`/`guardedUnify` and every per-`Content` rule they
//! dispatch to. This is the core of the engine -- everything else in the
//! crate exists to support this module.

use rustc_hash::FxHashMap;

use crate::content::{is_prim, is_tuple, Content, FlatType, Name, Super, CHAR, FLOAT, INT, LIST, STRING};
use crate::error::{Hint, Orientation, Problem, Reason, SpecificThing, TypeError};
use crate::occurs::occurs;
use crate::render::to_src_type;
use crate::solver::{Region, SolverState};
use crate::var::Variable;

/// Attempt to unify `expected` and `actual`. On success, nothing further
/// happens. On failure, both sides are read back as source types, a
/// structured `TypeError` is appended to `solver`, and the two variables
/// are healed (unioned under an absorbing `Error` content) so the same
/// clash can't cascade into unrelated later errors. Returns whether
/// unification succeeded.
pub fn unify(
    solver: &mut SolverState,
    hint: Hint,
    region: Region,
    expected: Variable,
    actual: Variable,
) -> bool {
    match guarded_unify(solver, Orientation::ExpectedActual, expected, actual) {
        Ok(()) => true,
        Err(problem) => {
            let left = to_src_type(solver.uf(), expected);
            let error = match problem {
                Problem::Infinite => TypeError::InfiniteType { hint, rendered: left },
                Problem::Typical => TypeError::Mismatch {
                    hint,
                    left,
                    right: to_src_type(solver.uf(), actual),
                    reason: None,
                },
                Problem::Special(reason) => TypeError::Mismatch {
                    hint,
                    left,
                    right: to_src_type(solver.uf(), actual),
                    reason: Some(reason),
                },
            };
            solver.add_error(region, error);
            heal(solver, expected, actual);
            false
        }
    }
}

/// Union `a` and `b` under an absorbing `Error` content at `NO_RANK`, so
/// neither side can produce a second, cascading error later.
fn heal(solver: &mut SolverState, a: Variable, b: Variable) {
    use crate::content::{Descriptor, NO_RANK};
    let descriptor = Descriptor::new(Content::Error("?".to_string()), NO_RANK);
    solver.uf().union(a, b, descriptor);
}

/// One side of an active unification attempt: which variable, and its
/// descriptor's content/rank as read at the moment the attempt began.
struct Context {
    orientation: Orientation,
    var1: Variable,
    desc1: crate::content::Descriptor,
    var2: Variable,
    desc2: crate::content::Descriptor,
}

impl Context {
    fn reorient(self) -> Context {
        Context {
            orientation: self.orientation.reorient(),
            var1: self.var2,
            desc1: self.desc2,
            var2: self.var1,
            desc2: self.desc1,
        }
    }
}

/// Unify `a` and `b` if they aren't already in the same class. This is
/// the re-entrant core every structural rule recurses through.
fn guarded_unify(solver: &mut SolverState, orientation: Orientation, a: Variable, b: Variable) -> Result<(), Problem> {
    if solver.uf().equivalent(a, b) {
        return Ok(());
    }
    let desc1 = solver.uf().descriptor(a);
    let desc2 = solver.uf().descriptor(b);
    let ctx = Context {
        orientation,
        var1: a,
        desc1,
        var2: b,
        desc2,
    };
    actually_unify(solver, ctx)
}

/// Structural recursion propagates the enclosing context's orientation
/// unchanged -- this is just `guardedUnify` under a name that makes that
/// propagation visible at call sites.
fn sub_unify(solver: &mut SolverState, orientation: Orientation, a: Variable, b: Variable) -> Result<(), Problem> {
    guarded_unify(solver, orientation, a, b)
}

/// Install `content` at the merged class of `ctx.var1`/`ctx.var2`, with
/// rank set to the minimum of the two inputs' ranks (the merged class
/// generalizes no later than the more-local of the two).
fn merge(solver: &mut SolverState, ctx: &Context, content: Content) {
    let rank = ctx.desc1.rank.min(ctx.desc2.rank);
    let descriptor = crate::content::Descriptor::new(content, rank);
    solver.uf().union(ctx.var1, ctx.var2, descriptor);
}

/// Allocate a brand new variable at the rank the merge of `ctx`'s two
/// sides would use -- for helper variables synthesized mid-rule (record
/// sub-record tails, recursive-comparable checks) rather than installed
/// directly at `ctx`'s own class.
fn fresh(solver: &mut SolverState, ctx: &Context, content: Content) -> Variable {
    let rank = ctx.desc1.rank.min(ctx.desc2.rank);
    solver.fresh(content, rank)
}

fn actually_unify(solver: &mut SolverState, ctx: Context) -> Result<(), Problem> {
    match ctx.desc1.content.clone() {
        Content::FlexVar(_) => unify_flex_var(solver, ctx),
        Content::FlexSuper(s, _) => unify_flex_super(solver, ctx, s),
        Content::RigidVar(name) => unify_rigid(solver, ctx, name, None),
        Content::RigidSuper(s, name) => unify_rigid(solver, ctx, name, Some(s)),
        Content::Alias(name, args, real_var) => unify_alias(solver, ctx, name, args, real_var),
        Content::Structure(flat) => unify_structure(solver, ctx, flat),
        Content::Error(_) => Ok(()),
    }
}

// ── 4.4 / 4.5: flex var and super lattice ───────────────────────────

fn unify_flex_var(solver: &mut SolverState, ctx: Context) -> Result<(), Problem> {
    if matches!(ctx.desc2.content, Content::Error(_)) {
        return Ok(());
    }
    let content = ctx.desc2.content.clone();
    merge(solver, &ctx, content);
    Ok(())
}

fn unify_flex_super(solver: &mut SolverState, ctx: Context, super_: Super) -> Result<(), Problem> {
    match ctx.desc2.content.clone() {
        Content::FlexVar(_) => {
            merge(solver, &ctx, Content::FlexSuper(super_, None));
            Ok(())
        }
        Content::RigidVar(name) => Err(mismatch(
            solver,
            &ctx,
            Some(Reason::RigidVarTooGeneric(name, SpecificThing::SpecificSuper(super_))),
        )),
        Content::RigidSuper(rigid_super, name) => {
            if combine_rigid_supers(rigid_super, super_) {
                merge(solver, &ctx, Content::RigidSuper(rigid_super, name));
                Ok(())
            } else {
                Err(mismatch(
                    solver,
                    &ctx,
                    Some(Reason::RigidSuperTooGeneric(rigid_super, name, SpecificThing::SpecificSuper(super_))),
                ))
            }
        }
        Content::FlexSuper(other_super, _) => match combine_flex_supers(super_, other_super) {
            None => Err(mismatch(solver, &ctx, None)),
            Some(result) => {
                merge(solver, &ctx, Content::FlexSuper(result, None));
                Ok(())
            }
        },
        Content::Alias(_, _, real_var) => sub_unify(solver, ctx.orientation, ctx.var1, real_var),
        Content::Structure(flat) => unify_flex_super_structure(solver, ctx, super_, flat),
        Content::Error(_) => Ok(()),
    }
}

/// Combine the four built-in super-classes, e.g. `Comparable ∪ Appendable
/// → CompAppend`. `None` means the two constraints clash outright
/// (`Number` can never also be `Appendable`).
fn combine_flex_supers(a: Super, b: Super) -> Option<Super> {
    use Super::*;
    match (a, b) {
        (Number, Number) => Some(Number),
        (Number, Comparable) | (Comparable, Number) => Some(Number),
        (Number, Appendable) | (Appendable, Number) => None,
        (Number, CompAppend) | (CompAppend, Number) => None,
        (Comparable, Comparable) => Some(Comparable),
        (Comparable, Appendable) | (Appendable, Comparable) => Some(CompAppend),
        (Comparable, CompAppend) | (CompAppend, Comparable) => Some(CompAppend),
        (Appendable, Appendable) => Some(Appendable),
        (Appendable, CompAppend) | (CompAppend, Appendable) => Some(CompAppend),
        (CompAppend, CompAppend) => Some(CompAppend),
    }
}

/// Can a rigid variable fixed at `rigid` absorb a flexible constraint of
/// `flex`? True when they're the same super-class, or when `rigid` is
/// already a strict refinement of `flex` in the lattice (`Number` and
/// `CompAppend` are both beneath `Comparable`; `CompAppend` is beneath
/// `Appendable` too).
fn combine_rigid_supers(rigid: Super, flex: Super) -> bool {
    use Super::*;
    rigid == flex
        || (rigid, flex) == (Number, Comparable)
        || (rigid, flex) == (CompAppend, Comparable)
        || (rigid, flex) == (CompAppend, Appendable)
}

// ── 4.6: rigid rules ─────────────────────────────────────────────────

fn unify_rigid(solver: &mut SolverState, ctx: Context, name: Name, rigid_super: Option<Super>) -> Result<(), Problem> {
    match ctx.desc2.content.clone() {
        Content::FlexVar(_) => {
            let content = match rigid_super {
                Some(s) => Content::RigidSuper(s, name),
                None => Content::RigidVar(name),
            };
            merge(solver, &ctx, content);
            Ok(())
        }
        Content::FlexSuper(flex_super, _) => match rigid_super {
            Some(s) if combine_rigid_supers(s, flex_super) => {
                merge(solver, &ctx, Content::RigidSuper(s, name));
                Ok(())
            }
            Some(s) => Err(mismatch(
                solver,
                &ctx,
                Some(Reason::RigidSuperTooGeneric(s, name, SpecificThing::SpecificSuper(flex_super))),
            )),
            None => Err(mismatch(
                solver,
                &ctx,
                Some(Reason::RigidVarTooGeneric(name, SpecificThing::SpecificSuper(flex_super))),
            )),
        },
        Content::RigidVar(name2) | Content::RigidSuper(_, name2) => {
            Err(mismatch(solver, &ctx, Some(Reason::RigidClash(name, name2))))
        }
        Content::Alias(name2, _, _) => {
            let reason = too_generic_reason(name, rigid_super, SpecificThing::SpecificType(name2));
            Err(mismatch(solver, &ctx, Some(reason)))
        }
        Content::Structure(flat) => {
            let reason = too_generic_reason(name, rigid_super, flat_type_to_specific_thing(&flat));
            Err(mismatch(solver, &ctx, Some(reason)))
        }
        Content::Error(_) => Ok(()),
    }
}

fn too_generic_reason(name: Name, rigid_super: Option<Super>, specific: SpecificThing) -> Reason {
    match rigid_super {
        Some(s) => Reason::RigidSuperTooGeneric(s, name, specific),
        None => Reason::RigidVarTooGeneric(name, specific),
    }
}

fn flat_type_to_specific_thing(flat: &FlatType) -> SpecificThing {
    match flat {
        FlatType::App1(name, _) => SpecificThing::SpecificType(name.clone()),
        FlatType::Fun1(_, _) => SpecificThing::Function,
        FlatType::EmptyRecord1 | FlatType::Record1(_, _) => SpecificThing::Record,
    }
}

// ── 4.7: alias rules ─────────────────────────────────────────────────

fn unify_alias(
    solver: &mut SolverState,
    ctx: Context,
    name: Name,
    args: Vec<(Name, Variable)>,
    real_var: Variable,
) -> Result<(), Problem> {
    match ctx.desc2.content.clone() {
        Content::FlexVar(_) => {
            merge(solver, &ctx, Content::Alias(name, args, real_var));
            Ok(())
        }
        Content::Alias(name2, args2, _real_var2) if name == name2 && args.len() == args2.len() => {
            for ((_, a), (_, b)) in args.iter().zip(args2.iter()) {
                sub_unify(solver, ctx.orientation, *a, *b)?;
            }
            merge(solver, &ctx, Content::Alias(name, args, real_var));
            Ok(())
        }
        Content::Alias(_, _, real_var2) => sub_unify(solver, ctx.orientation, real_var, real_var2),
        _ => sub_unify(solver, ctx.orientation, real_var, ctx.var2),
    }
}

// ── 4.8: structure rules ─────────────────────────────────────────────

fn unify_structure(solver: &mut SolverState, ctx: Context, flat1: FlatType) -> Result<(), Problem> {
    match ctx.desc2.content.clone() {
        Content::FlexVar(_) => {
            merge(solver, &ctx, Content::Structure(flat1));
            Ok(())
        }
        Content::FlexSuper(s, _) => {
            let reoriented = ctx.reorient();
            unify_flex_super_structure(solver, reoriented, s, flat1)
        }
        Content::RigidVar(name) => Err(mismatch(
            solver,
            &ctx,
            Some(Reason::RigidVarTooGeneric(name, flat_type_to_specific_thing(&flat1))),
        )),
        Content::RigidSuper(s, name) => Err(mismatch(
            solver,
            &ctx,
            Some(Reason::RigidSuperTooGeneric(s, name, flat_type_to_specific_thing(&flat1))),
        )),
        Content::Alias(_, _, real_var) => sub_unify(solver, ctx.orientation, ctx.var1, real_var),
        Content::Structure(flat2) => unify_flat_flat(solver, ctx, flat1, flat2),
        Content::Error(_) => Ok(()),
    }
}

fn unify_flat_flat(solver: &mut SolverState, ctx: Context, flat1: FlatType, flat2: FlatType) -> Result<(), Problem> {
    match (flat1, flat2) {
        (FlatType::App1(n1, a1), FlatType::App1(n2, a2)) => {
            if n1 == n2 {
                if a1.len() != a2.len() {
                    return Err(mismatch(solver, &ctx, None));
                }
                for (x, y) in a1.iter().zip(a2.iter()) {
                    sub_unify(solver, ctx.orientation, *x, *y)?;
                }
                merge(solver, &ctx, Content::Structure(FlatType::App1(n1, a1)));
                Ok(())
            } else if is_int_float_pair(&n1, &n2) {
                Err(mismatch(solver, &ctx, Some(Reason::IntFloat)))
            } else {
                Err(mismatch(solver, &ctx, None))
            }
        }
        (FlatType::Fun1(a1, r1), FlatType::Fun1(a2, r2)) => {
            sub_unify(solver, ctx.orientation, a1, a2)?;
            sub_unify(solver, ctx.orientation, r1, r2)?;
            merge(solver, &ctx, Content::Structure(FlatType::Fun1(a1, r1)));
            Ok(())
        }
        (FlatType::EmptyRecord1, FlatType::EmptyRecord1) => {
            merge(solver, &ctx, Content::Structure(FlatType::EmptyRecord1));
            Ok(())
        }
        (FlatType::EmptyRecord1, FlatType::Record1(fields, ext)) if fields.is_empty() => {
            sub_unify(solver, ctx.orientation, ctx.var1, ext)
        }
        (FlatType::Record1(fields, ext), FlatType::EmptyRecord1) if fields.is_empty() => {
            sub_unify(solver, ctx.orientation, ext, ctx.var2)
        }
        (FlatType::Record1(f1, e1), FlatType::Record1(f2, e2)) => unify_records(solver, ctx, f1, e1, f2, e2),
        _ => Err(mismatch(solver, &ctx, None)),
    }
}

fn is_int_float_pair(n1: &str, n2: &str) -> bool {
    (is_prim(n1, INT) && is_prim(n2, FLOAT)) || (is_prim(n1, FLOAT) && is_prim(n2, INT))
}

// ── 4.9: flex-super vs structure ─────────────────────────────────────

fn unify_flex_super_structure(
    solver: &mut SolverState,
    ctx: Context,
    super_: Super,
    flat: FlatType,
) -> Result<(), Problem> {
    match &flat {
        FlatType::App1(name, args) if args.is_empty() => {
            if atom_matches_super(super_, name) {
                merge(solver, &ctx, Content::Structure(flat));
                Ok(())
            } else {
                Err(mismatch(solver, &ctx, Some(Reason::NotPartOfSuper(super_))))
            }
        }
        FlatType::App1(name, args) if name == LIST && args.len() == 1 => match super_ {
            Super::Number => Err(mismatch(solver, &ctx, Some(Reason::NotPartOfSuper(super_)))),
            Super::Appendable => {
                merge(solver, &ctx, Content::Structure(flat));
                Ok(())
            }
            Super::Comparable | Super::CompAppend => {
                if occurs(solver.uf(), ctx.var2) {
                    return Err(Problem::Infinite);
                }
                let elem_var = args[0];
                merge(solver, &ctx, Content::Structure(flat));
                unify_comparable_recursive(solver, ctx.orientation, elem_var)
            }
        },
        FlatType::App1(name, args) if is_tuple(name) => match super_ {
            Super::Number | Super::Appendable | Super::CompAppend => {
                Err(mismatch(solver, &ctx, Some(Reason::NotPartOfSuper(super_))))
            }
            Super::Comparable => {
                if args.len() > 6 {
                    Err(mismatch(solver, &ctx, Some(Reason::TooLongComparableTuple(args.len()))))
                } else if occurs(solver.uf(), ctx.var2) {
                    Err(Problem::Infinite)
                } else {
                    let elems = args.clone();
                    merge(solver, &ctx, Content::Structure(flat));
                    for elem in elems {
                        unify_comparable_recursive(solver, ctx.orientation, elem)?;
                    }
                    Ok(())
                }
            }
        },
        _ => Err(mismatch(solver, &ctx, Some(Reason::NotPartOfSuper(super_)))),
    }
}

fn atom_matches_super(super_: Super, name: &str) -> bool {
    match super_ {
        Super::Number => name == INT || name == FLOAT,
        Super::Comparable => name == STRING || name == INT || name == FLOAT || name == CHAR,
        Super::Appendable => name == STRING,
        Super::CompAppend => name == STRING,
    }
}

// ── 4.11: recursive comparable check ─────────────────────────────────

/// Constrain `v` to be `Comparable` too, by unifying it against a fresh
/// `FlexSuper(Comparable)` variable at its own rank -- used to push the
/// comparable constraint into the element type of a `List`/tuple that was
/// just accepted as `Comparable`.
fn unify_comparable_recursive(solver: &mut SolverState, orientation: Orientation, v: Variable) -> Result<(), Problem> {
    let rank = solver.uf().descriptor(v).rank;
    let comparable_var = solver.fresh(Content::FlexSuper(Super::Comparable, None), rank);
    guarded_unify(solver, orientation, comparable_var, v)
}

// ── 4.10: record row unification ─────────────────────────────────────

enum RowShape {
    Empty,
    Extension,
}

/// Chase a record's tail variable, accumulating fields from any nested
/// `Record1`s and unwrapping transparent aliases, until it bottoms out at
/// either `EmptyRecord1` (a fully closed row) or some other content (an
/// open tail: a flex/rigid var, a super-constrained var, or an `Error`).
fn gather_fields(
    solver: &mut SolverState,
    fields: FxHashMap<Name, Variable>,
    ext: Variable,
) -> (FxHashMap<Name, Variable>, Variable, RowShape) {
    let mut all_fields = fields;
    let mut tail = ext;
    loop {
        let content = solver.uf().descriptor(tail).content.clone();
        match content {
            Content::Structure(FlatType::Record1(more_fields, next_ext)) => {
                all_fields.extend(more_fields);
                tail = next_ext;
            }
            Content::Structure(FlatType::EmptyRecord1) => return (all_fields, tail, RowShape::Empty),
            Content::Alias(_, _, real_var) => tail = real_var,
            _ => return (all_fields, tail, RowShape::Extension),
        }
    }
}

fn unify_records(
    solver: &mut SolverState,
    ctx: Context,
    f1: FxHashMap<Name, Variable>,
    e1: Variable,
    f2: FxHashMap<Name, Variable>,
    e2: Variable,
) -> Result<(), Problem> {
    let (fields1, tail1, shape1) = gather_fields(solver, f1, e1);
    let (fields2, tail2, shape2) = gather_fields(solver, f2, e2);

    let mut all_names: Vec<Name> = fields1.keys().chain(fields2.keys()).cloned().collect();
    all_names.sort();
    all_names.dedup();

    let mut shared = Vec::new();
    let mut only_l = Vec::new();
    let mut only_r = Vec::new();
    for name in all_names {
        match (fields1.get(&name), fields2.get(&name)) {
            (Some(a), Some(b)) => shared.push((name, *a, *b)),
            (Some(a), None) => only_l.push((name, *a)),
            (None, Some(b)) => only_r.push((name, *b)),
            (None, None) => unreachable!("name drawn from the union of both field maps"),
        }
    }

    match (shape1, only_l.is_empty(), shape2, only_r.is_empty()) {
        // Both sides' extra fields (if any) are already accounted for in
        // the other: unify the tails directly and merge the shared fields.
        (_, true, _, true) => {
            sub_unify(solver, ctx.orientation, tail1, tail2)?;
            let merged = unify_shared_fields_or_fail(solver, &ctx, &shared)?;
            merge(solver, &ctx, Content::Structure(FlatType::Record1(merged, tail1)));
            Ok(())
        }
        // A fully closed row is missing fields the other side requires.
        (RowShape::Empty, _, _, false) | (_, false, RowShape::Empty, _) => {
            let shared_keys = shared.iter().map(|(n, _, _)| n.clone()).collect();
            let only_l_keys = only_l.iter().map(|(n, _)| n.clone()).collect();
            let only_r_keys = only_r.iter().map(|(n, _)| n.clone()).collect();
            Err(mismatch(
                solver,
                &ctx,
                Some(Reason::MessyFields(shared_keys, only_l_keys, only_r_keys)),
            ))
        }
        // The left side has extra fields: package them with its tail into
        // a fresh sub-record and unify that against the right tail.
        (_, false, _, true) => {
            let sub_record = fresh(
                solver,
                &ctx,
                Content::Structure(FlatType::Record1(only_l.iter().cloned().collect(), tail1)),
            );
            sub_unify(solver, ctx.orientation, sub_record, tail2)?;
            let merged = unify_shared_fields_or_fail(solver, &ctx, &shared)?;
            merge(solver, &ctx, Content::Structure(FlatType::Record1(merged, sub_record)));
            Ok(())
        }
        // Symmetric case: the right side has the extra fields.
        (_, true, _, false) => {
            let sub_record = fresh(
                solver,
                &ctx,
                Content::Structure(FlatType::Record1(only_r.iter().cloned().collect(), tail2)),
            );
            sub_unify(solver, ctx.orientation, tail1, sub_record)?;
            let merged = unify_shared_fields_or_fail(solver, &ctx, &shared)?;
            merge(solver, &ctx, Content::Structure(FlatType::Record1(merged, sub_record)));
            Ok(())
        }
        // Both sides are genuinely open and each has fields the other
        // lacks: synthesize a shared fresh tail both sides extend with
        // the other's extra fields.
        (RowShape::Extension, false, RowShape::Extension, false) => {
            let sub_ext = fresh(solver, &ctx, Content::FlexVar(None));
            let exp_record = fresh(
                solver,
                &ctx,
                Content::Structure(FlatType::Record1(only_r.iter().cloned().collect(), sub_ext)),
            );
            let act_record = fresh(
                solver,
                &ctx,
                Content::Structure(FlatType::Record1(only_l.iter().cloned().collect(), sub_ext)),
            );
            sub_unify(solver, ctx.orientation, tail1, exp_record)?;
            sub_unify(solver, ctx.orientation, act_record, tail2)?;
            let mut merged = unify_shared_fields_or_fail(solver, &ctx, &shared)?;
            merged.extend(only_l);
            merged.extend(only_r);
            merge(solver, &ctx, Content::Structure(FlatType::Record1(merged, sub_ext)));
            Ok(())
        }
    }
}

/// Unify every shared field independently, collecting per-field failures
/// instead of short-circuiting on the first one, in ascending field-name
/// order (so the result is deterministic regardless of the arbitrary
/// `FxHashMap` iteration order the fields arrived in).
fn unify_shared_fields(
    solver: &mut SolverState,
    orientation: Orientation,
    shared: &[(Name, Variable, Variable)],
) -> Result<FxHashMap<Name, Variable>, Vec<(Name, Option<Reason>)>> {
    let mut merged = FxHashMap::default();
    let mut failures = Vec::new();
    for (name, a, b) in shared {
        match guarded_unify(solver, orientation, *a, *b) {
            Ok(()) => {
                merged.insert(name.clone(), *a);
            }
            Err(Problem::Special(reason)) => failures.push((name.clone(), Some(reason))),
            Err(_) => failures.push((name.clone(), None)),
        }
    }
    if failures.is_empty() {
        Ok(merged)
    } else {
        Err(failures)
    }
}

fn unify_shared_fields_or_fail(
    solver: &mut SolverState,
    ctx: &Context,
    shared: &[(Name, Variable, Variable)],
) -> Result<FxHashMap<Name, Variable>, Problem> {
    match unify_shared_fields(solver, ctx.orientation, shared) {
        Ok(merged) => Ok(merged),
        Err(failures) => Err(mismatch(solver, ctx, Some(Reason::BadFields(failures)))),
    }
}

// ── 4.12: mismatch construction ──────────────────────────────────────

/// The single place a `Problem` is actually built from a candidate
/// reason. Runs the occurs check on both sides of the context first
/// (promoting to `Problem::Infinite` if either is now cyclic), then
/// compares the argument spines of both sides (peeling curried `Fun1`
/// chains): if they match in length, the given reason is reported as-is
/// (flipped if the context is oriented actual-first); if they don't,
/// individual arguments are unified best-effort over the overlap and the
/// reason is overridden with `MissingArgs` describing the arity gap.
fn mismatch(solver: &mut SolverState, ctx: &Context, maybe_reason: Option<Reason>) -> Problem {
    if occurs(solver.uf(), ctx.var1) || occurs(solver.uf(), ctx.var2) {
        return Problem::Infinite;
    }
    let spine1 = collect_args(solver, ctx.var1);
    let spine2 = collect_args(solver, ctx.var2);
    if spine1.len() == spine2.len() {
        match maybe_reason {
            None => Problem::Typical,
            Some(reason) => {
                let reason = if ctx.orientation == Orientation::ActualExpected {
                    crate::error::flip_reason(reason)
                } else {
                    reason
                };
                Problem::Special(reason)
            }
        }
    } else {
        let overlap = spine1.len().min(spine2.len());
        for i in 0..overlap {
            let _ = sub_unify(solver, ctx.orientation, spine1[i], spine2[i]);
        }
        Problem::Special(Reason::MissingArgs(spine1.len().abs_diff(spine2.len())))
    }
}

fn collect_args(solver: &mut SolverState, var: Variable) -> Vec<Variable> {
    let mut args = Vec::new();
    let mut current = var;
    loop {
        match solver.uf().descriptor(current).content {
            Content::Structure(FlatType::Fun1(arg, ret)) => {
                args.push(arg);
                current = ret;
            }
            _ => break,
        }
    }
    args
}
