//! Strategy selection and execution for every combinator.
//!
//! [`plan`] is the dispatch table: given an operation, the operand's shape and the
//! relevant capability set it names one [`Strategy`]. All three inputs are associated
//! constants of the operand type, so the table is folded away when the engine is
//! monomorphized and only the chosen strategy's code remains.
use crate::capability::{Capabilities, Classify};
use crate::container::{rebuild_retaining, Container, Rebind, Ref, Socketed};
use crate::optional;
use crate::shape::Shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Op {
    Unit,
    Map,
    FlatMap,
    Filter,
    ForEach,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Strategy {
    /// empty container plus one insertion
    Construct,
    /// zero-or-one element: skip the function entirely when absent
    ShortCircuit,
    /// reserve up front, fill in order, shrink to fit
    Reserved,
    /// fill in order, appending
    Append,
    /// fill by insertion, collapsing duplicates
    Union,
    /// compact survivors in one pass, then truncate
    Compact,
    /// remove failing elements in place
    Erase,
    /// move survivors into a fresh container
    Rebuild,
    /// borrow each element in turn
    Visit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Plan {
    pub op: Op,
    pub shape: Shape,
    pub strategy: Strategy,
}

impl Plan {
    pub const fn new(op: Op, shape: Shape, caps: Capabilities) -> Plan {
        Plan {
            op,
            shape,
            strategy: plan(op, shape, caps),
        }
    }
}

/// The dispatch table.
///
/// `caps` are the capabilities of the container being written to: the destination for
/// `Map` and `FlatMap`, the source itself for `Filter`.
///
/// ```rust
/// use socketed::{plan, Classify, Op, Shape, Strategy};
/// use std::collections::LinkedList;
///
/// let caps = <LinkedList<u8>>::CAPABILITIES;
/// assert_eq!(plan(Op::Filter, Shape::Vector, caps), Strategy::Rebuild);
/// assert_eq!(plan(Op::Map, Shape::Vector, caps), Strategy::Append);
/// ```
pub const fn plan(op: Op, shape: Shape, caps: Capabilities) -> Strategy {
    match (op, shape) {
        (Op::Unit, _) => Strategy::Construct,
        (Op::ForEach, _) => Strategy::Visit,
        (Op::Map | Op::FlatMap, Shape::Optional) => Strategy::ShortCircuit,
        (Op::Map | Op::FlatMap, _) if caps.reservable => Strategy::Reserved,
        (Op::Map | Op::FlatMap, Shape::Set | Shape::Map) => Strategy::Union,
        (Op::Map | Op::FlatMap, _) => Strategy::Append,
        (Op::Filter, _) if caps.remove_ifable => Strategy::Compact,
        (Op::Filter, _) if caps.erasable => Strategy::Erase,
        (Op::Filter, _) => Strategy::Rebuild,
    }
}

pub const fn unit_plan<C: Container>() -> Plan {
    Plan::new(Op::Unit, C::SHAPE, C::CAPABILITIES)
}

pub const fn map_plan<C: Rebind<B>, B>() -> Plan {
    Plan::new(Op::Map, C::SHAPE, <C::To as Classify>::CAPABILITIES)
}

pub const fn flat_map_plan<C: Rebind<B>, B>() -> Plan {
    Plan::new(Op::FlatMap, C::SHAPE, <C::To as Classify>::CAPABILITIES)
}

pub const fn filter_plan<C: Container>() -> Plan {
    Plan::new(Op::Filter, C::SHAPE, C::CAPABILITIES)
}

pub const fn for_each_plan<C: Container>() -> Plan {
    Plan::new(Op::ForEach, C::SHAPE, C::CAPABILITIES)
}

fn trace(plan: Plan, len: usize) {
    tracing::trace!(
        op = ?plan.op,
        shape = %plan.shape,
        strategy = ?plan.strategy,
        len,
        "applying combinator"
    );
}

/// Wrap a single value in a container, using its construction pattern. For maps the value
/// is the `(key, value)` pair.
///
/// ```rust
/// let present: Option<String> = socketed::unit("abc");
/// assert_eq!(present.as_deref(), Some("abc"));
///
/// let one = socketed::unit::<Vec<u8>>(7);
/// assert_eq!(one, vec![7]);
/// ```
pub fn unit<C: Container>(value: impl Into<C::Item>) -> C {
    trace(unit_plan::<C>(), 1);
    let mut out = C::empty();
    out.put(value.into());
    out
}

pub fn map<C, B>(source: C, mut f: impl FnMut(C::Socket) -> B) -> C::To
where
    C: Rebind<B>,
{
    let plan = map_plan::<C, B>();
    let len = source.size();
    trace(plan, len);

    match plan.strategy {
        Strategy::ShortCircuit => optional::map(source, f),
        Strategy::Reserved => {
            let mut out = C::To::empty();
            out.reserve_hint(len);
            for item in source.into_items() {
                let (rest, socket) = C::split(item);
                out.put(C::join(rest, f(socket)));
            }
            out.shrink_hint();
            out
        }
        _ => {
            let mut out = C::To::empty();
            for item in source.into_items() {
                let (rest, socket) = C::split(item);
                out.put(C::join(rest, f(socket)));
            }
            out
        }
    }
}

pub fn try_map<C, B, E>(source: C, mut f: impl FnMut(C::Socket) -> Result<B, E>) -> Result<C::To, E>
where
    C: Rebind<B>,
{
    let plan = map_plan::<C, B>();
    let len = source.size();
    trace(plan, len);

    if let Strategy::ShortCircuit = plan.strategy {
        return optional::try_map(source, f);
    }

    let reserved = matches!(plan.strategy, Strategy::Reserved);
    let mut out = C::To::empty();
    if reserved {
        out.reserve_hint(len);
    }
    for item in source.into_items() {
        let (rest, socket) = C::split(item);
        out.put(C::join(rest, f(socket)?));
    }
    if reserved {
        out.shrink_hint();
    }
    Ok(out)
}

/// Apply `f` to every socket and merge the resulting containers into one of the same
/// shape: concatenated for ordered shapes, unioned for sets and maps. For maps `f` sees
/// only the mapped value and the source key is dropped.
pub fn flat_map<C, D>(source: C, mut f: impl FnMut(C::Socket) -> D) -> D
where
    C: Rebind<D::Socket, To = D>,
    D: Socketed,
{
    let plan = flat_map_plan::<C, D::Socket>();
    trace(plan, source.size());

    if let Strategy::ShortCircuit = plan.strategy {
        return optional::flat_map(source, f);
    }

    let reserved = matches!(plan.strategy, Strategy::Reserved);
    let mut out = D::empty();
    for item in source.into_items() {
        let (_, socket) = C::split(item);
        let inner = f(socket);
        if reserved {
            out.reserve_hint(inner.size());
        }
        for x in inner.into_items() {
            out.put(x);
        }
    }
    if reserved {
        out.shrink_hint();
    }
    out
}

pub fn try_flat_map<C, D, E>(
    source: C,
    mut f: impl FnMut(C::Socket) -> Result<D, E>,
) -> Result<D, E>
where
    C: Rebind<D::Socket, To = D>,
    D: Socketed,
{
    let plan = flat_map_plan::<C, D::Socket>();
    trace(plan, source.size());

    if let Strategy::ShortCircuit = plan.strategy {
        return optional::try_flat_map(source, f);
    }

    let reserved = matches!(plan.strategy, Strategy::Reserved);
    let mut out = D::empty();
    for item in source.into_items() {
        let (_, socket) = C::split(item);
        let inner = f(socket)?;
        if reserved {
            out.reserve_hint(inner.size());
        }
        for x in inner.into_items() {
            out.put(x);
        }
    }
    if reserved {
        out.shrink_hint();
    }
    Ok(out)
}

fn retain_with<C: Container>(
    source: &mut C,
    strategy: Strategy,
    keep: impl FnMut(Ref<'_, C>) -> bool,
) {
    match strategy {
        Strategy::Compact => source.retain_compact(keep),
        Strategy::Erase => source.retain_erase(keep),
        _ => rebuild_retaining(source, keep),
    }
}

/// Keep the elements satisfying `keep`, in their original relative order. An empty
/// container comes back untouched and `keep` is never called.
pub fn filter<C: Container>(mut source: C, keep: impl FnMut(Ref<'_, C>) -> bool) -> C {
    let plan = filter_plan::<C>();
    let len = source.size();
    trace(plan, len);

    if len == 0 {
        return source;
    }
    retain_with(&mut source, plan.strategy, keep);
    source
}

/// Like [`filter`], stopping at the first error. Once `keep` fails it is not called again
/// and the partially filtered container is dropped.
pub fn try_filter<C, E>(
    mut source: C,
    mut keep: impl FnMut(Ref<'_, C>) -> Result<bool, E>,
) -> Result<C, E>
where
    C: Container,
{
    let plan = filter_plan::<C>();
    let len = source.size();
    trace(plan, len);

    if len == 0 {
        return Ok(source);
    }

    let mut failure = None;
    retain_with(&mut source, plan.strategy, |x| {
        if failure.is_some() {
            return true;
        }
        match keep(x) {
            Ok(kept) => kept,
            Err(e) => {
                failure = Some(e);
                true
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(source),
    }
}

pub fn for_each<C: Container>(source: &C, mut f: impl FnMut(Ref<'_, C>)) {
    trace(for_each_plan::<C>(), source.size());
    for x in source.iter() {
        f(x);
    }
}
