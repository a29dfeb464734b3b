//! Monadic adapter for zero-or-one element containers.
//!
//! Selected by the engine as [`Strategy::ShortCircuit`](crate::Strategy::ShortCircuit)
//! for every `Optional`-shaped container, not just `Option`. Absence short-circuits: the
//! caller's function is never invoked on an empty operand.
use crate::capability::Classify;
use crate::container::{Container, Rebind, Socketed};

fn take_one<C: Container>(source: C) -> Option<C::Item> {
    debug_assert!(C::CAPABILITIES.bounded);
    source.into_items().next()
}

fn present<C: Container>(item: C::Item) -> C {
    let mut out = C::empty();
    out.put(item);
    out
}

pub(crate) fn map<C, B>(source: C, mut f: impl FnMut(C::Socket) -> B) -> C::To
where
    C: Rebind<B>,
{
    match take_one(source) {
        None => C::To::empty(),
        Some(item) => {
            let (rest, socket) = C::split(item);
            present(C::join(rest, f(socket)))
        }
    }
}

pub(crate) fn try_map<C, B, E>(
    source: C,
    mut f: impl FnMut(C::Socket) -> Result<B, E>,
) -> Result<C::To, E>
where
    C: Rebind<B>,
{
    match take_one(source) {
        None => Ok(C::To::empty()),
        Some(item) => {
            let (rest, socket) = C::split(item);
            Ok(present(C::join(rest, f(socket)?)))
        }
    }
}

// f's result is returned as is, never wrapped a second time
pub(crate) fn flat_map<C, D>(source: C, mut f: impl FnMut(C::Socket) -> D) -> D
where
    C: Rebind<D::Socket, To = D>,
    D: Socketed,
{
    match take_one(source) {
        None => D::empty(),
        Some(item) => f(C::split(item).1),
    }
}

pub(crate) fn try_flat_map<C, D, E>(
    source: C,
    mut f: impl FnMut(C::Socket) -> Result<D, E>,
) -> Result<D, E>
where
    C: Rebind<D::Socket, To = D>,
    D: Socketed,
{
    match take_one(source) {
        None => Ok(D::empty()),
        Some(item) => f(C::split(item).1),
    }
}
