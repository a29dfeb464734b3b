//! Combinator values and the pipeline syntax.
//!
//! A combinator is built once from a function and then applied to any number of
//! containers. Applying it directly and piping a container into it are the same call:
//!
//! ```rust
//! use socketed::{map, Combinator, Pipe};
//!
//! let parse = |s: String| s.parse::<i32>().unwrap_or_default();
//!
//! let piped = Some("42".to_string()).pipe(map(parse));
//! let direct = map(parse).apply(Some("42".to_string()));
//! assert_eq!(piped, Some(42));
//! assert_eq!(piped, direct);
//! ```
//!
//! Owned containers are consumed and their elements moved through the function. A
//! borrowed container is left untouched and each element is cloned exactly once:
//!
//! ```rust
//! use socketed::{map, Pipe};
//!
//! let words = vec!["a".to_string(), "bb".to_string()];
//! let lens = (&words).pipe(map(|s: String| s.len()));
//! assert_eq!(lens, vec![1, 2]);
//! assert_eq!(words.len(), 2);
//! ```
//!
//! Applying a combinator to something that lacks the needed capability does not compile:
//!
//! ```compile_fail
//! use socketed::{map, Pipe};
//!
//! // no ordering on f64, so no ordered set can hold the results
//! let set: std::collections::BTreeSet<u8> = [1, 2].into();
//! let _ = set.pipe(map(|x: u8| f64::from(x)));
//! ```
use crate::container::{Container, Rebind, Ref, Socketed};
use crate::engine::{self, Plan};

/// Marks application to an owned container.
#[derive(Debug)]
pub enum Owned {}

/// Marks application to a borrowed container.
#[derive(Debug)]
pub enum Borrowed {}

/// Something that can be applied to a container `C`. `M` is [`Owned`] or [`Borrowed`]
/// (or a tuple of them for composed combinators) and is always inferred.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be applied to `{C}`",
    label = "missing capability for this combinator",
    note = "the operand must be a `socketed::Container` whose socket the function accepts"
)]
pub trait Combinator<C, M> {
    type Output;

    fn apply(&mut self, container: C) -> Self::Output;
}

impl<C, M, K> Combinator<C, M> for &mut K
where
    K: Combinator<C, M> + ?Sized,
{
    type Output = K::Output;

    fn apply(&mut self, container: C) -> Self::Output {
        (**self).apply(container)
    }
}

/// A single-stage combinator whose dispatch is fixed by the operand type alone.
pub trait Planned<C, M>: Combinator<C, M> {
    const PLAN: Plan;
}

/// `container.pipe(combinator)`, equivalent to `combinator.apply(container)`.
/// Chains left to right.
pub trait Pipe: Sized {
    fn pipe<K, M>(self, mut combinator: K) -> K::Output
    where
        K: Combinator<Self, M>,
    {
        combinator.apply(self)
    }
}

impl<T> Pipe for T {}

/// Left-to-right composition: `a.then(b)` applies `a`, then `b` to its output.
pub trait Compose: Sized {
    fn then<K>(self, next: K) -> Then<Self, K> {
        Then(self, next)
    }
}

#[derive(Clone, Debug)]
pub struct Then<A, B>(A, B);

impl<A, B> Compose for Then<A, B> {}

impl<C, M1, M2, A, B> Combinator<C, (M1, M2)> for Then<A, B>
where
    A: Combinator<C, M1>,
    B: Combinator<A::Output, M2>,
{
    type Output = <B as Combinator<A::Output, M2>>::Output;

    fn apply(&mut self, container: C) -> Self::Output {
        let mid = self.0.apply(container);
        self.1.apply(mid)
    }
}

#[derive(Clone, Debug)]
pub struct Map<F>(F);

/// Transform every socket. See [`engine::map`].
pub fn map<F>(f: F) -> Map<F> {
    Map(f)
}

impl<F> Compose for Map<F> {}

impl<C, F, B> Combinator<C, Owned> for Map<F>
where
    C: Rebind<B>,
    F: FnMut(C::Socket) -> B,
{
    type Output = C::To;

    fn apply(&mut self, container: C) -> C::To {
        engine::map(container, &mut self.0)
    }
}

impl<'c, C, F, B> Combinator<&'c C, Borrowed> for Map<F>
where
    C: Rebind<B> + Clone,
    F: FnMut(C::Socket) -> B,
{
    type Output = C::To;

    fn apply(&mut self, container: &'c C) -> C::To {
        engine::map(container.clone(), &mut self.0)
    }
}

impl<C, F, B> Planned<C, Owned> for Map<F>
where
    C: Rebind<B>,
    F: FnMut(C::Socket) -> B,
{
    const PLAN: Plan = engine::map_plan::<C, B>();
}

#[derive(Clone, Debug)]
pub struct TryMap<F>(F);

/// Fallible [`map`]: the first error is returned unchanged.
pub fn try_map<F>(f: F) -> TryMap<F> {
    TryMap(f)
}

impl<F> Compose for TryMap<F> {}

impl<C, F, B, E> Combinator<C, Owned> for TryMap<F>
where
    C: Rebind<B>,
    F: FnMut(C::Socket) -> Result<B, E>,
{
    type Output = Result<C::To, E>;

    fn apply(&mut self, container: C) -> Self::Output {
        engine::try_map(container, &mut self.0)
    }
}

impl<'c, C, F, B, E> Combinator<&'c C, Borrowed> for TryMap<F>
where
    C: Rebind<B> + Clone,
    F: FnMut(C::Socket) -> Result<B, E>,
{
    type Output = Result<C::To, E>;

    fn apply(&mut self, container: &'c C) -> Self::Output {
        engine::try_map(container.clone(), &mut self.0)
    }
}

impl<C, F, B, E> Planned<C, Owned> for TryMap<F>
where
    C: Rebind<B>,
    F: FnMut(C::Socket) -> Result<B, E>,
{
    const PLAN: Plan = engine::map_plan::<C, B>();
}

#[derive(Clone, Debug)]
pub struct FlatMap<F>(F);

/// Transform every socket into a container of the same shape and merge the results.
/// See [`engine::flat_map`].
pub fn flat_map<F>(f: F) -> FlatMap<F> {
    FlatMap(f)
}

impl<F> Compose for FlatMap<F> {}

impl<C, F, D> Combinator<C, Owned> for FlatMap<F>
where
    C: Rebind<D::Socket, To = D>,
    D: Socketed,
    F: FnMut(C::Socket) -> D,
{
    type Output = D;

    fn apply(&mut self, container: C) -> D {
        engine::flat_map(container, &mut self.0)
    }
}

impl<'c, C, F, D> Combinator<&'c C, Borrowed> for FlatMap<F>
where
    C: Rebind<D::Socket, To = D> + Clone,
    D: Socketed,
    F: FnMut(C::Socket) -> D,
{
    type Output = D;

    fn apply(&mut self, container: &'c C) -> D {
        engine::flat_map(container.clone(), &mut self.0)
    }
}

impl<C, F, D> Planned<C, Owned> for FlatMap<F>
where
    C: Rebind<D::Socket, To = D>,
    D: Socketed,
    F: FnMut(C::Socket) -> D,
{
    const PLAN: Plan = engine::flat_map_plan::<C, D::Socket>();
}

#[derive(Clone, Debug)]
pub struct TryFlatMap<F>(F);

pub fn try_flat_map<F>(f: F) -> TryFlatMap<F> {
    TryFlatMap(f)
}

impl<F> Compose for TryFlatMap<F> {}

impl<C, F, D, E> Combinator<C, Owned> for TryFlatMap<F>
where
    C: Rebind<D::Socket, To = D>,
    D: Socketed,
    F: FnMut(C::Socket) -> Result<D, E>,
{
    type Output = Result<D, E>;

    fn apply(&mut self, container: C) -> Self::Output {
        engine::try_flat_map(container, &mut self.0)
    }
}

impl<'c, C, F, D, E> Combinator<&'c C, Borrowed> for TryFlatMap<F>
where
    C: Rebind<D::Socket, To = D> + Clone,
    D: Socketed,
    F: FnMut(C::Socket) -> Result<D, E>,
{
    type Output = Result<D, E>;

    fn apply(&mut self, container: &'c C) -> Self::Output {
        engine::try_flat_map(container.clone(), &mut self.0)
    }
}

impl<C, F, D, E> Planned<C, Owned> for TryFlatMap<F>
where
    C: Rebind<D::Socket, To = D>,
    D: Socketed,
    F: FnMut(C::Socket) -> Result<D, E>,
{
    const PLAN: Plan = engine::flat_map_plan::<C, D::Socket>();
}

#[derive(Clone, Debug)]
pub struct Filter<P>(P);

/// Keep the elements satisfying a predicate over their borrowed view. See
/// [`engine::filter`].
pub fn filter<P>(keep: P) -> Filter<P> {
    Filter(keep)
}

impl<P> Compose for Filter<P> {}

impl<C, P> Combinator<C, Owned> for Filter<P>
where
    C: Container,
    P: FnMut(Ref<'_, C>) -> bool,
{
    type Output = C;

    fn apply(&mut self, container: C) -> C {
        engine::filter(container, &mut self.0)
    }
}

impl<'c, C, P> Combinator<&'c C, Borrowed> for Filter<P>
where
    C: Container + Clone,
    P: FnMut(Ref<'_, C>) -> bool,
{
    type Output = C;

    fn apply(&mut self, container: &'c C) -> C {
        engine::filter(container.clone(), &mut self.0)
    }
}

impl<C, P> Planned<C, Owned> for Filter<P>
where
    C: Container,
    P: FnMut(Ref<'_, C>) -> bool,
{
    const PLAN: Plan = engine::filter_plan::<C>();
}

#[derive(Clone, Debug)]
pub struct TryFilter<P>(P);

pub fn try_filter<P>(keep: P) -> TryFilter<P> {
    TryFilter(keep)
}

impl<P> Compose for TryFilter<P> {}

impl<C, P, E> Combinator<C, Owned> for TryFilter<P>
where
    C: Container,
    P: FnMut(Ref<'_, C>) -> Result<bool, E>,
{
    type Output = Result<C, E>;

    fn apply(&mut self, container: C) -> Self::Output {
        engine::try_filter(container, &mut self.0)
    }
}

impl<'c, C, P, E> Combinator<&'c C, Borrowed> for TryFilter<P>
where
    C: Container + Clone,
    P: FnMut(Ref<'_, C>) -> Result<bool, E>,
{
    type Output = Result<C, E>;

    fn apply(&mut self, container: &'c C) -> Self::Output {
        engine::try_filter(container.clone(), &mut self.0)
    }
}

impl<C, P, E> Planned<C, Owned> for TryFilter<P>
where
    C: Container,
    P: FnMut(Ref<'_, C>) -> Result<bool, E>,
{
    const PLAN: Plan = engine::filter_plan::<C>();
}

#[derive(Clone, Debug)]
pub struct ForEach<F>(F);

/// Call `f` on every element's borrowed view, for side effects only.
pub fn for_each<F>(f: F) -> ForEach<F> {
    ForEach(f)
}

impl<F> Compose for ForEach<F> {}

impl<C, F> Combinator<C, Owned> for ForEach<F>
where
    C: Container,
    F: FnMut(Ref<'_, C>),
{
    type Output = ();

    fn apply(&mut self, container: C) {
        engine::for_each(&container, &mut self.0)
    }
}

impl<'c, C, F> Combinator<&'c C, Borrowed> for ForEach<F>
where
    C: Container,
    F: FnMut(Ref<'_, C>),
{
    type Output = ();

    fn apply(&mut self, container: &'c C) {
        engine::for_each(container, &mut self.0)
    }
}

impl<C, F> Planned<C, Owned> for ForEach<F>
where
    C: Container,
    F: FnMut(Ref<'_, C>),
{
    const PLAN: Plan = engine::for_each_plan::<C>();
}
