use std::collections::{
    binary_heap, btree_map, btree_set, hash_map, hash_set, linked_list, vec_deque, BTreeMap,
    BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque,
};
use std::hash::{BuildHasher, Hash};

use crate::capability::Surface;

/// The borrowed view of one item of `Self`, for a given borrow lifetime `'a`.
///
/// The defaulted `&'a Self` parameter gives every impl the implied bound `Self: 'a`, so
/// `for<'a> FnMut(Ref<'a, C>)` holds for containers of borrowed elements too.
pub trait ItemRef<'a, Bound = &'a Self> {
    type Ref;
    type Iter: Iterator<Item = Self::Ref>;
}

/// Shorthand for the borrowed view of an item of `C`.
pub type Ref<'a, C> = <C as ItemRef<'a>>::Ref;

/// A container-like type: something with borrowed and owned iteration, a size query,
/// and a construction pattern (start empty, insert one item at a time).
///
/// `SURFACE` lists the structural facts the type exposes. The optional hooks
/// (`reserve_hint`, `shrink_hint`, `retain_erase`, `retain_compact`) default to no-ops or
/// to rebuilding, so the surface only ever changes which strategy is picked, never the
/// result.
///
/// # Implementing this trait
///
/// ```rust
/// use socketed::{Classify, Container, ItemRef, Shape, Surface};
///
/// #[derive(Debug, PartialEq)]
/// struct Stack<T>(Vec<T>);
///
/// impl<'a, T> ItemRef<'a> for Stack<T> {
///     type Ref = &'a T;
///     type Iter = std::iter::Rev<std::slice::Iter<'a, T>>;
/// }
///
/// impl<T> Container for Stack<T> {
///     type Item = T;
///     type IntoIter = std::iter::Rev<std::vec::IntoIter<T>>;
///
///     const SURFACE: Surface = Surface {
///         from_values: true,
///         ..Surface::MINIMAL
///     };
///
///     fn empty() -> Self {
///         Stack(Vec::new())
///     }
///     fn put(&mut self, item: T) {
///         self.0.insert(0, item)
///     }
///     fn size(&self) -> usize {
///         self.0.len()
///     }
///     fn iter(&self) -> std::iter::Rev<std::slice::Iter<'_, T>> {
///         self.0.iter().rev()
///     }
///     fn into_items(self) -> Self::IntoIter {
///         self.0.into_iter().rev()
///     }
///     fn borrow_item(item: &T) -> &T {
///         item
///     }
/// }
///
/// assert_eq!(Stack::<u8>::SHAPE, Shape::Generic);
///
/// // borrowed elements are fine
/// let owner = String::from("a b");
/// let words = Stack(owner.split(' ').collect::<Vec<&str>>());
/// let kept = socketed::engine::filter(words, |w: &&str| *w == "a");
/// assert_eq!(kept, Stack(vec!["a"]));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a container",
    label = "no iteration, size query or construction pattern",
    note = "implement `socketed::Container` to describe the structural surface of `{Self}`"
)]
pub trait Container: Sized + for<'a> ItemRef<'a> {
    /// what owned iteration yields
    type Item;
    type IntoIter: Iterator<Item = Self::Item>;

    const SURFACE: Surface;

    fn empty() -> Self;

    /// The construction pattern: insert one item, appending, deduplicating or replacing
    /// according to the container's own semantics.
    fn put(&mut self, item: Self::Item);

    fn size(&self) -> usize;

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter;

    fn into_items(self) -> Self::IntoIter;

    fn borrow_item(item: &Self::Item) -> Ref<'_, Self>;

    /// Capacity hint, only called when the surface reports `reserve`.
    fn reserve_hint(&mut self, _additional: usize) {}

    /// Only called when the surface reports `shrink`.
    fn shrink_hint(&mut self) {}

    /// Remove, in place, every item failing `keep`.
    fn retain_erase(&mut self, keep: impl FnMut(Ref<'_, Self>) -> bool) {
        rebuild_retaining(self, keep)
    }

    /// Compact the survivors of `keep` to the front in one pass, then truncate.
    fn retain_compact(&mut self, keep: impl FnMut(Ref<'_, Self>) -> bool) {
        rebuild_retaining(self, keep)
    }
}

/// Splits an item into the part a transformation sees (the socket) and the rest, which is
/// carried through unchanged: `()` for single-socketed containers, the key for maps.
pub trait Socketed: Container {
    type Socket;
    type Rest;

    fn split(item: Self::Item) -> (Self::Rest, Self::Socket);
}

/// The same container shape, holding `B` in its socket.
///
/// Provides the ability to rebuild some container `Self`, which is `Shape<Socket>`, as
/// `To`, which is `Shape<B>`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be rebuilt to hold `{B}`",
    label = "no construction pattern accepts `{B}`",
    note = "ordered sets and maps need `Ord`, hashed ones `Hash + Eq`, on the new element or key"
)]
pub trait Rebind<B>: Socketed {
    type To: Socketed<Socket = B>;

    fn join(rest: Self::Rest, socket: B) -> <Self::To as Container>::Item;
}

pub(crate) fn rebuild_retaining<C: Container>(
    container: &mut C,
    mut keep: impl FnMut(Ref<'_, C>) -> bool,
) {
    let source = std::mem::replace(container, C::empty());
    for item in source.into_items() {
        if keep(C::borrow_item(&item)) {
            container.put(item);
        }
    }
}

impl<'a, T> ItemRef<'a> for Vec<T> {
    type Ref = &'a T;
    type Iter = std::slice::Iter<'a, T>;
}

impl<T> Container for Vec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    const SURFACE: Surface = Surface {
        from_values: true,
        push_back: true,
        assign_in_place: true,
        reserve: true,
        shrink: true,
        erase: true,
        remove_if: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        Vec::new()
    }

    fn put(&mut self, item: T) {
        self.push(item)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        self.as_slice().iter()
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }

    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional)
    }

    fn shrink_hint(&mut self) {
        self.shrink_to_fit()
    }

    fn retain_compact(&mut self, mut keep: impl FnMut(Ref<'_, Self>) -> bool) {
        self.retain(|x| keep(x))
    }
}

impl<T> Socketed for Vec<T> {
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A, B> Rebind<B> for Vec<A> {
    type To = Vec<B>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}

impl<'a, T> ItemRef<'a> for VecDeque<T> {
    type Ref = &'a T;
    type Iter = vec_deque::Iter<'a, T>;
}

impl<T> Container for VecDeque<T> {
    type Item = T;
    type IntoIter = vec_deque::IntoIter<T>;

    const SURFACE: Surface = Surface {
        from_values: true,
        push_back: true,
        assign_in_place: true,
        reserve: true,
        shrink: true,
        erase: true,
        remove_if: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        VecDeque::new()
    }

    fn put(&mut self, item: T) {
        self.push_back(item)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        VecDeque::iter(self)
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }

    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional)
    }

    fn shrink_hint(&mut self) {
        self.shrink_to_fit()
    }

    fn retain_compact(&mut self, mut keep: impl FnMut(Ref<'_, Self>) -> bool) {
        self.retain(|x| keep(x))
    }
}

impl<T> Socketed for VecDeque<T> {
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A, B> Rebind<B> for VecDeque<A> {
    type To = VecDeque<B>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}

impl<'a, T> ItemRef<'a> for LinkedList<T> {
    type Ref = &'a T;
    type Iter = linked_list::Iter<'a, T>;
}

// appends and assigns through `iter_mut`, but has no stable in-place removal
impl<T> Container for LinkedList<T> {
    type Item = T;
    type IntoIter = linked_list::IntoIter<T>;

    const SURFACE: Surface = Surface {
        from_values: true,
        push_back: true,
        assign_in_place: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        LinkedList::new()
    }

    fn put(&mut self, item: T) {
        self.push_back(item)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        LinkedList::iter(self)
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }
}

impl<T> Socketed for LinkedList<T> {
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A, B> Rebind<B> for LinkedList<A> {
    type To = LinkedList<B>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}

impl<'a, T> ItemRef<'a> for BinaryHeap<T> {
    type Ref = &'a T;
    type Iter = binary_heap::Iter<'a, T>;
}

// heap order, not insertion order: neither set-like nor vector-like
impl<T: Ord> Container for BinaryHeap<T> {
    type Item = T;
    type IntoIter = binary_heap::IntoIter<T>;

    const SURFACE: Surface = Surface {
        from_values: true,
        reserve: true,
        shrink: true,
        erase: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        BinaryHeap::new()
    }

    fn put(&mut self, item: T) {
        self.push(item)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        BinaryHeap::iter(self)
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }

    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional)
    }

    fn shrink_hint(&mut self) {
        self.shrink_to_fit()
    }

    fn retain_erase(&mut self, mut keep: impl FnMut(Ref<'_, Self>) -> bool) {
        self.retain(|x| keep(x))
    }
}

impl<T: Ord> Socketed for BinaryHeap<T> {
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A: Ord, B: Ord> Rebind<B> for BinaryHeap<A> {
    type To = BinaryHeap<B>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}

impl<'a, T> ItemRef<'a> for BTreeSet<T> {
    type Ref = &'a T;
    type Iter = btree_set::Iter<'a, T>;
}

impl<T: Ord> Container for BTreeSet<T> {
    type Item = T;
    type IntoIter = btree_set::IntoIter<T>;

    const SURFACE: Surface = Surface {
        from_values: true,
        unique_insert: true,
        erase: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        BTreeSet::new()
    }

    // an equal element already present wins
    fn put(&mut self, item: T) {
        self.insert(item);
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        BTreeSet::iter(self)
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }

    fn retain_erase(&mut self, mut keep: impl FnMut(Ref<'_, Self>) -> bool) {
        self.retain(|x| keep(x))
    }
}

impl<T: Ord> Socketed for BTreeSet<T> {
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A: Ord, B: Ord> Rebind<B> for BTreeSet<A> {
    type To = BTreeSet<B>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}

impl<'a, T, S> ItemRef<'a> for HashSet<T, S> {
    type Ref = &'a T;
    type Iter = hash_set::Iter<'a, T>;
}

impl<T, S> Container for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    const SURFACE: Surface = Surface {
        from_values: true,
        unique_insert: true,
        reserve: true,
        shrink: true,
        erase: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        HashSet::default()
    }

    fn put(&mut self, item: T) {
        self.insert(item);
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        HashSet::iter(self)
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }

    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional)
    }

    fn shrink_hint(&mut self) {
        self.shrink_to_fit()
    }

    fn retain_erase(&mut self, mut keep: impl FnMut(Ref<'_, Self>) -> bool) {
        self.retain(|x| keep(x))
    }
}

impl<T, S> Socketed for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A, B, S> Rebind<B> for HashSet<A, S>
where
    A: Eq + Hash,
    B: Eq + Hash,
    S: BuildHasher + Default,
{
    type To = HashSet<B, S>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}

impl<'a, K, V> ItemRef<'a> for BTreeMap<K, V> {
    type Ref = (&'a K, &'a V);
    type Iter = btree_map::Iter<'a, K, V>;
}

impl<K: Ord, V> Container for BTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = btree_map::IntoIter<K, V>;

    // a pair is also a value: both construction patterns type-check
    const SURFACE: Surface = Surface {
        from_pairs: true,
        from_values: true,
        unique_insert: true,
        erase: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        BTreeMap::new()
    }

    // the first entry for a key wins, like a node insert
    fn put(&mut self, (key, value): (K, V)) {
        self.entry(key).or_insert(value);
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        BTreeMap::iter(self)
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &(K, V)) -> (&K, &V) {
        (&item.0, &item.1)
    }

    fn retain_erase(&mut self, mut keep: impl FnMut(Ref<'_, Self>) -> bool) {
        self.retain(|k, v| keep((k, &*v)))
    }
}

impl<K: Ord, V> Socketed for BTreeMap<K, V> {
    type Socket = V;
    type Rest = K;

    fn split((key, value): (K, V)) -> (K, V) {
        (key, value)
    }
}

impl<K: Ord, A, B> Rebind<B> for BTreeMap<K, A> {
    type To = BTreeMap<K, B>;

    fn join(key: K, socket: B) -> (K, B) {
        (key, socket)
    }
}

impl<'a, K, V, S> ItemRef<'a> for HashMap<K, V, S> {
    type Ref = (&'a K, &'a V);
    type Iter = hash_map::Iter<'a, K, V>;
}

impl<K, V, S> Container for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    type Item = (K, V);
    type IntoIter = hash_map::IntoIter<K, V>;

    const SURFACE: Surface = Surface {
        from_pairs: true,
        from_values: true,
        unique_insert: true,
        reserve: true,
        shrink: true,
        erase: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        HashMap::default()
    }

    fn put(&mut self, (key, value): (K, V)) {
        self.entry(key).or_insert(value);
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        HashMap::iter(self)
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &(K, V)) -> (&K, &V) {
        (&item.0, &item.1)
    }

    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional)
    }

    fn shrink_hint(&mut self) {
        self.shrink_to_fit()
    }

    fn retain_erase(&mut self, mut keep: impl FnMut(Ref<'_, Self>) -> bool) {
        self.retain(|k, v| keep((k, &*v)))
    }
}

impl<K, V, S> Socketed for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    type Socket = V;
    type Rest = K;

    fn split((key, value): (K, V)) -> (K, V) {
        (key, value)
    }
}

impl<K, A, B, S> Rebind<B> for HashMap<K, A, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    type To = HashMap<K, B, S>;

    fn join(key: K, socket: B) -> (K, B) {
        (key, socket)
    }
}

impl<'a, T> ItemRef<'a> for Option<T> {
    type Ref = &'a T;
    type Iter = std::option::Iter<'a, T>;
}

impl<T> Container for Option<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    const SURFACE: Surface = Surface {
        at_most_one: true,
        erase: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        None
    }

    // capacity is one: a second item replaces the first
    fn put(&mut self, item: T) {
        *self = Some(item);
    }

    fn size(&self) -> usize {
        usize::from(self.is_some())
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        Option::iter(self)
    }

    fn into_items(self) -> Self::IntoIter {
        self.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }

    fn retain_erase(&mut self, mut keep: impl FnMut(Ref<'_, Self>) -> bool) {
        if self.as_ref().is_some_and(|x| !keep(x)) {
            *self = None;
        }
    }
}

impl<T> Socketed for Option<T> {
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A, B> Rebind<B> for Option<A> {
    type To = Option<B>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}
