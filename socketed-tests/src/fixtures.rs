//! Custom containers and element types shared by the law and scenario tests.
use std::cell::Cell;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use proptest::prelude::*;
use socketed::{Container, ItemRef, Rebind, Socketed, Surface};

/// A container with nothing but a value construction pattern. Resolves to the generic
/// shape, so every operation falls back to append and rebuild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bag<T>(Vec<T>);

impl<T> Bag<T> {
    pub fn new(items: Vec<T>) -> Self {
        Bag(items)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<'a, T> ItemRef<'a> for Bag<T> {
    type Ref = &'a T;
    type Iter = std::slice::Iter<'a, T>;
}

impl<T> Container for Bag<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    const SURFACE: Surface = Surface {
        from_values: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        Bag(Vec::new())
    }

    fn put(&mut self, item: T) {
        self.0.push(item)
    }

    fn size(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        self.0.iter()
    }

    fn into_items(self) -> Self::IntoIter {
        self.0.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }
}

impl<T> Socketed for Bag<T> {
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A, B> Rebind<B> for Bag<A> {
    type To = Bag<B>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}

/// Zero or one element, with no in-place removal: optional-shaped, but filtered by
/// rebuilding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Maybe<T>(Option<T>);

impl<T> Maybe<T> {
    pub fn just(value: T) -> Self {
        Maybe(Some(value))
    }

    pub fn nothing() -> Self {
        Maybe(None)
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Maybe(value)
    }
}

impl<'a, T> ItemRef<'a> for Maybe<T> {
    type Ref = &'a T;
    type Iter = std::option::Iter<'a, T>;
}

impl<T> Container for Maybe<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    const SURFACE: Surface = Surface {
        at_most_one: true,
        ..Surface::MINIMAL
    };

    fn empty() -> Self {
        Maybe(None)
    }

    fn put(&mut self, item: T) {
        self.0 = Some(item);
    }

    fn size(&self) -> usize {
        usize::from(self.0.is_some())
    }

    fn iter(&self) -> <Self as ItemRef<'_>>::Iter {
        self.0.iter()
    }

    fn into_items(self) -> Self::IntoIter {
        self.0.into_iter()
    }

    fn borrow_item(item: &T) -> &T {
        item
    }
}

impl<T> Socketed for Maybe<T> {
    type Socket = T;
    type Rest = ();

    fn split(item: T) -> ((), T) {
        ((), item)
    }
}

impl<A, B> Rebind<B> for Maybe<A> {
    type To = Maybe<B>;

    fn join(_: (), socket: B) -> B {
        socket
    }
}

/// An element that counts how many times it, or any value cloned from the same source,
/// has been cloned. Moves are not counted.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    clones: Rc<Cell<usize>>,
}

impl Tracked {
    pub fn new(value: i32, clones: &Rc<Cell<usize>>) -> Self {
        Tracked {
            value,
            clones: Rc::clone(clones),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.clones.set(self.clones.get() + 1);
        Tracked {
            value: self.value,
            clones: Rc::clone(&self.clones),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Tracked {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

/// Tracked elements for `values`, sharing one clone counter.
pub fn tracked(values: &[i32]) -> (Vec<Tracked>, Rc<Cell<usize>>) {
    let clones = Rc::new(Cell::new(0));
    let items = values.iter().map(|v| Tracked::new(*v, &clones)).collect();
    (items, clones)
}

/// Counts calls to a wrapped function.
#[derive(Debug, Default)]
pub struct Calls(Cell<usize>);

impl Calls {
    pub fn hit(&self) {
        self.0.set(self.0.get() + 1)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

pub fn arb_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..64)
}

pub fn arb_pairs() -> impl Strategy<Value = Vec<(u8, i32)>> {
    prop::collection::vec((any::<u8>(), any::<i32>()), 0..64)
}

pub fn arb_option() -> impl Strategy<Value = Option<i32>> {
    prop::option::of(any::<i32>())
}
