//! Generic functional combinators over anything container-shaped.
//!
//! Every container type declares its structural [`Surface`]. That surface is classified
//! into [`Capabilities`], resolved to a [`Shape`], and the shape plus capabilities pick a
//! [`Strategy`] for each operation. All of this happens in associated constants, so a
//! `map` over a `Vec` compiles to the reserve-and-push loop and a `map` over an `Option`
//! to a short-circuiting match, with no runtime dispatch.
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use socketed::{filter, map, Compose, Pipe};
//!
//! let pipeline = map(|x: i32| x.abs()).then(filter(|x: &i32| *x > 1));
//!
//! let set: BTreeSet<i32> = [-3, -1, 1, 2].into();
//! assert_eq!(set.pipe(pipeline), BTreeSet::from([2, 3]));
//! ```
mod capability;
pub mod combinator;
mod container;
pub mod engine;
mod optional;
mod shape;

pub use capability::{Capabilities, Classify, Socket, Surface};
pub use combinator::{
    filter, flat_map, for_each, map, try_filter, try_flat_map, try_map, Borrowed, Combinator,
    Compose, Owned, Pipe, Planned, Then,
};
pub use container::{Container, ItemRef, Rebind, Ref, Socketed};
pub use engine::{plan, unit, Op, Plan, Strategy};
pub use shape::Shape;
