use crate::container::Container;
use crate::shape::Shape;

/// The raw structural facts a container-like type exposes.
///
/// A `Surface` says nothing about shapes or strategies; it only records which
/// construction patterns and mutation operations exist. [`Capabilities::classify`]
/// turns it into a capability set, and [`Shape::resolve`] reduces that to a shape.
///
/// Implementors usually spell out the facts they have and take the rest from
/// [`Surface::MINIMAL`]:
///
/// ```rust
/// use socketed::Surface;
///
/// const STACK: Surface = Surface {
///     from_values: true,
///     push_back: true,
///     ..Surface::MINIMAL
/// };
/// assert!(!STACK.reserve);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Surface {
    /// constructible from key/value pairs, `C { (k, v), (k, v), (k, v) }`
    pub from_pairs: bool,
    /// constructible from bare values, `C { v, v, v }`
    pub from_values: bool,
    /// insertion reports whether a new node was created, rejecting duplicates
    pub unique_insert: bool,
    /// unconditional append at the end
    pub push_back: bool,
    /// elements can be overwritten through iteration
    pub assign_in_place: bool,
    /// capacity reservation hint
    pub reserve: bool,
    /// capacity shrink
    pub shrink: bool,
    /// elements can be removed in place, one at a time
    pub erase: bool,
    /// single pass compaction followed by truncation
    pub remove_if: bool,
    /// capacity is 0 or 1 by construction
    pub at_most_one: bool,
}

impl Surface {
    /// No facts at all. Not classifiable on its own: some construction pattern must be added.
    pub const MINIMAL: Surface = Surface {
        from_pairs: false,
        from_values: false,
        unique_insert: false,
        push_back: false,
        assign_in_place: false,
        reserve: false,
        shrink: false,
        erase: false,
        remove_if: false,
        at_most_one: false,
    };
}

/// How many values occupy a single slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Socket {
    /// one value per slot
    Single,
    /// a key and a mapped value per slot
    Double,
}

/// The capability set of a container-like type.
///
/// Socket arity is a single [`Socket`] value, so single- and double-socketed are
/// mutually exclusive by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Capabilities {
    pub container: bool,
    pub socket: Socket,
    pub set_like: bool,
    pub vector_like: bool,
    pub reservable: bool,
    pub erasable: bool,
    pub remove_ifable: bool,
    /// insertion enforces uniqueness (of elements, or of keys when double-socketed)
    pub unique: bool,
    /// holds at most one element
    pub bounded: bool,
}

impl Capabilities {
    /// Classify a surface.
    ///
    /// Pair construction is tested before value construction: a type whose items are
    /// pairs can be built from three values as well as from three pairs, and in that case
    /// it is double-socketed.
    ///
    /// Panics (during constant evaluation, so at compile time when reached through
    /// [`Classify`]) if the surface has no construction pattern.
    pub const fn classify(surface: Surface) -> Capabilities {
        let socket = if surface.from_pairs {
            Socket::Double
        } else if surface.from_values || surface.at_most_one {
            Socket::Single
        } else {
            panic!("unclassifiable container: no construction pattern from values or key/value pairs")
        };
        let single = matches!(socket, Socket::Single);

        Capabilities {
            container: true,
            socket,
            set_like: single && surface.unique_insert,
            vector_like: single && surface.push_back && surface.assign_in_place,
            reservable: surface.reserve && surface.shrink,
            erasable: surface.erase,
            remove_ifable: single && surface.assign_in_place && surface.remove_if,
            unique: surface.unique_insert,
            bounded: surface.at_most_one,
        }
    }

    pub const fn is_single_socketed(&self) -> bool {
        matches!(self.socket, Socket::Single)
    }

    pub const fn is_double_socketed(&self) -> bool {
        matches!(self.socket, Socket::Double)
    }
}

/// Classification of a [`Container`], computed once per type as associated constants.
///
/// Blanket-implemented for every container, so the constants cannot drift from the
/// type's [`Surface`].
///
/// ```rust
/// use std::collections::BTreeMap;
/// use socketed::{Classify, Shape};
///
/// assert_eq!(<Vec<u8>>::SHAPE, Shape::Vector);
/// assert!(<BTreeMap<u8, u8>>::CAPABILITIES.is_double_socketed());
/// ```
///
/// A type that is not a container has no classification at all:
///
/// ```compile_fail
/// use socketed::Classify;
///
/// struct Opaque;
/// let _ = Opaque::SHAPE;
/// ```
pub trait Classify: Container {
    const CAPABILITIES: Capabilities;
    const SHAPE: Shape;
}

impl<C: Container> Classify for C {
    const CAPABILITIES: Capabilities = Capabilities::classify(C::SURFACE);
    const SHAPE: Shape = Shape::resolve(Self::CAPABILITIES);
}
