use std::fmt;

use crate::capability::{Capabilities, Socket};

/// The canonical classification tag that drives combinator dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Shape {
    Vector,
    Set,
    Map,
    Optional,
    /// fallback for containers offering only the minimal contract
    Generic,
}

impl Shape {
    /// Reduce a capability set to exactly one shape. Total: every classifiable type
    /// resolves, and the checks are ordered so no two shapes overlap.
    pub const fn resolve(caps: Capabilities) -> Shape {
        match caps.socket {
            Socket::Double if caps.unique => Shape::Map,
            Socket::Double => Shape::Generic,
            Socket::Single if caps.set_like => Shape::Set,
            Socket::Single if caps.vector_like => Shape::Vector,
            Socket::Single if caps.bounded => Shape::Optional,
            Socket::Single => Shape::Generic,
        }
    }

    /// Whether iteration order survives a transformation.
    pub const fn is_ordered(self) -> bool {
        matches!(self, Shape::Vector | Shape::Generic | Shape::Optional)
    }

    /// Whether inserting an element can collapse it into an existing one.
    pub const fn deduplicates(self) -> bool {
        matches!(self, Shape::Set | Shape::Map)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Vector => "vector",
            Shape::Set => "set",
            Shape::Map => "map",
            Shape::Optional => "optional",
            Shape::Generic => "generic",
        };
        f.write_str(name)
    }
}
