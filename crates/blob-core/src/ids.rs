//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `AgentId` and `ObjectId` are arena
//! indices: the inner integer is the position of the entity in its store's
//! parallel arrays, so `id.index()` is always a valid `Vec` index for an id
//! handed out by that store.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in `AgentStore`.  Never reused: agents are flagged
    /// dead, not removed.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a static world object ("thing") in `ObjectStore`.
    pub struct ObjectId(u32);
}

typed_id! {
    /// Identifier of one interaction instance.
    ///
    /// Drawn from a world-wide counter, so a release scheduled for an old
    /// interaction can never match a lock taken by a newer one.
    pub struct InteractionId(u64);
}
