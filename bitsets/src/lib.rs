pub mod bit;
pub use bit::{BitSet, BitSetPair, Word};

pub mod vec;
pub use vec::{ImmutableBitSet, MutableBitSet, UnsafeBitSet};

pub mod codec;
pub use codec::DecodeError;

#[cfg(feature = "serde")]
mod serde;
