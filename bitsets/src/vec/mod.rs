mod equality;
mod immutable;
mod mutable;
mod unsafe_bitset;

pub use immutable::ImmutableBitSet;
pub use mutable::MutableBitSet;
pub use unsafe_bitset::UnsafeBitSet;
