pub mod bitset;

pub use bitset::{BitSet, BitSetPair};
pub use word::Word;

pub(crate) mod bitset_via_words;
pub(crate) mod word;
pub(crate) mod words;
