use std::io;
use std::ops::Range;

use tracing::trace;

use crate::bit::bitset::delegate_bit_set;
use crate::bit::word::{RangeMasks, WORD_BITS, Word, bit_mask, word_count, word_index};
use crate::bit::words::{AsWords, WordView};
use crate::codec::{self, DecodeError, DecodedBits};
use crate::{BitSet, ImmutableBitSet, MutableBitSet};

/// A fixed-capacity bit set with unchecked fast paths and a stable binary form.
///
/// Every word of the buffer is significant, so the serialized form is a plain
/// dump of the buffer. The bounds-checked mutators panic past
/// [`len`](BitSet::len); the `*_quick` accessors skip the check entirely and
/// are `unsafe` to call.
///
/// ```
/// use bitsets::{BitSet, UnsafeBitSet};
///
/// let mut bits = UnsafeBitSet::new(800);
/// bits.set_range(400..800);
/// // SAFETY: 10 and 799 are below the length of 800.
/// unsafe {
///     bits.set_quick(10);
///     assert!(bits.get_quick(799));
/// }
/// assert_eq!(bits.cardinality(), 401);
///
/// let restored = UnsafeBitSet::from_bytes(&bits.to_bytes()).unwrap();
/// assert_eq!(restored, bits);
/// ```
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct UnsafeBitSet {
    words: Vec<Word>,
    num_bits: usize,
}

impl AsWords for UnsafeBitSet {
    #[inline]
    fn word_view(&self) -> WordView<'_> {
        WordView::new(&self.words, self.words.len(), self.num_bits)
    }
}

delegate_bit_set!(UnsafeBitSet, crate::bit::bitset_via_words::BitSetViaWords);

impl UnsafeBitSet {
    /// Creates a bit set of length `num_bits` with every bit clear.
    pub fn new(num_bits: usize) -> UnsafeBitSet {
        UnsafeBitSet {
            words: vec![0; word_count(num_bits)],
            num_bits,
        }
    }

    /// Copies `words` into a new set whose length is the whole capacity.
    pub fn from_words(words: &[Word]) -> UnsafeBitSet {
        UnsafeBitSet {
            words: words.to_vec(),
            num_bits: words.len() * WORD_BITS,
        }
    }

    /// `words` may hold more than the significant words; only the part needed
    /// for `num_bits` is kept, the rest must be zero.
    pub(crate) fn from_parts(mut words: Vec<Word>, num_bits: usize) -> UnsafeBitSet {
        debug_assert!(words[word_count(num_bits).min(words.len())..].iter().all(|&word| word == 0));
        words.resize(word_count(num_bits), 0);
        UnsafeBitSet { words, num_bits }
    }

    pub(crate) fn from_decoded(decoded: DecodedBits) -> UnsafeBitSet {
        Self::from_parts(decoded.words, decoded.num_bits)
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(index < self.num_bits, "index {index} is not below length {}", self.num_bits);
    }

    #[inline]
    fn check_range(&self, range: &Range<usize>) {
        assert!(
            range.end <= self.num_bits,
            "range end {} is beyond length {}",
            range.end,
            self.num_bits
        );
    }

    /// # Panics
    ///
    /// Panics if `index` is not below the length.
    pub fn set(&mut self, index: usize) {
        self.check_index(index);
        self.words[word_index(index)] |= bit_mask(index);
    }

    /// # Panics
    ///
    /// Panics if `index` is not below the length.
    pub fn clear(&mut self, index: usize) {
        self.check_index(index);
        self.words[word_index(index)] &= !bit_mask(index);
    }

    /// # Panics
    ///
    /// Panics if `index` is not below the length.
    pub fn flip(&mut self, index: usize) {
        self.check_index(index);
        self.words[word_index(index)] ^= bit_mask(index);
    }

    /// Sets the bit and returns its previous value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the length.
    pub fn get_and_set(&mut self, index: usize) -> bool {
        self.check_index(index);
        let word = &mut self.words[word_index(index)];
        let was_set = *word & bit_mask(index) != 0;
        *word |= bit_mask(index);
        was_set
    }

    /// Sets a bit without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](BitSet::len). Only debug builds check this.
    #[inline]
    pub unsafe fn set_quick(&mut self, index: usize) {
        debug_assert!(index < self.num_bits, "index {index} is not below length {}", self.num_bits);
        unsafe { *self.words.get_unchecked_mut(word_index(index)) |= bit_mask(index) };
    }

    /// Clears a bit without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](BitSet::len). Only debug builds check this.
    #[inline]
    pub unsafe fn clear_quick(&mut self, index: usize) {
        debug_assert!(index < self.num_bits, "index {index} is not below length {}", self.num_bits);
        unsafe { *self.words.get_unchecked_mut(word_index(index)) &= !bit_mask(index) };
    }

    /// Flips a bit without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](BitSet::len). Only debug builds check this.
    #[inline]
    pub unsafe fn flip_quick(&mut self, index: usize) {
        debug_assert!(index < self.num_bits, "index {index} is not below length {}", self.num_bits);
        unsafe { *self.words.get_unchecked_mut(word_index(index)) ^= bit_mask(index) };
    }

    /// # Panics
    ///
    /// Panics if `range` ends beyond the length.
    pub fn set_range(&mut self, range: Range<usize>) {
        self.check_range(&range);
        if !range.is_empty() {
            RangeMasks::new(range.start, range.end).apply(&mut self.words, |word, mask| *word |= mask);
        }
    }

    /// # Panics
    ///
    /// Panics if `range` ends beyond the length.
    pub fn clear_range(&mut self, range: Range<usize>) {
        self.check_range(&range);
        if !range.is_empty() {
            RangeMasks::new(range.start, range.end).apply(&mut self.words, |word, mask| *word &= !mask);
        }
    }

    /// # Panics
    ///
    /// Panics if `range` ends beyond the length.
    pub fn flip_range(&mut self, range: Range<usize>) {
        self.check_range(&range);
        if !range.is_empty() {
            RangeMasks::new(range.start, range.end).apply(&mut self.words, |word, mask| *word ^= mask);
        }
    }

    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    fn grow_to(&mut self, num_bits: usize) {
        if num_bits > self.num_bits {
            trace!(from = self.num_bits, to = num_bits, "growing fixed bit set for combinator");
            self.words.resize(word_count(num_bits), 0);
            self.num_bits = num_bits;
        }
    }

    /// Keeps only the bits also set in `other`; words beyond `other`'s
    /// significant words are zeroed.
    pub fn and<Other>(&mut self, other: &Other) -> &mut Self
    where
        Other: ?Sized + BitSet,
    {
        let other = other.word_view().significant();
        let overlap = self.words.len().min(other.len());
        for (word, &other_word) in std::iter::zip(&mut self.words, other) {
            *word &= other_word;
        }
        self.words[overlap..].fill(0);
        self
    }

    /// Adds the bits set in `other`. This is the one operation, with
    /// [`xor`](UnsafeBitSet::xor), that grows a fixed set: to `other`'s length.
    pub fn or<Other>(&mut self, other: &Other) -> &mut Self
    where
        Other: ?Sized + BitSet,
    {
        let other = other.word_view();
        self.grow_to(other.num_bits);
        for (word, &other_word) in std::iter::zip(&mut self.words, other.significant()) {
            *word |= other_word;
        }
        self
    }

    pub fn xor<Other>(&mut self, other: &Other) -> &mut Self
    where
        Other: ?Sized + BitSet,
    {
        let other = other.word_view();
        self.grow_to(other.num_bits);
        for (word, &other_word) in std::iter::zip(&mut self.words, other.significant()) {
            *word ^= other_word;
        }
        self
    }

    pub fn and_not<Other>(&mut self, other: &Other) -> &mut Self
    where
        Other: ?Sized + BitSet,
    {
        for (word, &other_word) in std::iter::zip(&mut self.words, other.word_view().significant()) {
            *word &= !other_word;
        }
        self
    }

    pub fn to_mutable(&self) -> MutableBitSet {
        MutableBitSet::from_parts(self.words.clone(), self.words.len(), self.num_bits)
    }

    pub fn to_immutable(&self) -> ImmutableBitSet {
        ImmutableBitSet::from_parts(self.words.clone(), self.words.len(), self.num_bits)
    }

    /// Writes the versioned binary form described in [`codec`](crate::codec).
    pub fn write_to(&self, writer: impl io::Write) -> io::Result<()> {
        codec::encode(self.word_view(), writer)
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode_to_vec(self.word_view())
    }

    /// Reads a set written by any variant's `write_to` or `to_bytes`.
    pub fn read_from(reader: impl io::Read) -> Result<UnsafeBitSet, DecodeError> {
        codec::decode(reader).map(Self::from_decoded)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<UnsafeBitSet, DecodeError> {
        codec::decode_slice(bytes).map(Self::from_decoded)
    }
}

impl From<&MutableBitSet> for UnsafeBitSet {
    fn from(bits: &MutableBitSet) -> Self {
        let view = bits.word_view();
        Self::from_parts(view.words.to_vec(), view.num_bits)
    }
}

impl From<&ImmutableBitSet> for UnsafeBitSet {
    fn from(bits: &ImmutableBitSet) -> Self {
        let view = bits.word_view();
        Self::from_parts(view.words.to_vec(), view.num_bits)
    }
}
