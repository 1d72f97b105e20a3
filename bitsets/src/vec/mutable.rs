use std::io;
use std::ops::{BitAndAssign, BitOrAssign, BitXorAssign, Range, SubAssign};

use tracing::trace;

use crate::bit::bitset::delegate_bit_set;
use crate::bit::word::{RangeMasks, WORD_BITS, Word, bit_mask, bit_offset, word_count, word_index};
use crate::bit::words::{AsWords, WordView};
use crate::codec::{self, DecodeError, DecodedBits};
use crate::{BitSet, ImmutableBitSet, UnsafeBitSet};

/// A growable bit set that owns its word buffer.
///
/// `MutableBitSet` is where bit sets are usually built: it grows on demand when
/// bits are set past its capacity, combines in place with any other variant,
/// and can then be frozen into an [`ImmutableBitSet`] for sharing or turned
/// into an [`UnsafeBitSet`] for hot loops.
///
/// # Construction
///
/// ```
/// use bitsets::{BitSet, MutableBitSet};
///
/// let empty = MutableBitSet::new(100);
/// assert_eq!(empty.len(), 100);
/// assert!(empty.is_empty());
///
/// let from_indices: MutableBitSet = [3, 64, 65].into_iter().collect();
/// assert_eq!(from_indices.cardinality(), 3);
///
/// let filled = MutableBitSet::filled(70);
/// assert_eq!(filled.cardinality(), 70);
/// ```
///
/// # Growth
///
/// Setting or flipping a bit beyond the capacity grows the buffer first.
/// Clearing never grows it.
///
/// ```
/// use bitsets::{BitSet, MutableBitSet};
///
/// let mut bits = MutableBitSet::new(10);
/// bits.set(1000);
/// assert!(bits.get(1000));
/// assert!(bits.capacity() >= 1001);
/// assert_eq!(bits.len(), 1001);
/// ```
///
/// # Set algebra
///
/// The combinators mutate `self` and return it for chaining:
///
/// ```
/// use bitsets::{BitSet, MutableBitSet};
///
/// let mut left: MutableBitSet = [1, 2, 3].into_iter().collect();
/// let right: MutableBitSet = [2, 3, 200].into_iter().collect();
/// left.or(&right).and_not(&MutableBitSet::from_iter([3]));
/// assert_eq!(left.ones().collect::<Vec<_>>(), vec![1, 2, 200]);
/// ```
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct MutableBitSet {
    words: Vec<Word>,
    wlen: usize,
    num_bits: usize,
}

impl AsWords for MutableBitSet {
    #[inline]
    fn word_view(&self) -> WordView<'_> {
        WordView::new(&self.words, self.wlen, self.num_bits)
    }
}

delegate_bit_set!(MutableBitSet, crate::bit::bitset_via_words::BitSetViaWords);

impl MutableBitSet {
    /// Creates a bit set of length `num_bits` with every bit clear.
    pub fn new(num_bits: usize) -> MutableBitSet {
        let words = vec![0; word_count(num_bits)];
        MutableBitSet {
            wlen: words.len(),
            words,
            num_bits,
        }
    }

    /// Creates an empty, zero-length set whose buffer already holds
    /// `capacity_bits` bits.
    pub fn with_capacity(capacity_bits: usize) -> MutableBitSet {
        MutableBitSet {
            words: vec![0; word_count(capacity_bits)],
            wlen: 0,
            num_bits: 0,
        }
    }

    /// Creates a bit set of length `num_bits` with every bit set.
    pub fn filled(num_bits: usize) -> MutableBitSet {
        let mut bits = Self::new(num_bits);
        bits.set_range(0..num_bits);
        bits
    }

    /// Creates a bit set from raw words; the length is the whole capacity.
    ///
    /// ```
    /// use bitsets::{BitSet, MutableBitSet};
    ///
    /// let bits = MutableBitSet::from_words(&[0b101, 1]);
    /// assert_eq!(bits.len(), 128);
    /// assert_eq!(bits.ones().collect::<Vec<_>>(), vec![0, 2, 64]);
    /// ```
    pub fn from_words(words: &[Word]) -> MutableBitSet {
        MutableBitSet {
            words: words.to_vec(),
            wlen: words.len(),
            num_bits: words.len() * WORD_BITS,
        }
    }

    /// Creates a bit set of length `num_bits` with uniformly random bits.
    pub fn random(num_bits: usize, random_number_generator: &mut impl rand::Rng) -> MutableBitSet {
        let mut bits = Self::new(num_bits);
        for word in &mut bits.words {
            *word = random_number_generator.r#gen();
        }
        let tail_bits = bit_offset(num_bits);
        if let Some(last) = bits.words.last_mut().filter(|_| tail_bits != 0) {
            *last &= (1 << tail_bits) - 1;
        }
        bits
    }

    pub(crate) fn from_parts(words: Vec<Word>, wlen: usize, num_bits: usize) -> MutableBitSet {
        MutableBitSet { words, wlen, num_bits }
    }

    pub(crate) fn from_decoded(decoded: DecodedBits) -> MutableBitSet {
        Self::from_parts(decoded.words, decoded.wlen, decoded.num_bits)
    }

    /// Grows the buffer so that bits `0..num_bits` are addressable.
    ///
    /// The buffer at least doubles when it grows. Existing bits are kept and
    /// the capacity never shrinks; the length is raised to `num_bits` if it was
    /// shorter.
    pub fn ensure_capacity(&mut self, num_bits: usize) {
        self.num_bits = self.num_bits.max(num_bits);
        self.ensure_words(word_count(num_bits));
    }

    fn ensure_words(&mut self, word_total: usize) {
        if word_total > self.words.len() {
            let grown = word_total.max(self.words.len() * 2);
            trace!(from = self.words.len(), to = grown, "growing bit set buffer");
            self.words.resize(grown, 0);
        }
        self.wlen = self.wlen.max(word_total);
    }

    pub fn set(&mut self, index: usize) {
        self.ensure_capacity(index + 1);
        self.words[word_index(index)] |= bit_mask(index);
    }

    pub fn clear(&mut self, index: usize) {
        if let Some(word) = self.words[..self.wlen].get_mut(word_index(index)) {
            *word &= !bit_mask(index);
        }
    }

    pub fn flip(&mut self, index: usize) {
        self.ensure_capacity(index + 1);
        self.words[word_index(index)] ^= bit_mask(index);
    }

    /// Sets the bit and returns its previous value.
    pub fn get_and_set(&mut self, index: usize) -> bool {
        self.ensure_capacity(index + 1);
        let word = &mut self.words[word_index(index)];
        let was_set = *word & bit_mask(index) != 0;
        *word |= bit_mask(index);
        was_set
    }

    /// Clears the bit and returns its previous value.
    pub fn get_and_clear(&mut self, index: usize) -> bool {
        match self.words[..self.wlen].get_mut(word_index(index)) {
            Some(word) => {
                let was_set = *word & bit_mask(index) != 0;
                *word &= !bit_mask(index);
                was_set
            }
            None => false,
        }
    }

    /// Sets every bit in `range`, growing first if needed.
    pub fn set_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.ensure_capacity(range.end);
        RangeMasks::new(range.start, range.end).apply(&mut self.words, |word, mask| *word |= mask);
    }

    /// Clears every bit in `range`; the part beyond the significant words is
    /// already clear.
    pub fn clear_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.wlen * WORD_BITS);
        if range.start >= end {
            return;
        }
        RangeMasks::new(range.start, end).apply(&mut self.words, |word, mask| *word &= !mask);
    }

    /// Flips every bit in `range`, growing first if needed.
    pub fn flip_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.ensure_capacity(range.end);
        RangeMasks::new(range.start, range.end).apply(&mut self.words, |word, mask| *word ^= mask);
    }

    /// Clears every bit, keeping length and capacity.
    pub fn clear_all(&mut self) {
        self.words[..self.wlen].fill(0);
    }

    /// Drops high-order zero words from the significant prefix.
    ///
    /// Capacity and length are unchanged. Equality and hashing do not depend
    /// on whether this was called.
    pub fn trim_trailing_zeros(&mut self) {
        while self.wlen > 0 && self.words[self.wlen - 1] == 0 {
            self.wlen -= 1;
        }
    }

    /// Keeps only the bits also set in `other`.
    ///
    /// Words of `self` beyond `other`'s significant words are cleared and
    /// dropped from the significant prefix; the buffer never grows.
    pub fn and<Other>(&mut self, other: &Other) -> &mut Self
    where
        Other: ?Sized + BitSet,
    {
        let other = other.word_view();
        let overlap = self.wlen.min(other.wlen);
        for (word, &other_word) in std::iter::zip(&mut self.words[..overlap], other.significant()) {
            *word &= other_word;
        }
        self.words[overlap..self.wlen].fill(0);
        self.wlen = overlap;
        self
    }

    /// Adds the bits set in `other`, growing to `other`'s length if it is longer.
    pub fn or<Other>(&mut self, other: &Other) -> &mut Self
    where
        Other: ?Sized + BitSet,
    {
        let other = other.word_view();
        self.ensure_capacity(other.num_bits);
        for (word, &other_word) in std::iter::zip(&mut self.words, other.significant()) {
            *word |= other_word;
        }
        self
    }

    /// Toggles the bits set in `other`, growing to `other`'s length if it is longer.
    pub fn xor<Other>(&mut self, other: &Other) -> &mut Self
    where
        Other: ?Sized + BitSet,
    {
        let other = other.word_view();
        self.ensure_capacity(other.num_bits);
        for (word, &other_word) in std::iter::zip(&mut self.words, other.significant()) {
            *word ^= other_word;
        }
        self
    }

    /// Removes the bits set in `other`; words beyond the overlap are untouched.
    pub fn and_not<Other>(&mut self, other: &Other) -> &mut Self
    where
        Other: ?Sized + BitSet,
    {
        let other = other.word_view();
        let overlap = self.wlen.min(other.wlen);
        for (word, &other_word) in std::iter::zip(&mut self.words[..overlap], other.significant()) {
            *word &= !other_word;
        }
        self
    }

    /// Freezes a copy of the current bits.
    pub fn to_immutable(&self) -> ImmutableBitSet {
        ImmutableBitSet::from(self)
    }

    /// Copies the current bits into a fixed-capacity set.
    pub fn to_unsafe(&self) -> UnsafeBitSet {
        UnsafeBitSet::from(self)
    }

    /// Writes the versioned binary form described in [`codec`](crate::codec).
    pub fn write_to(&self, writer: impl io::Write) -> io::Result<()> {
        codec::encode(self.word_view(), writer)
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode_to_vec(self.word_view())
    }

    pub fn read_from(reader: impl io::Read) -> Result<MutableBitSet, DecodeError> {
        codec::decode(reader).map(Self::from_decoded)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<MutableBitSet, DecodeError> {
        codec::decode_slice(bytes).map(Self::from_decoded)
    }
}

impl From<&ImmutableBitSet> for MutableBitSet {
    fn from(bits: &ImmutableBitSet) -> Self {
        bits.to_mutable()
    }
}

impl From<&UnsafeBitSet> for MutableBitSet {
    fn from(bits: &UnsafeBitSet) -> Self {
        bits.to_mutable()
    }
}

impl FromIterator<usize> for MutableBitSet {
    fn from_iter<Iterator: IntoIterator<Item = usize>>(iterator: Iterator) -> Self {
        let mut bits = MutableBitSet::default();
        bits.extend(iterator);
        bits
    }
}

impl Extend<usize> for MutableBitSet {
    fn extend<Iterator: IntoIterator<Item = usize>>(&mut self, iterator: Iterator) {
        for index in iterator {
            self.set(index);
        }
    }
}

impl<Other> BitAndAssign<&Other> for MutableBitSet
where
    Other: ?Sized + BitSet,
{
    fn bitand_assign(&mut self, other: &Other) {
        self.and(other);
    }
}

impl<Other> BitOrAssign<&Other> for MutableBitSet
where
    Other: ?Sized + BitSet,
{
    fn bitor_assign(&mut self, other: &Other) {
        self.or(other);
    }
}

impl<Other> BitXorAssign<&Other> for MutableBitSet
where
    Other: ?Sized + BitSet,
{
    fn bitxor_assign(&mut self, other: &Other) {
        self.xor(other);
    }
}

impl<Other> SubAssign<&Other> for MutableBitSet
where
    Other: ?Sized + BitSet,
{
    fn sub_assign(&mut self, other: &Other) {
        self.and_not(other);
    }
}
