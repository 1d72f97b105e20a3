use std::io;
use std::ops::{BitAnd, BitOr, BitXor, Sub};
use std::sync::Arc;

use crate::bit::bitset::delegate_bit_set;
use crate::bit::word::{WORD_BITS, Word, word_count};
use crate::bit::words::{AsWords, WordView};
use crate::codec::{self, DecodeError, DecodedBits};
use crate::{BitSet, MutableBitSet, UnsafeBitSet};

/// A frozen bit set.
///
/// The words live behind an [`Arc`], so clones are cheap and an
/// `ImmutableBitSet` can be shared across threads as is. It has no mutating
/// methods: every combinator returns a new instance, sized as follows.
///
/// | Operation  | Significant words of the result     |
/// |------------|-------------------------------------|
/// | `and`      | `min(wlen(self), wlen(other))`      |
/// | `or`       | `max(wlen(self), wlen(other))`      |
/// | `xor`      | `max(wlen(self), wlen(other))`      |
/// | `and_not`  | `wlen(self)`                        |
///
/// Construction from borrowed data always copies, so nothing outside the set
/// can change its words later.
///
/// ```
/// use bitsets::{BitSet, BitSetPair, ImmutableBitSet, MutableBitSet};
///
/// let mut builder = MutableBitSet::new(128);
/// builder.set_range(0..10);
/// let low = builder.to_immutable();
/// let high = ImmutableBitSet::from_words(&[0, u64::MAX]);
///
/// let union = low.or(&high);
/// assert_eq!(union.cardinality(), 74);
/// assert_eq!(ImmutableBitSet::and_count(&low, &high), 0);
/// assert!(!low.intersects(&high));
///
/// // The original is untouched.
/// assert_eq!(low.cardinality(), 10);
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct ImmutableBitSet {
    words: Arc<[Word]>,
    wlen: usize,
    num_bits: usize,
}

impl AsWords for ImmutableBitSet {
    #[inline]
    fn word_view(&self) -> WordView<'_> {
        WordView::new(&self.words, self.wlen, self.num_bits)
    }
}

delegate_bit_set!(ImmutableBitSet, crate::bit::bitset_via_words::BitSetViaWords);

impl Default for ImmutableBitSet {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ImmutableBitSet {
    /// Creates a bit set of length `num_bits` with every bit clear.
    pub fn new(num_bits: usize) -> ImmutableBitSet {
        let wlen = word_count(num_bits);
        Self::from_parts(vec![0; wlen], wlen, num_bits)
    }

    /// Copies `words` into a new frozen set whose length is the whole capacity.
    pub fn from_words(words: &[Word]) -> ImmutableBitSet {
        ImmutableBitSet {
            words: Arc::from(words),
            wlen: words.len(),
            num_bits: words.len() * WORD_BITS,
        }
    }

    pub(crate) fn from_parts(words: Vec<Word>, wlen: usize, num_bits: usize) -> ImmutableBitSet {
        ImmutableBitSet {
            words: words.into(),
            wlen,
            num_bits,
        }
    }

    pub(crate) fn from_decoded(decoded: DecodedBits) -> ImmutableBitSet {
        Self::from_parts(decoded.words, decoded.wlen, decoded.num_bits)
    }

    fn combine(
        left: WordView<'_>,
        right: WordView<'_>,
        wlen: usize,
        num_bits: usize,
        operation: impl Fn(Word, Word) -> Word,
    ) -> ImmutableBitSet {
        let mut words = vec![0; word_count(num_bits).max(wlen)];
        for (index, word) in words[..wlen].iter_mut().enumerate() {
            *word = operation(left.word_or_zero(index), right.word_or_zero(index));
        }
        Self::from_parts(words, wlen, num_bits)
    }

    /// Bits set in both `left` and `right`.
    pub fn intersection(left: &ImmutableBitSet, right: &ImmutableBitSet) -> ImmutableBitSet {
        left.and(right)
    }

    /// Bits set in `left` or `right`.
    pub fn union(left: &ImmutableBitSet, right: &ImmutableBitSet) -> ImmutableBitSet {
        left.or(right)
    }

    /// Bits set in exactly one of `left` and `right`.
    pub fn symmetric_difference(left: &ImmutableBitSet, right: &ImmutableBitSet) -> ImmutableBitSet {
        left.xor(right)
    }

    /// Bits set in `left` but not in `right`.
    pub fn difference(left: &ImmutableBitSet, right: &ImmutableBitSet) -> ImmutableBitSet {
        left.and_not(right)
    }

    pub fn and<Other>(&self, other: &Other) -> ImmutableBitSet
    where
        Other: ?Sized + BitSet,
    {
        let (left, right) = (self.word_view(), other.word_view());
        let wlen = left.wlen.min(right.wlen);
        Self::combine(left, right, wlen, left.num_bits.min(right.num_bits), |left, right| left & right)
    }

    pub fn or<Other>(&self, other: &Other) -> ImmutableBitSet
    where
        Other: ?Sized + BitSet,
    {
        let (left, right) = (self.word_view(), other.word_view());
        let wlen = left.wlen.max(right.wlen);
        Self::combine(left, right, wlen, left.num_bits.max(right.num_bits), |left, right| left | right)
    }

    pub fn xor<Other>(&self, other: &Other) -> ImmutableBitSet
    where
        Other: ?Sized + BitSet,
    {
        let (left, right) = (self.word_view(), other.word_view());
        let wlen = left.wlen.max(right.wlen);
        Self::combine(left, right, wlen, left.num_bits.max(right.num_bits), |left, right| left ^ right)
    }

    pub fn and_not<Other>(&self, other: &Other) -> ImmutableBitSet
    where
        Other: ?Sized + BitSet,
    {
        let (left, right) = (self.word_view(), other.word_view());
        Self::combine(left, right, left.wlen, left.num_bits, |left, right| left & !right)
    }

    /// Copies the bits into a growable set.
    pub fn to_mutable(&self) -> MutableBitSet {
        MutableBitSet::from_parts(self.words.to_vec(), self.wlen, self.num_bits)
    }

    /// Copies the bits into a fixed-capacity set.
    pub fn to_unsafe(&self) -> UnsafeBitSet {
        UnsafeBitSet::from(self)
    }

    pub fn write_to(&self, writer: impl io::Write) -> io::Result<()> {
        codec::encode(self.word_view(), writer)
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode_to_vec(self.word_view())
    }

    pub fn read_from(reader: impl io::Read) -> Result<ImmutableBitSet, DecodeError> {
        codec::decode(reader).map(Self::from_decoded)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<ImmutableBitSet, DecodeError> {
        codec::decode_slice(bytes).map(Self::from_decoded)
    }
}

impl From<&MutableBitSet> for ImmutableBitSet {
    fn from(bits: &MutableBitSet) -> Self {
        let view = bits.word_view();
        Self::from_parts(view.words.to_vec(), view.wlen, view.num_bits)
    }
}

impl From<MutableBitSet> for ImmutableBitSet {
    fn from(bits: MutableBitSet) -> Self {
        ImmutableBitSet::from(&bits)
    }
}

impl From<&UnsafeBitSet> for ImmutableBitSet {
    fn from(bits: &UnsafeBitSet) -> Self {
        bits.to_immutable()
    }
}

macro_rules! immutable_operator {
    ($operator:ident, $method:ident, $combinator:ident) => {
        impl<Other> $operator<&Other> for &ImmutableBitSet
        where
            Other: ?Sized + BitSet,
        {
            type Output = ImmutableBitSet;

            fn $method(self, other: &Other) -> ImmutableBitSet {
                self.$combinator(other)
            }
        }
    };
}

immutable_operator!(BitAnd, bitand, and);
immutable_operator!(BitOr, bitor, or);
immutable_operator!(BitXor, bitxor, xor);
immutable_operator!(Sub, sub, and_not);
