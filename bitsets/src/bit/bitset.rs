use crate::bit::words::AsWords;

/// Read, scan and query operations shared by every bit set variant.
///
/// Indices at or beyond [`capacity`](BitSet::capacity) read as clear; scanning
/// for set bits covers the whole buffer, while scanning for clear bits covers
/// the logical range `0..len()`.
///
/// See also [`BitSetPair`] for the two-operand queries.
///
/// The raw words behind a set are not readable outside this crate:
///
/// ```compile_fail
/// use bitsets::{BitSet, MutableBitSet};
///
/// fn significant_words<T: BitSet>(bits: &T) -> usize {
///     bits.word_view().wlen
/// }
/// significant_words(&MutableBitSet::new(64));
/// ```
pub trait BitSet: AsWords {
    /// Logical length in bits.
    fn len(&self) -> usize;

    /// Addressable bits in the buffer, always a multiple of 64 and at least
    /// [`len`](BitSet::len).
    fn capacity(&self) -> usize;

    /// Number of set bits, recounted on every call.
    fn cardinality(&self) -> usize;

    /// Returns `true` when no bit is set, whatever the length.
    #[inline]
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    fn get(&self, index: usize) -> bool;

    /// Reads a bit without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](BitSet::len). Only debug builds check this.
    unsafe fn get_quick(&self, index: usize) -> bool;

    /// First set bit at or after `from`.
    fn next_set_bit(&self, from: usize) -> Option<usize>;

    /// Last set bit at or before `from`.
    fn prev_set_bit(&self, from: usize) -> Option<usize>;

    /// First clear bit at or after `from`, below [`len`](BitSet::len).
    fn next_clear_bit(&self, from: usize) -> Option<usize>;

    /// Last clear bit at or before `from`, below [`len`](BitSet::len).
    fn prev_clear_bit(&self, from: usize) -> Option<usize>;

    /// Calls `visit` with every set bit in ascending order.
    fn for_each_set_bit(&self, visit: impl FnMut(usize));

    /// Calls `visit` with every clear bit below [`len`](BitSet::len) in ascending order.
    fn for_each_clear_bit(&self, visit: impl FnMut(usize));

    /// Set bit indices in ascending order.
    fn ones(&self) -> impl sorted_iter::SortedIterator<Item = usize>;
}

macro_rules! delegate_bit_set_body {
    ($delegate_trait:path) => {
        #[inline]
        fn len(&self) -> usize {
            <Self as $delegate_trait>::len(self)
        }

        #[inline]
        fn capacity(&self) -> usize {
            <Self as $delegate_trait>::capacity(self)
        }

        #[inline]
        fn cardinality(&self) -> usize {
            <Self as $delegate_trait>::cardinality(self)
        }

        #[inline]
        fn get(&self, index: usize) -> bool {
            <Self as $delegate_trait>::get(self, index)
        }

        #[inline]
        unsafe fn get_quick(&self, index: usize) -> bool {
            unsafe { <Self as $delegate_trait>::get_quick(self, index) }
        }

        #[inline]
        fn next_set_bit(&self, from: usize) -> Option<usize> {
            <Self as $delegate_trait>::next_set_bit(self, from)
        }

        #[inline]
        fn prev_set_bit(&self, from: usize) -> Option<usize> {
            <Self as $delegate_trait>::prev_set_bit(self, from)
        }

        #[inline]
        fn next_clear_bit(&self, from: usize) -> Option<usize> {
            <Self as $delegate_trait>::next_clear_bit(self, from)
        }

        #[inline]
        fn prev_clear_bit(&self, from: usize) -> Option<usize> {
            <Self as $delegate_trait>::prev_clear_bit(self, from)
        }

        #[inline]
        fn for_each_set_bit(&self, visit: impl FnMut(usize)) {
            <Self as $delegate_trait>::for_each_set_bit(self, visit)
        }

        #[inline]
        fn for_each_clear_bit(&self, visit: impl FnMut(usize)) {
            <Self as $delegate_trait>::for_each_clear_bit(self, visit)
        }

        #[inline]
        fn ones(&self) -> impl sorted_iter::SortedIterator<Item = usize> {
            <Self as $delegate_trait>::ones(self)
        }
    };
}
pub(crate) use delegate_bit_set_body;

macro_rules! delegate_bit_set {
    ($type:ty, $delegate_trait:path) => {
        impl $crate::BitSet for $type {
            $crate::bit::bitset::delegate_bit_set_body! {$delegate_trait}
        }
    };
}
pub(crate) use delegate_bit_set;

/// Two-operand queries, answered without materializing the combined set.
///
/// Operands of different lengths are aligned at bit 0; missing high-order
/// words of the shorter operand read as zero. Implemented for every pair of
/// bit set variants, so `BitSetPair::and_count(&left, &right)` doubles as the
/// static form.
pub trait BitSetPair<Other: ?Sized = Self> {
    /// `true` iff some bit is set in both operands.
    fn intersects(&self, other: &Other) -> bool;
    /// Cardinality of `self & other`.
    fn and_count(&self, other: &Other) -> usize;
    /// Cardinality of `self | other`.
    fn or_count(&self, other: &Other) -> usize;
    /// Cardinality of `self ^ other`.
    fn xor_count(&self, other: &Other) -> usize;
    /// Cardinality of `self & !other`.
    fn and_not_count(&self, other: &Other) -> usize;
}
