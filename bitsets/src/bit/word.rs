//! Word-level primitives shared by every bit set variant.
//!
//! All functions take plain word slices; callers guarantee that the
//! `from..from + len` ranges they pass are in bounds for every slice.

pub type Word = u64;

pub const WORD_BITS: usize = Word::BITS as usize;

const WORD_SHIFT: usize = 6;
const WORD_MASK: usize = WORD_BITS - 1;

/// Added to the folded hash so that an all-zero bit set does not hash to zero.
const HASH_OFFSET: u64 = 0x9876_1234;

#[inline]
#[must_use]
pub fn word_index(bit_index: usize) -> usize {
    bit_index >> WORD_SHIFT
}

#[inline]
#[must_use]
pub fn bit_offset(bit_index: usize) -> usize {
    bit_index & WORD_MASK
}

#[inline]
#[must_use]
pub fn bit_mask(bit_index: usize) -> Word {
    1 << bit_offset(bit_index)
}

/// Number of words needed to hold `num_bits` bits.
#[inline]
#[must_use]
pub fn word_count(num_bits: usize) -> usize {
    num_bits.div_ceil(WORD_BITS)
}

#[inline]
#[must_use]
pub fn trailing_zero_count(word: Word) -> usize {
    word.trailing_zeros() as usize
}

#[inline]
#[must_use]
pub fn leading_zero_count(word: Word) -> usize {
    word.leading_zeros() as usize
}

#[inline]
#[must_use]
pub fn popcount(words: &[Word], from: usize, len: usize) -> usize {
    words[from..from + len]
        .iter()
        .map(|word| word.count_ones() as usize)
        .sum()
}

#[inline]
fn pop_with(left: &[Word], right: &[Word], from: usize, len: usize, combine: impl Fn(Word, Word) -> Word) -> usize {
    std::iter::zip(&left[from..from + len], &right[from..from + len])
        .map(|(&left, &right)| combine(left, right).count_ones() as usize)
        .sum()
}

#[inline]
#[must_use]
pub fn pop_and(left: &[Word], right: &[Word], from: usize, len: usize) -> usize {
    pop_with(left, right, from, len, |left, right| left & right)
}

#[inline]
#[must_use]
pub fn pop_or(left: &[Word], right: &[Word], from: usize, len: usize) -> usize {
    pop_with(left, right, from, len, |left, right| left | right)
}

#[inline]
#[must_use]
pub fn pop_xor(left: &[Word], right: &[Word], from: usize, len: usize) -> usize {
    pop_with(left, right, from, len, |left, right| left ^ right)
}

#[inline]
#[must_use]
pub fn pop_and_not(left: &[Word], right: &[Word], from: usize, len: usize) -> usize {
    pop_with(left, right, from, len, |left, right| left & !right)
}

/// Masks selecting the bits of `from..to` inside its first and last word.
///
/// Requires `from < to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeMasks {
    pub start_word: usize,
    pub end_word: usize,
    pub start_mask: Word,
    pub end_mask: Word,
}

impl RangeMasks {
    #[must_use]
    pub fn new(from: usize, to: usize) -> Self {
        debug_assert!(from < to);
        RangeMasks {
            start_word: word_index(from),
            end_word: word_index(to - 1),
            start_mask: Word::MAX << bit_offset(from),
            end_mask: Word::MAX >> (WORD_BITS.wrapping_sub(bit_offset(to)) & WORD_MASK),
        }
    }

    /// Applies `update(word, mask)` to every word touched by the range.
    pub fn apply(&self, words: &mut [Word], update: impl Fn(&mut Word, Word)) {
        if self.start_word == self.end_word {
            update(&mut words[self.start_word], self.start_mask & self.end_mask);
            return;
        }
        update(&mut words[self.start_word], self.start_mask);
        for word in &mut words[self.start_word + 1..self.end_word] {
            update(word, Word::MAX);
        }
        update(&mut words[self.end_word], self.end_mask);
    }
}

/// Rotate-XOR fold over the words, highest word first.
///
/// Zero words above the highest set bit leave the fold at zero, so two slices
/// that differ only by high-order zero padding hash identically.
#[must_use]
pub fn hash_words(words: &[Word]) -> u64 {
    let folded = words
        .iter()
        .rev()
        .fold(0u64, |hash, &word| (hash ^ word).rotate_left(1));
    ((folded >> 32) ^ folded).wrapping_add(HASH_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_counts_locate_extreme_bits() {
        assert_eq!(trailing_zero_count(0), 64);
        assert_eq!(trailing_zero_count(1), 0);
        assert_eq!(trailing_zero_count(1 << 63), 63);
        assert_eq!(leading_zero_count(0), 64);
        assert_eq!(leading_zero_count(1), 63);
        assert_eq!(leading_zero_count(1 << 63), 0);
    }

    #[test]
    fn word_count_rounds_up() {
        assert_eq!(word_count(0), 0);
        assert_eq!(word_count(1), 1);
        assert_eq!(word_count(64), 1);
        assert_eq!(word_count(65), 2);
        assert_eq!(word_count(800), 13);
    }

    #[test]
    fn pair_popcounts_match_materialized_words() {
        let left = [0b1100u64, u64::MAX, 0, 7];
        let right = [0b1010u64, 0, u64::MAX, 5];
        assert_eq!(popcount(&left, 0, 4), 2 + 64 + 3);
        assert_eq!(pop_and(&left, &right, 0, 4), 1 + 2);
        assert_eq!(pop_or(&left, &right, 0, 4), 3 + 64 + 64 + 3);
        assert_eq!(pop_xor(&left, &right, 0, 4), 2 + 64 + 64 + 1);
        assert_eq!(pop_and_not(&left, &right, 0, 4), 1 + 64 + 1);
        assert_eq!(pop_and(&left, &right, 1, 2), 0);
    }

    #[test]
    fn range_masks_cover_single_and_multiple_words() {
        let mut words = [0u64; 3];
        RangeMasks::new(3, 7).apply(&mut words, |word, mask| *word |= mask);
        assert_eq!(words, [0b0111_1000, 0, 0]);

        let mut words = [0u64; 3];
        RangeMasks::new(60, 130).apply(&mut words, |word, mask| *word |= mask);
        assert_eq!(words, [0xF000_0000_0000_0000, u64::MAX, 0b11]);

        let mut words = [0u64; 2];
        RangeMasks::new(0, 128).apply(&mut words, |word, mask| *word |= mask);
        assert_eq!(words, [u64::MAX, u64::MAX]);
    }

    #[test]
    fn hash_ignores_high_zero_words() {
        assert_eq!(hash_words(&[5, 9]), hash_words(&[5, 9, 0, 0]));
        assert_ne!(hash_words(&[5, 9]), hash_words(&[9, 5]));
        assert_ne!(hash_words(&[]), 0);
        assert_eq!(hash_words(&[]), hash_words(&[0, 0, 0]));
    }
}
