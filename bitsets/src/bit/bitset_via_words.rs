use crate::BitSet;
use crate::bit::bitset::BitSetPair;
use crate::bit::word::{self, WORD_BITS, Word, bit_mask, bit_offset, leading_zero_count, trailing_zero_count, word_index};
use crate::bit::words::AsWords;
use sorted_iter::assume::AssumeSortedByItemExt;

/// The scan algorithms behind [`BitSet`], written once against [`WordView`](crate::bit::words::WordView).
pub trait BitSetViaWords: AsWords {
    #[inline]
    fn len(&self) -> usize {
        self.word_view().num_bits
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.word_view().capacity()
    }

    #[inline]
    fn cardinality(&self) -> usize {
        let view = self.word_view();
        word::popcount(view.words, 0, view.wlen)
    }

    #[inline]
    fn get(&self, index: usize) -> bool {
        self.word_view().word_or_zero(word_index(index)) & bit_mask(index) != 0
    }

    #[inline]
    unsafe fn get_quick(&self, index: usize) -> bool {
        let view = self.word_view();
        debug_assert!(index < view.num_bits, "index {index} is not below length {}", view.num_bits);
        let word = unsafe { *view.words.get_unchecked(word_index(index)) };
        word & bit_mask(index) != 0
    }

    fn next_set_bit(&self, from: usize) -> Option<usize> {
        let words = self.word_view().significant();
        let mut index = word_index(from);
        if index >= words.len() {
            return None;
        }
        let word = words[index] >> bit_offset(from);
        if word != 0 {
            return Some(from + trailing_zero_count(word));
        }
        index += 1;
        while index < words.len() {
            if words[index] != 0 {
                return Some(index * WORD_BITS + trailing_zero_count(words[index]));
            }
            index += 1;
        }
        None
    }

    fn prev_set_bit(&self, from: usize) -> Option<usize> {
        let words = self.word_view().significant();
        if words.is_empty() {
            return None;
        }
        let (mut index, offset) = if word_index(from) >= words.len() {
            (words.len() - 1, WORD_BITS - 1)
        } else {
            (word_index(from), bit_offset(from))
        };
        let word = words[index] << (WORD_BITS - 1 - offset);
        if word != 0 {
            return Some(index * WORD_BITS + offset - leading_zero_count(word));
        }
        while index > 0 {
            index -= 1;
            if words[index] != 0 {
                return Some(index * WORD_BITS + WORD_BITS - 1 - leading_zero_count(words[index]));
            }
        }
        None
    }

    fn next_clear_bit(&self, from: usize) -> Option<usize> {
        let view = self.word_view();
        if from >= view.num_bits {
            return None;
        }
        let word_total = word::word_count(view.num_bits);
        let mut index = word_index(from);
        let mut inverted = !view.word_or_zero(index) >> bit_offset(from);
        let mut found = (inverted != 0).then(|| from + trailing_zero_count(inverted));
        while found.is_none() {
            index += 1;
            if index >= word_total {
                return None;
            }
            inverted = !view.word_or_zero(index);
            if inverted != 0 {
                found = Some(index * WORD_BITS + trailing_zero_count(inverted));
            }
        }
        found.filter(|&bit| bit < view.num_bits)
    }

    fn prev_clear_bit(&self, from: usize) -> Option<usize> {
        let view = self.word_view();
        if view.num_bits == 0 {
            return None;
        }
        let from = from.min(view.num_bits - 1);
        let mut index = word_index(from);
        let offset = bit_offset(from);
        let inverted = !view.word_or_zero(index) << (WORD_BITS - 1 - offset);
        if inverted != 0 {
            return Some(index * WORD_BITS + offset - leading_zero_count(inverted));
        }
        while index > 0 {
            index -= 1;
            let inverted = !view.word_or_zero(index);
            if inverted != 0 {
                return Some(index * WORD_BITS + WORD_BITS - 1 - leading_zero_count(inverted));
            }
        }
        None
    }

    fn for_each_set_bit(&self, mut visit: impl FnMut(usize)) {
        for (index, &word) in self.word_view().significant().iter().enumerate() {
            visit_ones(index * WORD_BITS, word, &mut visit);
        }
    }

    fn for_each_clear_bit(&self, mut visit: impl FnMut(usize)) {
        let view = self.word_view();
        let full_words = view.num_bits / WORD_BITS;
        for index in 0..full_words {
            visit_ones(index * WORD_BITS, !view.word_or_zero(index), &mut visit);
        }
        let tail_bits = bit_offset(view.num_bits);
        if tail_bits != 0 {
            let tail_mask: Word = (1 << tail_bits) - 1;
            visit_ones(full_words * WORD_BITS, !view.word_or_zero(full_words) & tail_mask, &mut visit);
        }
    }

    fn ones(&self) -> impl sorted_iter::SortedIterator<Item = usize> {
        SetBits::new(self.word_view().significant()).assume_sorted_by_item()
    }
}

impl<T> BitSetViaWords for T where T: ?Sized + AsWords {}

#[inline]
fn visit_ones(base: usize, mut word: Word, visit: &mut impl FnMut(usize)) {
    while word != 0 {
        visit(base + trailing_zero_count(word));
        word &= word - 1;
    }
}

/// Iterator over set bit indices, one word at a time.
pub struct SetBits<'life> {
    words: &'life [Word],
    word_index: usize,
    current: Word,
}

impl<'life> SetBits<'life> {
    #[must_use]
    pub fn new(words: &'life [Word]) -> Self {
        SetBits {
            words,
            word_index: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for SetBits<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }
        let bit = trailing_zero_count(self.current);
        self.current &= self.current - 1;
        Some(self.word_index * WORD_BITS + bit)
    }
}

impl<Left, Right> BitSetPair<Right> for Left
where
    Left: ?Sized + BitSet,
    Right: ?Sized + BitSet,
{
    fn intersects(&self, other: &Right) -> bool {
        let (left, right) = (self.word_view().significant(), other.word_view().significant());
        std::iter::zip(left, right).any(|(&left, &right)| left & right != 0)
    }

    fn and_count(&self, other: &Right) -> usize {
        let (left, right) = (self.word_view().significant(), other.word_view().significant());
        word::pop_and(left, right, 0, left.len().min(right.len()))
    }

    fn or_count(&self, other: &Right) -> usize {
        let (left, right) = (self.word_view().significant(), other.word_view().significant());
        let overlap = left.len().min(right.len());
        word::pop_or(left, right, 0, overlap) + longer_tail_count(left, right, overlap)
    }

    fn xor_count(&self, other: &Right) -> usize {
        let (left, right) = (self.word_view().significant(), other.word_view().significant());
        let overlap = left.len().min(right.len());
        word::pop_xor(left, right, 0, overlap) + longer_tail_count(left, right, overlap)
    }

    fn and_not_count(&self, other: &Right) -> usize {
        let (left, right) = (self.word_view().significant(), other.word_view().significant());
        let overlap = left.len().min(right.len());
        word::pop_and_not(left, right, 0, overlap) + word::popcount(left, overlap, left.len() - overlap)
    }
}

#[inline]
fn longer_tail_count(left: &[Word], right: &[Word], overlap: usize) -> usize {
    let longer = if left.len() > right.len() { left } else { right };
    word::popcount(longer, overlap, longer.len() - overlap)
}
