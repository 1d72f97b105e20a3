use crate::bit::word::{self, WORD_BITS, Word};

/// Borrowed view of a bit set's raw buffer.
///
/// This is the only way sibling variants read each other's words. Outside the
/// crate a view can still be obtained through the [`BitSet`](crate::BitSet)
/// supertrait, but its fields and methods are crate-private, so it is opaque.
#[derive(Clone, Copy)]
pub struct WordView<'life> {
    pub(crate) words: &'life [Word],
    pub(crate) wlen: usize,
    pub(crate) num_bits: usize,
}

impl<'life> WordView<'life> {
    #[inline]
    pub(crate) fn new(words: &'life [Word], wlen: usize, num_bits: usize) -> Self {
        debug_assert!(wlen <= words.len());
        debug_assert!(num_bits <= words.len() * WORD_BITS);
        WordView { words, wlen, num_bits }
    }

    /// The words that may contain set bits.
    #[inline]
    #[must_use]
    pub(crate) fn significant(&self) -> &'life [Word] {
        &self.words[..self.wlen]
    }

    /// The word at `index`, or zero past the significant prefix.
    #[inline]
    #[must_use]
    pub(crate) fn word_or_zero(&self, index: usize) -> Word {
        self.significant().get(index).copied().unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub(crate) fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Padding-tolerant word comparison.
    #[must_use]
    pub(crate) fn same_bits(&self, other: &WordView<'_>) -> bool {
        let (longer, shorter) = if self.wlen >= other.wlen {
            (self.significant(), other.significant())
        } else {
            (other.significant(), self.significant())
        };
        longer[..shorter.len()] == *shorter && longer[shorter.len()..].iter().all(|&word| word == 0)
    }

    #[must_use]
    pub(crate) fn hash_code(&self) -> u64 {
        word::hash_words(self.significant())
    }
}

/// Restricted access to a variant's word buffer.
pub trait AsWords {
    fn word_view(&self) -> WordView<'_>;
}
