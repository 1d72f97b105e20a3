use std::hash::{Hash, Hasher};

use crate::bit::words::AsWords;
use crate::{ImmutableBitSet, MutableBitSet, UnsafeBitSet};

// Equality compares significant words only, so two sets with the same bits are
// equal across variants, lengths and capacities.
macro_rules! bit_set_eq {
    ($left:ty => $($right:ty),+) => {
        $(
            impl PartialEq<$right> for $left {
                fn eq(&self, other: &$right) -> bool {
                    self.word_view().same_bits(&other.word_view())
                }
            }
        )+
    };
}

bit_set_eq!(MutableBitSet => MutableBitSet, ImmutableBitSet, UnsafeBitSet);
bit_set_eq!(ImmutableBitSet => MutableBitSet, ImmutableBitSet, UnsafeBitSet);
bit_set_eq!(UnsafeBitSet => MutableBitSet, ImmutableBitSet, UnsafeBitSet);

macro_rules! bit_set_hash {
    ($($type:ty),+) => {
        $(
            impl Eq for $type {}

            impl Hash for $type {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    state.write_u64(self.word_view().hash_code());
                }
            }
        )+
    };
}

bit_set_hash!(MutableBitSet, ImmutableBitSet, UnsafeBitSet);
