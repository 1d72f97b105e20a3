use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::bit::word::Word;
use crate::bit::words::AsWords;
use crate::codec::DecodedBits;
use crate::{ImmutableBitSet, MutableBitSet, UnsafeBitSet};

#[derive(Serialize)]
struct SerializedBitSetRef<'life> {
    num_bits: usize,
    words: &'life [Word],
}

#[derive(Deserialize)]
struct SerializedBitSet {
    num_bits: usize,
    words: Vec<Word>,
}

macro_rules! serde_via_words {
    ($($type:ident),+) => {
        $(
            impl Serialize for $type {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    let view = self.word_view();
                    SerializedBitSetRef {
                        num_bits: view.num_bits,
                        words: view.significant(),
                    }
                    .serialize(serializer)
                }
            }

            impl<'de> Deserialize<'de> for $type {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let SerializedBitSet { num_bits, words } = SerializedBitSet::deserialize(deserializer)?;
                    DecodedBits::new(words, num_bits)
                        .map($type::from_decoded)
                        .map_err(de::Error::custom)
                }
            }
        )+
    };
}

serde_via_words!(MutableBitSet, ImmutableBitSet, UnsafeBitSet);
