//! Versioned binary form shared by every bit set variant.
//!
//! All integers are little-endian:
//!
//! | Offset | Size       | Field                              |
//! |-------:|-----------:|------------------------------------|
//! | 0      | 4          | magic, `b"BSET"`                   |
//! | 4      | 1          | format version, currently `1`      |
//! | 5      | 8          | length in bits, `u64`              |
//! | 13     | 4          | significant word count, `u32`      |
//! | 17     | 8 per word | significant words, lowest first    |
//!
//! Any variant can decode bytes written by any other, and version 1 blobs stay
//! readable by every later version of this crate.
//!
//! ```
//! use bitsets::{BitSet, ImmutableBitSet, MutableBitSet};
//!
//! let mut bits = MutableBitSet::new(800);
//! bits.set_range(400..800);
//! let bytes = bits.to_bytes();
//! assert_eq!(bytes.len(), bitsets::codec::HEADER_LEN + 13 * 8);
//!
//! let frozen = ImmutableBitSet::from_bytes(&bytes).unwrap();
//! assert_eq!(frozen, bits);
//! assert_eq!(frozen.len(), 800);
//! ```

use std::io::{self, Read, Write};

use derive_more::{Display, Error, From};
use tracing::debug;

use crate::bit::word::{WORD_BITS, Word, bit_offset, word_count};
use crate::bit::words::WordView;

pub const MAGIC: [u8; 4] = *b"BSET";
pub const FORMAT_VERSION: u8 = 1;
/// Bytes before the first word.
pub const HEADER_LEN: usize = MAGIC.len() + 1 + 8 + 4;

const WORD_BYTES: usize = WORD_BITS / 8;
const PREALLOCATED_WORDS: usize = 1 << 16;

#[derive(Debug, Display, Error, From)]
pub enum DecodeError {
    #[display("failed to read serialized bit set: {_0}")]
    #[from]
    Io(#[error(source)] io::Error),
    #[display("bad magic {found:02x?}, expected \"BSET\"")]
    BadMagic { found: [u8; 4] },
    #[display("unsupported format version {version}")]
    UnsupportedVersion { version: u8 },
    #[display("length of {num_bits} bits does not fit in memory")]
    LengthOverflow { num_bits: u64 },
    #[display("length of {num_bits} bits is too large to allocate")]
    TooLarge { num_bits: usize },
    #[display("{wlen} words is too many for a length of {num_bits} bits")]
    TooManyWords { wlen: usize, num_bits: usize },
    #[display("bit {index} is set beyond the length of {num_bits} bits")]
    BitBeyondLength { index: usize, num_bits: usize },
    #[display("{count} unexpected bytes after the last word")]
    TrailingBytes { count: usize },
}

/// Decoded words, ready to become any variant.
///
/// `words` is sized for the full length: `word_count(num_bits)` words, the
/// ones past `wlen` zero.
#[derive(Debug)]
pub(crate) struct DecodedBits {
    pub words: Vec<Word>,
    pub wlen: usize,
    pub num_bits: usize,
}

impl DecodedBits {
    /// Checks a claimed length and significant words, then pads the buffer.
    pub fn new(mut words: Vec<Word>, num_bits: usize) -> Result<DecodedBits, DecodeError> {
        let wlen = words.len();
        let word_total = word_count(num_bits);
        if wlen > word_total {
            return Err(DecodeError::TooManyWords { wlen, num_bits });
        }
        let tail_bits = bit_offset(num_bits);
        if wlen == word_total && tail_bits != 0 {
            let beyond = words[wlen - 1] >> tail_bits;
            if beyond != 0 {
                let index = (wlen - 1) * WORD_BITS + tail_bits + beyond.trailing_zeros() as usize;
                return Err(DecodeError::BitBeyondLength { index, num_bits });
            }
        }
        words
            .try_reserve_exact(word_total - wlen)
            .map_err(|_| DecodeError::TooLarge { num_bits })?;
        words.resize(word_total, 0);
        Ok(DecodedBits { words, wlen, num_bits })
    }
}

fn header(view: WordView<'_>) -> [u8; HEADER_LEN] {
    let wlen = u32::try_from(view.wlen)
        .unwrap_or_else(|_| panic!("{} significant words do not fit the format", view.wlen));
    let mut header = [0; HEADER_LEN];
    header[..4].copy_from_slice(&MAGIC);
    header[4] = FORMAT_VERSION;
    header[5..13].copy_from_slice(&(view.num_bits as u64).to_le_bytes());
    header[13..].copy_from_slice(&wlen.to_le_bytes());
    header
}

/// Writes `view` in the version 1 layout.
///
/// # Panics
///
/// Panics if the set has more than `u32::MAX` significant words.
pub(crate) fn encode(view: WordView<'_>, mut writer: impl Write) -> io::Result<()> {
    writer.write_all(&header(view))?;
    for word in view.significant() {
        writer.write_all(&word.to_le_bytes())?;
    }
    Ok(())
}

/// # Panics
///
/// Panics if the set has more than `u32::MAX` significant words.
pub(crate) fn encode_to_vec(view: WordView<'_>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + view.wlen * WORD_BYTES);
    bytes.extend_from_slice(&header(view));
    for word in view.significant() {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes
}

fn read_array<const N: usize>(reader: &mut impl Read) -> io::Result<[u8; N]> {
    let mut buffer = [0; N];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

fn read_bits(mut reader: impl Read) -> Result<DecodedBits, DecodeError> {
    let found = read_array::<4>(&mut reader)?;
    if found != MAGIC {
        return Err(DecodeError::BadMagic { found });
    }
    let [version] = read_array::<1>(&mut reader)?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion { version });
    }
    let encoded_bits = u64::from_le_bytes(read_array(&mut reader)?);
    let num_bits = usize::try_from(encoded_bits)
        .ok()
        .filter(|&num_bits| num_bits <= usize::MAX - (WORD_BITS - 1))
        .ok_or(DecodeError::LengthOverflow { num_bits: encoded_bits })?;
    let wlen = u32::from_le_bytes(read_array(&mut reader)?) as usize;
    if wlen > word_count(num_bits) {
        return Err(DecodeError::TooManyWords { wlen, num_bits });
    }
    let mut words = Vec::with_capacity(wlen.min(PREALLOCATED_WORDS));
    for _ in 0..wlen {
        words.push(Word::from_le_bytes(read_array(&mut reader)?));
    }
    DecodedBits::new(words, num_bits)
}

/// Reads one bit set from `reader`, leaving any bytes after it unread.
pub(crate) fn decode(reader: impl Read) -> Result<DecodedBits, DecodeError> {
    read_bits(reader).inspect_err(|error| debug!(%error, "rejected serialized bit set"))
}

/// Reads one bit set that must span all of `bytes`.
pub(crate) fn decode_slice(bytes: &[u8]) -> Result<DecodedBits, DecodeError> {
    let mut remaining = bytes;
    let decoded = decode(&mut remaining)?;
    if !remaining.is_empty() {
        let error = DecodeError::TrailingBytes { count: remaining.len() };
        debug!(%error, "rejected serialized bit set");
        return Err(error);
    }
    Ok(decoded)
}
