use bitsets::{BitSet, BitSetPair, ImmutableBitSet, MutableBitSet, UnsafeBitSet};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[test]
fn new_is_clear_with_rounded_capacity() {
    let bits = MutableBitSet::new(100);
    assert_eq!(bits.len(), 100);
    assert_eq!(bits.capacity(), 128);
    assert_eq!(bits.cardinality(), 0);
    assert!(bits.is_empty());
    assert_eq!(bits.next_set_bit(0), None);
    assert_eq!(bits.next_clear_bit(0), Some(0));
}

#[test]
fn zero_length_set() {
    let bits = MutableBitSet::new(0);
    assert_eq!(bits.capacity(), 0);
    assert_eq!(bits.next_clear_bit(0), None);
    assert_eq!(bits.prev_clear_bit(0), None);
    assert_eq!(bits.prev_set_bit(10), None);
    assert!(!bits.get(0));
}

#[test]
fn with_capacity_preallocates_without_length() {
    let mut bits = MutableBitSet::with_capacity(300);
    assert_eq!(bits.len(), 0);
    assert_eq!(bits.capacity(), 320);
    assert_eq!(bits.next_clear_bit(0), None);
    bits.set(299);
    assert_eq!(bits.len(), 300);
    assert_eq!(bits.capacity(), 320);
    assert_eq!(bits.to_bytes().len(), 17 + 5 * 8);
}

#[test]
fn get_beyond_capacity_is_false() {
    let bits = MutableBitSet::filled(64);
    assert!(bits.get(63));
    assert!(!bits.get(64));
    assert!(!bits.get(usize::MAX));
}

#[test]
fn set_grows_and_doubles() {
    let mut bits = MutableBitSet::new(64);
    bits.set(64);
    assert_eq!(bits.capacity(), 128);
    assert_eq!(bits.len(), 65);
    bits.set(1000);
    assert_eq!(bits.capacity(), 1024);
    assert_eq!(bits.len(), 1001);
    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![64, 1000]);
}

#[test]
fn clear_never_grows() {
    let mut bits = MutableBitSet::new(10);
    bits.clear(5000);
    bits.clear_range(100..5000);
    assert_eq!(bits.capacity(), 64);
    assert_eq!(bits.len(), 10);
    assert!(!bits.get_and_clear(5000));
}

#[test]
fn single_bit_mutators() {
    let mut bits = MutableBitSet::new(128);
    assert!(!bits.get_and_set(70));
    assert!(bits.get_and_set(70));
    bits.flip(3);
    bits.flip(70);
    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![3]);
    assert!(bits.get_and_clear(3));
    assert!(bits.is_empty());
}

#[test]
fn ranges_across_word_boundaries() {
    let mut bits = MutableBitSet::new(256);
    bits.set_range(60..200);
    assert_eq!(bits.cardinality(), 140);
    bits.clear_range(64..128);
    assert_eq!(bits.cardinality(), 76);
    bits.flip_range(0..64);
    assert_eq!(bits.next_clear_bit(0), Some(60));
    assert_eq!(bits.prev_clear_bit(255), Some(255));
    assert_eq!(bits.prev_set_bit(255), Some(199));

    bits.set_range(10..10);
    bits.flip_range(5..5);
    assert_eq!(bits.cardinality(), 60 + 72);
}

#[test]
fn range_within_one_word() {
    let mut bits = MutableBitSet::new(64);
    bits.set_range(5..9);
    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![5, 6, 7, 8]);
    bits.flip_range(0..64);
    assert_eq!(bits.cardinality(), 60);
}

#[test]
fn set_range_grows() {
    let mut bits = MutableBitSet::new(0);
    bits.set_range(100..300);
    assert_eq!(bits.len(), 300);
    assert_eq!(bits.cardinality(), 200);
    assert_eq!(bits.next_set_bit(0), Some(100));
    assert_eq!(bits.prev_set_bit(usize::MAX), Some(299));
}

#[test]
fn clear_all_keeps_shape() {
    let mut bits = MutableBitSet::filled(300);
    bits.clear_all();
    assert!(bits.is_empty());
    assert_eq!(bits.len(), 300);
    assert_eq!(bits.capacity(), 320);
}

#[test]
fn ensure_capacity_never_shrinks() {
    let mut bits = MutableBitSet::new(500);
    bits.ensure_capacity(10);
    assert_eq!(bits.len(), 500);
    assert_eq!(bits.capacity(), 512);
    bits.ensure_capacity(513);
    assert_eq!(bits.len(), 513);
    assert_eq!(bits.capacity(), 1024);
}

#[test]
fn trimming_keeps_scans_in_range() {
    let mut bits = MutableBitSet::new(640);
    bits.set(5);
    bits.trim_trailing_zeros();
    assert_eq!(bits.next_clear_bit(600), Some(600));
    assert_eq!(bits.prev_clear_bit(639), Some(639));
    let mut clear = 0;
    bits.for_each_clear_bit(|_| clear += 1);
    assert_eq!(clear, 639);

    bits.set(600);
    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![5, 600]);
}

#[test]
fn and_with_shorter_operand_drops_excess() {
    let mut bits = MutableBitSet::filled(256);
    let short = MutableBitSet::filled(64);
    bits.and(&short);
    assert_eq!(bits.cardinality(), 64);
    assert_eq!(bits.capacity(), 256);
    assert_eq!(bits, short);
}

#[test]
fn or_and_xor_grow_to_longer_operand() {
    let mut bits = MutableBitSet::new(10);
    let mut long = MutableBitSet::new(1000);
    long.set(999);
    bits.or(&long);
    assert_eq!(bits.len(), 1000);
    assert!(bits.get(999));

    let mut toggled = MutableBitSet::new(10);
    toggled.xor(&long).xor(&long);
    assert!(toggled.is_empty());
    assert_eq!(toggled.len(), 1000);
}

#[test]
fn and_not_leaves_words_beyond_overlap() {
    let mut bits = MutableBitSet::filled(256);
    bits.and_not(&MutableBitSet::filled(64));
    assert_eq!(bits.cardinality(), 192);
    assert_eq!(bits.next_set_bit(0), Some(64));
}

#[test]
fn combines_with_every_variant() {
    let mut bits: MutableBitSet = [1, 2, 3, 100].into_iter().collect();
    let frozen = ImmutableBitSet::from_words(&[0b0110]);
    let fixed = UnsafeBitSet::from_words(&[0b1000, 0]);
    bits &= &frozen;
    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![1, 2]);
    bits |= &fixed;
    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![1, 2, 3]);
    bits ^= &frozen;
    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![3]);
    bits -= &fixed;
    assert!(bits.is_empty());
}

#[test]
fn counts_against_other_variants() {
    let bits = MutableBitSet::filled(200);
    let fixed = UnsafeBitSet::from_words(&[u64::MAX]);
    assert_eq!(bits.and_count(&fixed), 64);
    assert_eq!(bits.and_not_count(&fixed), 136);
    assert_eq!(fixed.or_count(&bits), 200);
    assert_eq!(fixed.xor_count(&bits), 136);
    assert!(fixed.intersects(&bits));
}

#[test]
fn conversions_copy() {
    let mut bits = MutableBitSet::new(300);
    bits.set_range(250..300);
    let frozen = bits.to_immutable();
    let fixed = bits.to_unsafe();
    bits.clear_all();
    assert_eq!(frozen.cardinality(), 50);
    assert_eq!(fixed.cardinality(), 50);
    assert_eq!(fixed.len(), 300);
    assert_eq!(MutableBitSet::from(&frozen), fixed);
    assert_eq!(MutableBitSet::from(&fixed).len(), 300);
}

#[test]
fn random_respects_length() {
    let mut random_number_generator = SmallRng::seed_from_u64(7);
    for num_bits in [0, 1, 63, 64, 65, 1000] {
        let bits = MutableBitSet::random(num_bits, &mut random_number_generator);
        assert_eq!(bits.len(), num_bits);
        assert!(bits.ones().all(|index| index < num_bits));
    }
}

#[test]
fn from_words_uses_whole_capacity() {
    let bits = MutableBitSet::from_words(&[0, 1 << 63]);
    assert_eq!(bits.len(), 128);
    assert_eq!(bits.prev_set_bit(1000), Some(127));
    assert_eq!(bits.next_clear_bit(0), Some(0));
    assert_eq!(bits.prev_clear_bit(127), Some(126));
}
