//! CollisionTable against a reference bucket model.

use nexus_buckets::{BucketHasher, CollisionTable, HashVariant};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Replays insertions into plain vectors and counts collisions.
fn replay<H: BucketHasher>(hasher: &H, buckets: usize, keys: &[String]) -> (Vec<Vec<String>>, usize) {
    let mut model = vec![Vec::new(); buckets];
    let mut collisions = 0;
    for key in keys {
        let bucket = &mut model[hasher.bucket(key, buckets)];
        if !bucket.is_empty() {
            collisions += 1;
        }
        bucket.push(key.clone());
    }
    (model, collisions)
}

fn keys() -> impl Strategy<Value = Vec<String>> {
    // Small alphabet so duplicates and shared buckets are common.
    prop::collection::vec("[a-dA-D]{0,4}", 0..200)
}

fn variant() -> impl Strategy<Value = HashVariant> {
    prop_oneof![Just(HashVariant::Direct), Just(HashVariant::Scaled)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_reference_model(
        buckets in 1usize..64,
        variant in variant(),
        keys in keys(),
    ) {
        let mut table = CollisionTable::new(buckets, variant);
        for key in &keys {
            table.insert(key.as_str());
        }

        let (model, collisions) = replay(&variant, buckets, &keys);

        prop_assert_eq!(table.collision_count(), collisions);
        prop_assert_eq!(table.distribution(), model.iter().map(Vec::len).collect::<Vec<_>>());
        for (i, bucket) in model.iter().enumerate() {
            prop_assert_eq!(table.bucket(i), Some(bucket.as_slice()));
        }
    }

    #[test]
    fn distribution_sums_to_inserts(
        buckets in 1usize..5000,
        variant in variant(),
        keys in keys(),
    ) {
        let mut table = CollisionTable::new(buckets, variant);
        table.extend(keys.iter().cloned());

        prop_assert_eq!(table.distribution().iter().sum::<usize>(), keys.len());
        prop_assert_eq!(table.len(), keys.len());
    }

    #[test]
    fn contains_after_insert(
        buckets in 1usize..128,
        variant in variant(),
        keys in keys(),
    ) {
        let mut table = CollisionTable::new(buckets, variant);
        for (i, key) in keys.iter().enumerate() {
            table.insert(key.as_str());
            prop_assert!(table.contains(key));
            // Earlier keys stay present.
            for earlier in &keys[..i] {
                prop_assert!(table.contains(earlier));
            }
        }
    }

    /// Final occupancy depends only on the key multiset.
    #[test]
    fn final_distribution_ignores_order(
        buckets in 1usize..64,
        variant in variant(),
        keys in keys(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = keys.clone();
        shuffled.shuffle(&mut SmallRng::seed_from_u64(seed));

        let mut a = CollisionTable::new(buckets, variant);
        let mut b = CollisionTable::new(buckets, variant);
        a.extend(keys.iter().cloned());
        b.extend(shuffled.iter().cloned());

        prop_assert_eq!(a.distribution(), b.distribution());
        prop_assert_eq!(a.collision_count(), b.collision_count());
    }
}

fn by_len(key: &str, buckets: usize) -> usize {
    key.len() % buckets
}

#[test]
fn two_bucket_example() {
    let mut table = CollisionTable::new(2, by_len);
    table.insert("ab");
    table.insert("cd");
    table.insert("xyz");

    assert_eq!(table.distribution(), vec![2, 1]);
    assert_eq!(table.collision_count(), 1);
}

/// The running collision count depends on insertion order even though the
/// final distribution does not.
#[test]
fn running_collision_count_is_order_sensitive() {
    let forward = ["ab", "cd", "xyz", "uvw"];
    let reordered = ["ab", "xyz", "cd", "uvw"];

    let running = |keys: &[&str]| -> Vec<usize> {
        let mut table = CollisionTable::new(2, by_len);
        keys.iter()
            .map(|k| {
                table.insert(*k);
                table.collision_count()
            })
            .collect()
    };

    let a = running(&forward);
    let b = running(&reordered);

    assert_eq!(a, vec![0, 1, 1, 2]);
    assert_eq!(b, vec![0, 0, 1, 2]);
    assert_ne!(a, b);

    let mut ta = CollisionTable::new(2, by_len);
    let mut tb = CollisionTable::new(2, by_len);
    ta.extend(forward);
    tb.extend(reordered);
    assert_eq!(ta.distribution(), tb.distribution());
}

#[test]
fn pinned_digest_collisions() {
    // "Aa" and "BB" share a digest; "AaAa", "AaBB", "BBAa", "BBBB" all do too.
    let mut table = CollisionTable::new(5000, HashVariant::Direct);
    table.extend(["Aa", "BB"]);
    assert_eq!(table.collision_count(), 1);

    let mut table = CollisionTable::new(5000, HashVariant::Scaled);
    table.extend(["AaAa", "AaBB", "BBAa", "BBBB"]);
    assert_eq!(table.collision_count(), 3);
    assert_eq!(table.distribution().iter().filter(|&&n| n > 0).count(), 1);
}

#[test]
fn variants_differ_over_name_list() {
    let names: Vec<String> = (0..2_000).map(|i| format!("name{i}")).collect();

    let mut direct = CollisionTable::new(500, HashVariant::Direct);
    let mut scaled = CollisionTable::new(500, HashVariant::Scaled);
    direct.extend(names.iter().map(String::as_str));
    scaled.extend(names.iter().map(String::as_str));

    assert_eq!(direct.len(), scaled.len());
    assert_ne!(direct.distribution(), scaled.distribution());
    // 2000 keys in 500 buckets: at least 1500 collisions whatever the hash.
    assert!(direct.collision_count() >= 1500);
    assert!(scaled.collision_count() >= 1500);
}
