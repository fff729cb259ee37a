//! CollisionTable - fixed bucket array with separate chaining.

use std::fmt;

use crate::{BucketHasher, HashVariant};

/// A fixed-size bucketed multiset of strings.
///
/// Keys are appended to the bucket chosen by the hasher. Duplicates are kept,
/// buckets never grow in number, and there is no removal. Every insertion
/// into a bucket that already holds a key counts as one collision, so
/// inserting the same key twice is always a collision.
///
/// # Example
///
/// ```
/// use nexus_buckets::{CollisionTable, HashVariant};
///
/// let mut table = CollisionTable::new(8, HashVariant::Direct);
///
/// assert!(!table.insert("Aa"));
/// assert!(table.insert("BB")); // same digest as "Aa"
/// assert!(table.insert("Aa")); // duplicates collide too
///
/// assert_eq!(table.collision_count(), 2);
/// assert_eq!(table.len(), 3);
/// assert!(table.contains("BB"));
/// assert!(!table.contains("Cc"));
/// ```
pub struct CollisionTable<H = HashVariant> {
    buckets: Box<[Vec<String>]>,
    collisions: usize,
    len: usize,
    hasher: H,
}

impl<H: BucketHasher> CollisionTable<H> {
    /// Creates a table with `bucket_count` empty buckets.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn new(bucket_count: usize, hasher: H) -> Self {
        assert!(bucket_count > 0, "bucket count must be non-zero");

        Self {
            buckets: std::iter::repeat_with(Vec::new).take(bucket_count).collect(),
            collisions: 0,
            len: 0,
            hasher,
        }
    }

    /// Bucket index for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the hasher returns an index outside the table.
    #[inline]
    fn index(&self, key: &str) -> usize {
        let bucket_count = self.buckets.len();
        let idx = self.hasher.bucket(key, bucket_count);
        assert!(
            idx < bucket_count,
            "hasher returned bucket {idx} for a table of {bucket_count}"
        );
        idx
    }

    /// Appends `key` to its bucket.
    ///
    /// Returns `true` if the bucket already held at least one key, in which
    /// case the collision count was incremented.
    ///
    /// # Panics
    ///
    /// Panics if the hasher returns an index outside the table.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        let idx = self.index(&key);
        let bucket = &mut self.buckets[idx];

        let collided = !bucket.is_empty();
        if collided {
            self.collisions += 1;
            tracing::trace!(bucket = idx, chain = bucket.len() + 1, key = %key, "collision");
        }

        bucket.push(key);
        self.len += 1;
        collided
    }

    /// Returns `true` if `key` has been inserted.
    ///
    /// Scans the key's bucket, so cost is linear in that bucket's length.
    ///
    /// # Panics
    ///
    /// Panics if the hasher returns an index outside the table.
    pub fn contains(&self, key: &str) -> bool {
        self.buckets[self.index(key)].iter().any(|k| k == key)
    }

    /// Returns the bucket `key` maps to.
    ///
    /// # Panics
    ///
    /// Panics if the hasher returns an index outside the table.
    pub fn bucket_of(&self, key: &str) -> usize {
        self.index(key)
    }
}

impl<H> CollisionTable<H> {
    /// Number of insertions that landed in a non-empty bucket.
    #[inline]
    pub fn collision_count(&self) -> usize {
        self.collisions
    }

    /// Occupancy of every bucket, in bucket order.
    pub fn distribution(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Returns the fixed number of buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total insertions, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Keys in bucket `index`, in insertion order.
    pub fn bucket(&self, index: usize) -> Option<&[String]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Returns the hasher.
    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<H: BucketHasher, S: Into<String>> Extend<S> for CollisionTable<H> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for CollisionTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionTable")
            .field("hasher", &self.hasher)
            .field("bucket_count", &self.buckets.len())
            .field("len", &self.len)
            .field("collisions", &self.collisions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_len(key: &str, buckets: usize) -> usize {
        key.len() % buckets
    }

    #[test]
    fn two_bucket_walkthrough() {
        let mut table = CollisionTable::new(2, by_len);

        assert!(!table.insert("ab"));
        assert!(table.insert("cd"));
        assert!(!table.insert("xyz"));

        assert_eq!(table.distribution(), vec![2, 1]);
        assert_eq!(table.collision_count(), 1);
        assert_eq!(table.bucket(0), Some(&["ab".to_owned(), "cd".to_owned()][..]));
        assert_eq!(table.bucket(2), None);
    }

    #[test]
    fn new_table_is_empty() {
        let table = CollisionTable::new(4, HashVariant::Direct);

        assert!(table.is_empty());
        assert_eq!(table.collision_count(), 0);
        assert_eq!(table.distribution(), vec![0; 4]);
        assert!(!table.contains("Alice"));
    }

    #[test]
    #[should_panic(expected = "bucket count must be non-zero")]
    fn zero_buckets_panics() {
        let _ = CollisionTable::new(0, HashVariant::Direct);
    }

    #[test]
    #[should_panic(expected = "hasher returned bucket 9")]
    fn out_of_range_hasher_panics() {
        let mut table = CollisionTable::new(3, |_: &str, _: usize| 9);
        table.insert("x");
    }

    #[test]
    fn duplicates_accumulate() {
        let mut table = CollisionTable::new(8, HashVariant::Scaled);

        for _ in 0..5 {
            table.insert("Emma");
        }

        assert_eq!(table.len(), 5);
        assert_eq!(table.collision_count(), 4);
        let idx = table.bucket_of("Emma");
        assert_eq!(table.distribution()[idx], 5);
    }

    #[test]
    fn single_bucket_collides_after_first() {
        let mut table = CollisionTable::new(1, HashVariant::Direct);
        table.extend(["a", "b", "c", "d"]);

        assert_eq!(table.collision_count(), 3);
        assert_eq!(table.distribution(), vec![4]);
    }

    #[test]
    fn contains_scans_only_own_bucket() {
        // Everything lands in bucket 0 except keys starting with 'z'.
        let mut table = CollisionTable::new(2, |key: &str, _: usize| usize::from(key.starts_with('z')));
        table.insert("apple");
        table.insert("zebra");

        assert!(table.contains("apple"));
        assert!(table.contains("zebra"));
        assert!(!table.contains("avocado"));
        assert_eq!(table.bucket(1), Some(&["zebra".to_owned()][..]));
    }

    #[test]
    fn variants_disagree_on_placement() {
        let names = ["Alice", "Emma", "Olivia", "Sophia", "Ava", "Mia", "Isabella"];
        let direct: Vec<usize> = names.iter().map(|n| HashVariant::Direct.bucket(n, 5000)).collect();
        let scaled: Vec<usize> = names.iter().map(|n| HashVariant::Scaled.bucket(n, 5000)).collect();
        assert_ne!(direct, scaled);
    }

    #[test]
    fn debug_output() {
        let mut table = CollisionTable::new(3, HashVariant::Direct);
        table.insert("Aa");
        table.insert("BB");
        assert_eq!(
            format!("{table:?}"),
            "CollisionTable { hasher: Direct, bucket_count: 3, len: 2, collisions: 1, .. }"
        );
    }
}
