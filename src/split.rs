//! Seeded train/validation/test partitioning.
//!
//! [`train_val_test_split`] performs a two-stage split: 60% train vs. 40%
//! temp, then temp 50/50 into validation and test. Both stages reuse the
//! same seed, and when stratifying, the second stage re-derives class
//! proportions from the temp subset itself rather than from the full input.
//! That re-derivation compounds sampling variance slightly but is the
//! upstream behavior this service reproduces.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{PrepError, PrepResult};
use crate::types::{DataSet, Value};

/// Options controlling the split.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Seed for the random permutation.
    pub random_state: u64,
    /// Whether to shuffle before splitting.
    pub shuffle: bool,
    /// Column whose class proportions each partition should preserve.
    pub stratify_column: Option<String>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            random_state: 42,
            shuffle: true,
            stratify_column: None,
        }
    }
}

/// The three disjoint partitions of an input dataset.
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub train: DataSet,
    pub val: DataSet,
    pub test: DataSet,
}

/// Partition `ds` into train (60%), validation (20%), and test (20%).
///
/// Identical `(seed, shuffle, stratify)` inputs on identical data always
/// produce identical partitions.
pub fn train_val_test_split(ds: &DataSet, opts: &SplitOptions) -> PrepResult<SplitResult> {
    let stratify = opts.stratify_column.as_deref();

    let (train, temp) = two_way_split(ds, 0.4, opts.random_state, opts.shuffle, stratify)?;
    let (val, test) = two_way_split(&temp, 0.5, opts.random_state, opts.shuffle, stratify)?;

    Ok(SplitResult { train, val, test })
}

/// Split `ds` into a `(rest, test)` pair where test holds `ceil(n * test_fraction)` rows.
fn two_way_split(
    ds: &DataSet,
    test_fraction: f64,
    seed: u64,
    shuffle: bool,
    stratify: Option<&str>,
) -> PrepResult<(DataSet, DataSet)> {
    let n = ds.row_count();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(PrepError::Sampling {
            message: format!(
                "cannot split {n} rows into non-empty parts at test fraction {test_fraction}"
            ),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let (train_idx, test_idx) = match stratify {
        Some(column) => {
            if !shuffle {
                return Err(PrepError::Sampling {
                    message: "stratified splitting requires shuffle=true".to_string(),
                });
            }
            stratified_indices(ds, column, n_train, n_test, &mut rng)?
        }
        None if shuffle => {
            let mut indices: Vec<usize> = (0..n).collect();
            indices.shuffle(&mut rng);
            let test_idx = indices[..n_test].to_vec();
            let train_idx = indices[n_test..].to_vec();
            (train_idx, test_idx)
        }
        None => {
            // Unshuffled: leading rows train, trailing rows test.
            ((0..n_train).collect(), (n_train..n).collect())
        }
    };

    Ok((ds.take_rows(&train_idx)?, ds.take_rows(&test_idx)?))
}

/// Pick test rows class-by-class so each class's share of the test set
/// matches its share of the input, using largest-remainder apportionment.
fn stratified_indices(
    ds: &DataSet,
    column: &str,
    n_train: usize,
    n_test: usize,
    rng: &mut ChaCha8Rng,
) -> PrepResult<(Vec<usize>, Vec<usize>)> {
    let col = ds
        .schema
        .index_of(column)
        .ok_or_else(|| PrepError::ColumnNotFound {
            column: column.to_string(),
        })?;

    // Group row indices by class, first-seen class order for determinism.
    let mut classes: Vec<(String, Vec<usize>)> = Vec::new();
    for (i, row) in ds.rows.iter().enumerate() {
        let key = class_key(&row[col]);
        match classes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(i),
            None => classes.push((key, vec![i])),
        }
    }

    if let Some((_, members)) = classes.iter().find(|(_, m)| m.len() < 2) {
        return Err(PrepError::Sampling {
            message: format!(
                "the least populated class in '{column}' has only {} member(s); \
                 stratified splitting needs at least 2 per class",
                members.len()
            ),
        });
    }
    if n_test < classes.len() || n_train < classes.len() {
        return Err(PrepError::Sampling {
            message: format!(
                "train size {n_train} / test size {n_test} must be at least the number \
                 of classes in '{column}' ({})",
                classes.len()
            ),
        });
    }

    let n = ds.row_count();
    let takes = apportion(n_test, n, &classes);

    let mut train_idx = Vec::with_capacity(n_train);
    let mut test_idx = Vec::with_capacity(n_test);
    for ((_, members), take) in classes.iter().zip(takes) {
        let mut members = members.clone();
        members.shuffle(rng);
        test_idx.extend_from_slice(&members[..take]);
        train_idx.extend_from_slice(&members[take..]);
    }

    // Mix class blocks so partition row order is not grouped by class.
    train_idx.shuffle(rng);
    test_idx.shuffle(rng);

    Ok((train_idx, test_idx))
}

/// Distribute `n_test` picks over classes proportionally to class size:
/// floor of each exact quota, then leftovers by largest fractional remainder.
fn apportion(n_test: usize, n: usize, classes: &[(String, Vec<usize>)]) -> Vec<usize> {
    let mut takes: Vec<usize> = Vec::with_capacity(classes.len());
    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(classes.len());
    for (i, (_, members)) in classes.iter().enumerate() {
        let quota = n_test as f64 * members.len() as f64 / n as f64;
        let floor = quota.floor() as usize;
        takes.push(floor);
        remainders.push((i, quota - floor as f64));
    }

    let mut leftover = n_test - takes.iter().sum::<usize>();
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (i, _) in remainders {
        if leftover == 0 {
            break;
        }
        // Never take a whole class into the test side.
        if takes[i] + 1 < classes[i].1.len() {
            takes[i] += 1;
            leftover -= 1;
        }
    }
    takes
}

/// Stable string key identifying a class value. Nulls form their own class.
fn class_key(value: &Value) -> String {
    match value {
        Value::Null => "\u{0}null".to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Utf8(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{train_val_test_split, SplitOptions};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn dataset(n: usize) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("class", DataType::Utf8),
        ]);
        let rows = (0..n)
            .map(|i| {
                let label = if i % 5 == 0 { "rare" } else { "common" };
                vec![Value::Int64(i as i64), Value::Utf8(label.to_string())]
            })
            .collect();
        DataSet::new(schema, rows)
    }

    fn ids(ds: &DataSet) -> Vec<i64> {
        ds.rows
            .iter()
            .map(|r| match r[0] {
                Value::Int64(v) => v,
                _ => panic!("id column must be int"),
            })
            .collect()
    }

    #[test]
    fn partitions_exactly_60_20_20() {
        let ds = dataset(100);
        let split = train_val_test_split(&ds, &SplitOptions::default()).unwrap();
        assert_eq!(split.train.row_count(), 60);
        assert_eq!(split.val.row_count(), 20);
        assert_eq!(split.test.row_count(), 20);
    }

    #[test]
    fn partition_is_exact_and_disjoint() {
        let ds = dataset(43);
        let split = train_val_test_split(&ds, &SplitOptions::default()).unwrap();

        let mut all = ids(&split.train);
        all.extend(ids(&split.val));
        all.extend(ids(&split.test));
        assert_eq!(all.len(), 43);

        all.sort_unstable();
        all.dedup();
        assert_eq!(all, (0..43).collect::<Vec<i64>>());
    }

    #[test]
    fn same_seed_gives_identical_partitions() {
        let ds = dataset(50);
        let opts = SplitOptions {
            random_state: 7,
            ..SplitOptions::default()
        };
        let a = train_val_test_split(&ds, &opts).unwrap();
        let b = train_val_test_split(&ds, &opts).unwrap();
        assert_eq!(a.train, b.train);
        assert_eq!(a.val, b.val);
        assert_eq!(a.test, b.test);
    }

    #[test]
    fn different_seeds_differ() {
        let ds = dataset(50);
        let a = train_val_test_split(
            &ds,
            &SplitOptions {
                random_state: 1,
                ..SplitOptions::default()
            },
        )
        .unwrap();
        let b = train_val_test_split(
            &ds,
            &SplitOptions {
                random_state: 2,
                ..SplitOptions::default()
            },
        )
        .unwrap();
        assert_ne!(ids(&a.train), ids(&b.train));
    }

    #[test]
    fn unshuffled_split_keeps_row_order() {
        let ds = dataset(10);
        let opts = SplitOptions {
            shuffle: false,
            ..SplitOptions::default()
        };
        let split = train_val_test_split(&ds, &opts).unwrap();
        assert_eq!(ids(&split.train), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(ids(&split.val), vec![6, 7]);
        assert_eq!(ids(&split.test), vec![8, 9]);
    }

    #[test]
    fn stratified_split_preserves_class_shares() {
        let ds = dataset(100); // 20% "rare", 80% "common"
        let opts = SplitOptions {
            stratify_column: Some("class".to_string()),
            ..SplitOptions::default()
        };
        let split = train_val_test_split(&ds, &opts).unwrap();

        for part in [&split.train, &split.val, &split.test] {
            let rare = part
                .rows
                .iter()
                .filter(|r| r[1] == Value::Utf8("rare".to_string()))
                .count();
            let share = rare as f64 / part.row_count() as f64;
            assert!(
                (share - 0.2).abs() < 0.06,
                "rare share {share} too far from 0.2 in partition of {} rows",
                part.row_count()
            );
        }
    }

    #[test]
    fn stratify_errors_on_singleton_class() {
        let schema = Schema::new(vec![Field::new("class", DataType::Utf8)]);
        let rows = vec![
            vec![Value::Utf8("a".to_string())],
            vec![Value::Utf8("a".to_string())],
            vec![Value::Utf8("a".to_string())],
            vec![Value::Utf8("a".to_string())],
            vec![Value::Utf8("lonely".to_string())],
        ];
        let ds = DataSet::new(schema, rows);
        let opts = SplitOptions {
            stratify_column: Some("class".to_string()),
            ..SplitOptions::default()
        };
        assert!(train_val_test_split(&ds, &opts).is_err());
    }

    #[test]
    fn stratify_requires_shuffle_and_existing_column() {
        let ds = dataset(20);
        let no_shuffle = SplitOptions {
            shuffle: false,
            stratify_column: Some("class".to_string()),
            ..SplitOptions::default()
        };
        assert!(train_val_test_split(&ds, &no_shuffle).is_err());

        let bad_column = SplitOptions {
            stratify_column: Some("nope".to_string()),
            ..SplitOptions::default()
        };
        assert!(train_val_test_split(&ds, &bad_column).is_err());
    }

    #[test]
    fn too_small_datasets_are_rejected() {
        assert!(train_val_test_split(&dataset(1), &SplitOptions::default()).is_err());
        assert!(train_val_test_split(&dataset(0), &SplitOptions::default()).is_err());
    }
}
