use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Original serial -> remapped serial for one run.
///
/// The distinct serials are sorted ascending, the sorted list is reversed,
/// and `base` is added to each reversed value: `M[U[i]] = base + U[n-1-i]`.
/// Files that shared a serial keep sharing one, and the result does not
/// depend on the order serials were observed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialRemapTable {
    pub base: i64,
    pub original: Vec<u64>,
    pub reversed: Vec<u64>,
    mapping: BTreeMap<u64, i128>,
}

impl SerialRemapTable {
    pub fn build<I>(serials: I, base: i64) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let original: Vec<u64> = serials
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let reversed: Vec<u64> = original.iter().rev().copied().collect();

        let mapping = original
            .iter()
            .zip(&reversed)
            .map(|(&from, &to)| (from, i128::from(base) + i128::from(to)))
            .collect();

        Self {
            base,
            original,
            reversed,
            mapping,
        }
    }

    pub fn get(&self, serial: u64) -> Option<i128> {
        self.mapping.get(&serial).copied()
    }

    /// Remapped values listed in the order of `original`
    pub fn final_serials(&self) -> Vec<i128> {
        self.original.iter().map(|s| self.mapping[s]).collect()
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reverses_distinct_serials() {
        let table = SerialRemapTable::build([3, 1, 1, 3], 0);
        assert_eq!(table.original, vec![1, 3]);
        assert_eq!(table.reversed, vec![3, 1]);
        assert_eq!(table.get(1), Some(3));
        assert_eq!(table.get(3), Some(1));
        assert_eq!(table.final_serials(), vec![3, 1]);
    }

    #[test]
    fn test_single_serial_only_offsets() {
        let table = SerialRemapTable::build([7, 7, 7], 10);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(7), Some(17));
    }

    #[test]
    fn test_negative_base() {
        let table = SerialRemapTable::build([1, 2, 5], -10);
        assert_eq!(table.final_serials(), vec![-5, -8, -9]);
    }

    #[test]
    fn test_gaps_are_preserved_in_reverse() {
        let table = SerialRemapTable::build([2, 10, 4], 0);
        assert_eq!(table.get(2), Some(10));
        assert_eq!(table.get(4), Some(4));
        assert_eq!(table.get(10), Some(2));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let table = SerialRemapTable::build([0, u64::MAX], i64::MAX);
        assert_eq!(
            table.get(0),
            Some(i128::from(i64::MAX) + i128::from(u64::MAX))
        );
        assert_eq!(table.get(u64::MAX), Some(i128::from(i64::MAX)));
    }

    #[test]
    fn test_empty_input() {
        let table = SerialRemapTable::build(std::iter::empty(), 5);
        assert!(table.is_empty());
        assert!(table.final_serials().is_empty());
    }

    proptest! {
        #[test]
        fn prop_reversal_symmetry(
            serials in proptest::collection::vec(0u64..10_000, 1..40),
            base in -1_000i64..1_000,
        ) {
            let table = SerialRemapTable::build(serials, base);
            let u = &table.original;
            let n = u.len();
            for i in 0..n {
                let lhs = table.get(u[i]).unwrap() + table.get(u[n - 1 - i]).unwrap();
                let rhs = 2 * i128::from(base) + i128::from(u[i]) + i128::from(u[n - 1 - i]);
                prop_assert_eq!(lhs, rhs);
            }
        }

        #[test]
        fn prop_mapping_is_bijection_onto_shifted_set(
            serials in proptest::collection::vec(0u64..10_000, 1..40),
            base in -1_000i64..1_000,
        ) {
            let table = SerialRemapTable::build(serials, base);
            let image: BTreeSet<i128> = table.final_serials().into_iter().collect();
            let expected: BTreeSet<i128> = table
                .original
                .iter()
                .map(|&s| i128::from(base) + i128::from(s))
                .collect();
            prop_assert_eq!(image.len(), table.len());
            prop_assert_eq!(image, expected);
        }

        #[test]
        fn prop_independent_of_input_order(
            mut serials in proptest::collection::vec(0u64..500, 1..30),
            base in -50i64..50,
        ) {
            let forward = SerialRemapTable::build(serials.clone(), base);
            serials.reverse();
            let backward = SerialRemapTable::build(serials, base);
            prop_assert_eq!(forward, backward);
        }
    }
}
