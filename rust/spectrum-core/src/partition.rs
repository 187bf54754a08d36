//! Integer partitions in reverse lexicographic order.
//!
//! Unrestricted partitions follow the ZS1 algorithm of Zoghbi and
//! Stojmenovic; fixed-length partitions use a redistribution step that keeps
//! the number of parts constant.

use crate::error::SpectrumError;

#[derive(Debug, Clone)]
enum Cursor {
    /// 1-based index of the last part greater than 1.
    Free { h: usize },
    Fixed,
}

#[derive(Debug, Clone, Default)]
struct Filters {
    min_length: Option<usize>,
    max_length: Option<usize>,
    min_part: Option<u32>,
    max_part: Option<u32>,
    min_slope: Option<u32>,
    max_slope: Option<u32>,
}

impl Filters {
    fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.min_part.is_none()
            && self.max_part.is_none()
            && self.min_slope.is_none()
            && self.max_slope.is_none()
    }

    fn accepts(&self, partition: &[u32]) -> bool {
        if self.is_empty() {
            return true;
        }
        if self.min_length.map_or(false, |min| partition.len() < min)
            || self.max_length.map_or(false, |max| partition.len() > max)
        {
            return false;
        }
        if let Some(min) = self.min_part {
            if partition.iter().any(|&x| x < min) {
                return false;
            }
        }
        if let Some(max) = self.max_part {
            if partition.iter().any(|&x| x > max) {
                return false;
            }
        }
        if self.min_slope.is_some() || self.max_slope.is_some() {
            let slopes = slope(partition);
            if let Some(min) = self.min_slope {
                if slopes.iter().any(|&s| s < min) {
                    return false;
                }
            }
            if let Some(max) = self.max_slope {
                if slopes.iter().any(|&s| s > max) {
                    return false;
                }
            }
        }
        true
    }
}

/// Lazy iterator over the partitions of `n`, from `[n]` down to `[1; n]`.
///
/// Each partition is yielded as a fresh `Vec`. Optional filters drop
/// partitions without changing the order of the rest.
#[derive(Debug, Clone)]
pub struct Partitions {
    current: Option<Vec<u32>>,
    cursor: Cursor,
    filters: Filters,
}

impl Partitions {
    /// All partitions of `n`. Zero has no partition with at least one part.
    pub fn new(n: u32) -> Result<Self, SpectrumError> {
        if n == 0 {
            return Err(SpectrumError::EmptyPartition);
        }
        Ok(Partitions {
            current: Some(vec![n]),
            cursor: Cursor::Free { h: 1 },
            filters: Filters::default(),
        })
    }

    /// Partitions of `n` into exactly `k` parts, starting at
    /// `[n - k + 1, 1, ..., 1]`. Empty when `k == 0` or `k > n`.
    pub fn with_length(n: u32, k: usize) -> Self {
        let current = if k == 0 || k > n as usize {
            None
        } else {
            let mut first = vec![1; k];
            first[0] = n - k as u32 + 1;
            Some(first)
        };
        Partitions {
            current,
            cursor: Cursor::Fixed,
            filters: Filters::default(),
        }
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.filters.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.filters.max_length = Some(length);
        self
    }

    pub fn min_part(mut self, part: u32) -> Self {
        self.filters.min_part = Some(part);
        self
    }

    pub fn max_part(mut self, part: u32) -> Self {
        self.filters.max_part = Some(part);
        self
    }

    /// Keep partitions whose [`slope`] entries are all at least `min`.
    pub fn min_slope(mut self, min: u32) -> Self {
        self.filters.min_slope = Some(min);
        self
    }

    /// Keep partitions whose [`slope`] entries are all at most `max`.
    pub fn max_slope(mut self, max: u32) -> Self {
        self.filters.max_slope = Some(max);
        self
    }

    fn advance(&mut self, partition: &[u32]) -> Option<Vec<u32>> {
        match &mut self.cursor {
            Cursor::Free { h } => next_free(partition, h),
            Cursor::Fixed => next_fixed_length(partition),
        }
    }
}

impl Iterator for Partitions {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        loop {
            let current = self.current.take()?;
            self.current = self.advance(&current);
            if self.filters.accepts(&current) {
                return Some(current);
            }
        }
    }
}

/// One ZS1 step. `h` is updated in place.
fn next_free(partition: &[u32], h: &mut usize) -> Option<Vec<u32>> {
    if partition[0] <= 1 {
        return None;
    }
    let mut x = partition.to_vec();
    if x[*h - 1] == 2 {
        x[*h - 1] = 1;
        x.push(1);
        *h -= 1;
        return Some(x);
    }

    let r = x[*h - 1] - 1;
    let mut t = (x.len() - *h + 1) as u32;
    x[*h - 1] = r;
    while t >= r {
        // r >= 2 here, so h stays within the trailing ones
        *h += 1;
        x[*h - 1] = r;
        t -= r;
    }
    if t == 0 {
        x.truncate(*h);
    } else {
        x.resize(*h + 1, 1);
        if t > 1 {
            *h += 1;
            x[*h - 1] = t;
        }
    }
    Some(x)
}

fn next_fixed_length(partition: &[u32]) -> Option<Vec<u32>> {
    let len = partition.len();
    let smallest = partition[len - 1];
    // rightmost part exceeding the smallest one by at least 2
    let pivot = (0..len - 1).rev().find(|&j| partition[j] - smallest >= 2)?;

    let mut x = partition.to_vec();
    x[pivot] -= 1;
    let mut rest: u32 = x[pivot + 1..].iter().sum::<u32>() + 1;
    for pos in pivot + 1..len {
        let remaining = (len - pos) as u32;
        x[pos] = x[pos - 1].min(rest - remaining + 1);
        rest -= x[pos];
    }
    Some(x)
}

/// Conjugate partition (transposed Ferrers diagram). Input must be
/// non-increasing.
pub fn transpose(partition: &[u32]) -> Vec<u32> {
    let mut transposed = Vec::new();
    let mut level = 0;
    loop {
        let count = partition.iter().filter(|&&x| x > level).count() as u32;
        if count == 0 {
            break;
        }
        transposed.push(count);
        level += 1;
    }
    transposed
}

/// Differences `x[i] - x[i+1]`, with the last part compared against 0.
pub fn slope(partition: &[u32]) -> Vec<u32> {
    partition
        .iter()
        .zip(partition.iter().skip(1).chain(std::iter::once(&0)))
        .map(|(&a, &b)| a - b)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partitions(n: u32) -> Vec<Vec<u32>> {
        Partitions::new(n).unwrap().collect()
    }

    #[test]
    fn test_partitions_of_ten() {
        let expected: Vec<Vec<u32>> = vec![
            vec![10], vec![9, 1], vec![8, 2], vec![8, 1, 1], vec![7, 3],
            vec![7, 2, 1], vec![7, 1, 1, 1], vec![6, 4], vec![6, 3, 1],
            vec![6, 2, 2], vec![6, 2, 1, 1], vec![6, 1, 1, 1, 1],
            vec![5, 5], vec![5, 4, 1], vec![5, 3, 2], vec![5, 3, 1, 1],
            vec![5, 2, 2, 1], vec![5, 2, 1, 1, 1], vec![5, 1, 1, 1, 1, 1],
            vec![4, 4, 2], vec![4, 4, 1, 1], vec![4, 3, 3], vec![4, 3, 2, 1],
            vec![4, 3, 1, 1, 1], vec![4, 2, 2, 2], vec![4, 2, 2, 1, 1],
            vec![4, 2, 1, 1, 1, 1], vec![4, 1, 1, 1, 1, 1, 1],
            vec![3, 3, 3, 1], vec![3, 3, 2, 2], vec![3, 3, 2, 1, 1],
            vec![3, 3, 1, 1, 1, 1], vec![3, 2, 2, 2, 1],
            vec![3, 2, 2, 1, 1, 1], vec![3, 2, 1, 1, 1, 1, 1],
            vec![3, 1, 1, 1, 1, 1, 1, 1], vec![2, 2, 2, 2, 2],
            vec![2, 2, 2, 2, 1, 1], vec![2, 2, 2, 1, 1, 1, 1],
            vec![2, 2, 1, 1, 1, 1, 1, 1], vec![2, 1, 1, 1, 1, 1, 1, 1, 1],
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ];
        assert_eq!(partitions(10), expected);
    }

    #[test]
    fn test_partition_counts() {
        let counts = [1, 2, 3, 5, 7, 11, 15, 22, 30, 42, 56, 77, 101, 135, 176];
        for (n, &count) in (1..=15).zip(counts.iter()) {
            let all = partitions(n);
            assert_eq!(all.len(), count, "p({}) mismatch", n);
            for p in &all {
                assert_eq!(p.iter().sum::<u32>(), n, "partition {:?} of {}", p, n);
                assert!(p.windows(2).all(|w| w[0] >= w[1]), "{:?} not ordered", p);
            }
            // strictly decreasing in lexicographic order
            assert!(all.windows(2).all(|w| w[0] > w[1]), "order broken for {}", n);
        }
    }

    #[test]
    fn test_zero_is_rejected() {
        assert_eq!(Partitions::new(0).unwrap_err(), SpectrumError::EmptyPartition);
        assert_eq!(partitions(1), vec![vec![1]]);
    }

    #[test]
    fn test_transpose() {
        let partition = [8, 8, 6, 5, 3, 3, 3, 1];
        let transposed = transpose(&partition);
        assert_eq!(transposed, vec![8, 7, 7, 4, 4, 3, 2, 2]);
        assert_eq!(transposed.iter().sum::<u32>(), partition.iter().sum::<u32>());
    }

    #[test]
    fn test_transpose_involution() {
        for n in 1..=12 {
            for p in partitions(n) {
                assert_eq!(transpose(&transpose(&p)), p);
            }
        }
    }

    #[test]
    fn test_slope() {
        assert_eq!(slope(&[5, 3, 3, 1]), vec![2, 0, 2, 1]);
        assert!(slope(&[]).is_empty());
    }

    #[test]
    fn test_pairs() {
        let pairs: Vec<_> = Partitions::with_length(10, 2).collect();
        assert_eq!(pairs, vec![vec![9, 1], vec![8, 2], vec![7, 3], vec![6, 4], vec![5, 5]]);
    }

    #[test]
    fn test_fixed_length_matches_filter() {
        for n in 2..10u32 {
            for k in 1..n as usize {
                let fixed: Vec<_> = Partitions::with_length(n, k).collect();
                let mut expected_first = vec![1; k];
                expected_first[0] = n - k as u32 + 1;
                assert_eq!(fixed[0], expected_first);
                let filtered: Vec<_> = partitions(n).into_iter().filter(|p| p.len() == k).collect();
                assert_eq!(fixed, filtered, "n = {}, k = {}", n, k);
            }
        }
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(Partitions::with_length(10, 11).count(), 0);
        assert_eq!(Partitions::with_length(10, 0).count(), 0);
        assert_eq!(Partitions::with_length(0, 0).count(), 0);
    }

    #[test]
    fn test_min_part() {
        let p: Vec<_> = Partitions::new(10).unwrap().min_part(3).collect();
        assert_eq!(p, vec![vec![10], vec![7, 3], vec![6, 4], vec![5, 5], vec![4, 3, 3]]);
    }

    #[test]
    fn test_max_part() {
        let p: Vec<_> = Partitions::new(10).unwrap().max_part(5).collect();
        let expected: Vec<_> = partitions(10).into_iter().filter(|x| x[0] <= 5).collect();
        assert_eq!(p, expected);
        assert_eq!(p[0], vec![5, 5]);
        assert_eq!(p.len(), 30);
    }

    #[test]
    fn test_max_length() {
        let p: Vec<_> = Partitions::new(10).unwrap().max_length(3).collect();
        let expected: Vec<Vec<u32>> = vec![
            vec![10], vec![9, 1], vec![8, 2], vec![8, 1, 1], vec![7, 3],
            vec![7, 2, 1], vec![6, 4], vec![6, 3, 1], vec![6, 2, 2], vec![5, 5],
            vec![5, 4, 1], vec![5, 3, 2], vec![4, 4, 2], vec![4, 3, 3],
        ];
        assert_eq!(p, expected);
    }

    #[test]
    fn test_min_length() {
        let p: Vec<_> = Partitions::new(10).unwrap().min_length(8).collect();
        let expected: Vec<Vec<u32>> = vec![
            vec![3, 1, 1, 1, 1, 1, 1, 1],
            vec![2, 2, 1, 1, 1, 1, 1, 1],
            vec![2, 1, 1, 1, 1, 1, 1, 1, 1],
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ];
        assert_eq!(p, expected);
    }

    #[test]
    fn test_slope_filters() {
        let p: Vec<_> = Partitions::new(10).unwrap().min_slope(2).collect();
        assert_eq!(p, vec![vec![10], vec![8, 2], vec![7, 3], vec![6, 4]]);

        let p: Vec<_> = Partitions::new(10).unwrap().max_slope(2).collect();
        assert_eq!(p[0], vec![5, 3, 2]);
        assert_eq!(p.len(), 22);
        assert!(p.iter().all(|x| slope(x).iter().all(|&s| s <= 2)));
    }
}
