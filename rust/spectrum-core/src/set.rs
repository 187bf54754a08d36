//! Strictly decreasing integer sequences with bounded sum.

/// Which bounded sets to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetMode {
    /// Every set `{n_1 > ... > n_k}` with `n_1 + ... + n_k <= bound`.
    All,
    /// Only sets that are maximal under containment.
    Maximal,
    /// Only sets summing to exactly `bound`: partitions into distinct parts.
    Full,
}

/// Lazy iterator over bounded sets in reverse lexicographic order, starting
/// at `[bound]`. Bound 0 yields a single empty set.
#[derive(Debug, Clone)]
pub struct BoundedSets {
    bound: u32,
    mode: SetMode,
    current: Option<Vec<u32>>,
    sum: u32,
}

impl BoundedSets {
    pub fn new(bound: u32, mode: SetMode) -> Self {
        let first = if bound == 0 { Vec::new() } else { vec![bound] };
        BoundedSets {
            bound,
            mode,
            current: Some(first),
            sum: bound,
        }
    }

    pub fn bound(&self) -> u32 {
        self.bound
    }

    pub fn mode(&self) -> SetMode {
        self.mode
    }
}

impl Iterator for BoundedSets {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        let current = self.current.take()?;
        if let Some((next, sum)) = step(self.mode, &current, self.bound, self.sum) {
            self.current = Some(next);
            self.sum = sum;
        }
        Some(current)
    }
}

/// The set following `sequence` in the given mode, or `None` at the end.
///
/// `None` is also returned when `sequence` is not a strictly decreasing
/// sequence of positive parts summing to at most `bound`.
pub fn next_set(mode: SetMode, sequence: &[u32], bound: u32) -> Option<Vec<u32>> {
    let decreasing = sequence.windows(2).all(|w| w[0] > w[1]);
    if !decreasing || sequence.last() == Some(&0) {
        return None;
    }
    let sum = sequence
        .iter()
        .try_fold(0u32, |acc, &part| acc.checked_add(part))
        .filter(|&sum| sum <= bound)?;
    step(mode, sequence, bound, sum).map(|(next, _)| next)
}

fn step(mode: SetMode, sequence: &[u32], bound: u32, sum: u32) -> Option<(Vec<u32>, u32)> {
    match mode {
        SetMode::All => next_any(sequence, bound, sum),
        SetMode::Maximal => next_maximal(sequence, bound, sum),
        SetMode::Full => {
            let (mut x, mut sum) = next_maximal(sequence, bound, sum)?;
            while sum != bound {
                (x, sum) = next_maximal(&x, bound, sum)?;
            }
            Some((x, sum))
        }
    }
}

fn next_any(sequence: &[u32], bound: u32, sum: u32) -> Option<(Vec<u32>, u32)> {
    if *sequence.first()? <= 1 {
        return None;
    }
    let mut x = sequence.to_vec();
    let mut sum = sum - 1;
    match x.last_mut() {
        Some(last) if *last == 1 => {
            x.pop();
        }
        Some(last) => {
            *last -= 1;
            fill_greedy(&mut x, &mut sum, bound);
        }
        None => return None,
    }
    Some((x, sum))
}

fn next_maximal(sequence: &[u32], bound: u32, sum: u32) -> Option<(Vec<u32>, u32)> {
    if *sequence.first()? <= 1 {
        return None;
    }
    let mut x = sequence.to_vec();
    let mut sum = sum;
    // a tail [.., 3, 2, 1] cannot shrink any further
    let mut run = 1;
    while x.last() == Some(&run) {
        x.pop();
        sum -= run;
        run += 1;
    }
    // nothing left: the sequence was [k, k-1, ..., 1]
    let last = x.last_mut()?;
    *last -= 1;
    sum -= 1;
    fill_greedy(&mut x, &mut sum, bound);
    Some((x, sum))
}

/// Appends the largest admissible parts until the bound or 1 is reached.
fn fill_greedy(x: &mut Vec<u32>, sum: &mut u32, bound: u32) {
    while let Some(&last) = x.last() {
        let t = (last - 1).min(bound - *sum);
        if t == 0 {
            break;
        }
        *sum += t;
        x.push(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Partitions;
    use std::collections::BTreeSet;

    fn sets(bound: u32, mode: SetMode) -> Vec<Vec<u32>> {
        BoundedSets::new(bound, mode).collect()
    }

    fn as_set(x: &[u32]) -> BTreeSet<u32> {
        x.iter().copied().collect()
    }

    #[test]
    fn test_next_bounded_set() {
        assert_eq!(next_set(SetMode::All, &[5], 10), Some(vec![4, 3, 2, 1]));
        assert_eq!(next_set(SetMode::All, &[1], 10), None);
    }

    #[test]
    fn test_next_maximal_set() {
        assert_eq!(next_set(SetMode::Maximal, &[5, 2, 1], 10), Some(vec![4, 3, 2, 1]));
        assert_eq!(next_set(SetMode::Maximal, &[4, 3, 2, 1], 10), None);
    }

    #[test]
    fn test_next_set_rejects_invalid_sequences() {
        for mode in [SetMode::All, SetMode::Maximal, SetMode::Full] {
            assert_eq!(next_set(mode, &[5, 1, 1], 10), None);
            assert_eq!(next_set(mode, &[3, 4], 10), None);
            assert_eq!(next_set(mode, &[3, 0], 10), None);
            assert_eq!(next_set(mode, &[8, 5], 10), None);
            assert_eq!(next_set(mode, &[u32::MAX, 2], u32::MAX), None);
        }
        assert_eq!(next_set(SetMode::Maximal, &[5, 1], 10), Some(vec![4, 3, 2, 1]));
    }

    #[test]
    fn test_sets() {
        let expected: Vec<Vec<u32>> = vec![
            vec![10], vec![9, 1], vec![9], vec![8, 2], vec![8, 1], vec![8],
            vec![7, 3], vec![7, 2, 1], vec![7, 2], vec![7, 1], vec![7],
            vec![6, 4], vec![6, 3, 1], vec![6, 3], vec![6, 2, 1], vec![6, 2],
            vec![6, 1], vec![6], vec![5, 4, 1], vec![5, 4], vec![5, 3, 2],
            vec![5, 3, 1], vec![5, 3], vec![5, 2, 1], vec![5, 2], vec![5, 1],
            vec![5], vec![4, 3, 2, 1], vec![4, 3, 2], vec![4, 3, 1], vec![4, 3],
            vec![4, 2, 1], vec![4, 2], vec![4, 1], vec![4], vec![3, 2, 1],
            vec![3, 2], vec![3, 1], vec![3], vec![2, 1], vec![2], vec![1],
        ];
        assert_eq!(sets(10, SetMode::All), expected);
    }

    #[test]
    fn test_maximal_sets_are_antichain() {
        for n in 2..20 {
            let all = sets(n, SetMode::All);
            let expected: Vec<_> = all
                .iter()
                .filter(|x| {
                    let x = as_set(x);
                    !all.iter().any(|y| {
                        let y = as_set(y);
                        x.is_subset(&y) && x != y
                    })
                })
                .cloned()
                .collect();
            assert_eq!(sets(n, SetMode::Maximal), expected, "bound {}", n);
        }
    }

    #[test]
    fn test_containing_partitions() {
        for n in 2..20 {
            let maximal: Vec<_> = sets(n, SetMode::Maximal).iter().map(|x| as_set(x)).collect();
            for partition in Partitions::new(n).unwrap() {
                let parts = as_set(&partition);
                assert!(
                    maximal.iter().any(|m| parts.is_subset(m)),
                    "parts of {:?} not covered for {}",
                    partition,
                    n
                );
            }
        }
    }

    #[test]
    fn test_full_sets() {
        for n in 2..20 {
            let expected: Vec<_> = sets(n, SetMode::All)
                .into_iter()
                .filter(|x| x.iter().sum::<u32>() == n)
                .collect();
            assert_eq!(sets(n, SetMode::Full), expected, "bound {}", n);
        }
    }

    #[test]
    fn test_zero_bound() {
        for mode in [SetMode::All, SetMode::Maximal, SetMode::Full] {
            assert_eq!(sets(0, mode), vec![Vec::<u32>::new()], "{:?}", mode);
        }
    }
}
