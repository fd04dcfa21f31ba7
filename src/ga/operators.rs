//! Variation and selection operators on permutations.
//!
//! - [`order_crossover`] — OX with uniformly drawn cut points
//! - [`tournament`] — Pareto binary tournament
//!
//! Swap mutation comes from [`u_metaheur::ga::operators`].
//!
//! # Reference
//!
//! Davis, L. (1985). "Applying adaptive algorithms to epistatic domains",
//! *IJCAI* 85, 162-164.

use std::collections::HashSet;

use rand::Rng;

use crate::pareto::{dominates, Objectives};

/// Order crossover with explicit cut points `l ≤ r < len`.
///
/// The child keeps `p1[l..=r]` in place. The remaining genes are read from
/// `p2` starting right after `r` and wrapping around, skipping genes already
/// present, and written into the child from position `r + 1` onward, also
/// wrapping.
///
/// # Examples
///
/// ```
/// use u_droneroute::ga::order_crossover_at;
///
/// let p1 = [1, 2, 3, 4, 5, 6, 7, 8];
/// let p2 = [8, 7, 6, 5, 4, 3, 2, 1];
/// let child = order_crossover_at(&p1, &p2, 2, 4);
/// assert_eq!(child, vec![7, 6, 3, 4, 5, 2, 1, 8]);
/// ```
pub fn order_crossover_at(p1: &[usize], p2: &[usize], l: usize, r: usize) -> Vec<usize> {
    let n = p1.len();
    debug_assert!(l <= r && r < n, "cut points out of range");

    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut placed = HashSet::with_capacity(n);
    for i in l..=r {
        child[i] = Some(p1[i]);
        placed.insert(p1[i]);
    }

    let mut idx = (r + 1) % n;
    for i in 0..p2.len() {
        let gene = p2[(r + 1 + i) % p2.len()];
        if placed.insert(gene) {
            child[idx] = Some(gene);
            idx = (idx + 1) % n;
        }
    }

    child.into_iter().flatten().collect()
}

/// Order crossover with cut points drawn uniformly from `0..len`.
///
/// Empty parents give an empty child.
pub fn order_crossover<R: Rng>(p1: &[usize], p2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = p1.len();
    if n == 0 {
        return Vec::new();
    }
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    order_crossover_at(p1, p2, a.min(b), a.max(b))
}

/// Binary tournament under Pareto dominance.
///
/// Draws two members uniformly (with replacement). A dominating member wins;
/// otherwise a fair coin decides. Returns `None` for an empty population.
pub fn tournament<'a, T, R>(population: &'a [T], rng: &mut R) -> Option<&'a T>
where
    T: Objectives,
    R: Rng,
{
    if population.is_empty() {
        return None;
    }
    let a = &population[rng.random_range(0..population.len())];
    let b = &population[rng.random_range(0..population.len())];
    if dominates(a, b) {
        Some(a)
    } else if dominates(b, a) {
        Some(b)
    } else if rng.random_bool(0.5) {
        Some(a)
    } else {
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EvaluatedRoute;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_permutation_of(child: &[usize], parent: &[usize]) -> bool {
        let mut a = child.to_vec();
        let mut b = parent.to_vec();
        a.sort();
        b.sort();
        a == b
    }

    #[test]
    fn test_ox_fixed_cuts() {
        let p1 = [1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = [8, 7, 6, 5, 4, 3, 2, 1];
        assert_eq!(
            order_crossover_at(&p1, &p2, 2, 4),
            vec![7, 6, 3, 4, 5, 2, 1, 8]
        );
    }

    #[test]
    fn test_ox_full_slice_copies_p1() {
        let p1 = [3, 1, 2];
        let p2 = [1, 2, 3];
        assert_eq!(order_crossover_at(&p1, &p2, 0, 2), vec![3, 1, 2]);
    }

    #[test]
    fn test_ox_single_gene_slice() {
        // keep p1[0] = 4, then p2 from index 1: 1, 2, 3 (4 skipped)
        let p1 = [4, 3, 2, 1];
        let p2 = [4, 1, 2, 3];
        assert_eq!(order_crossover_at(&p1, &p2, 0, 0), vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_ox_wraps_at_end() {
        // slice at the tail; filling starts at position 0
        let p1 = [1, 2, 3, 4];
        let p2 = [4, 3, 2, 1];
        // keep [.., .., .., 4]; p2 from index 0: 4 skip, 3, 2, 1
        assert_eq!(order_crossover_at(&p1, &p2, 3, 3), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_ox_random_is_permutation() {
        let p1 = [5, 1, 4, 2, 3, 6];
        let p2 = [2, 6, 1, 3, 5, 4];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let child = order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation_of(&child, &p1));
        }
    }

    #[test]
    fn test_ox_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(order_crossover(&[], &[], &mut rng).is_empty());
    }

    #[test]
    fn test_tournament_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let pop: Vec<EvaluatedRoute> = vec![];
        assert!(tournament(&pop, &mut rng).is_none());
    }

    #[test]
    fn test_tournament_single() {
        let mut rng = StdRng::seed_from_u64(0);
        let pop = vec![EvaluatedRoute::new(vec![0, 1, 0], 2.0, 1.0, 0)];
        let winner = tournament(&pop, &mut rng).expect("winner");
        assert_eq!(winner.route, vec![0, 1, 0]);
    }

    #[test]
    fn test_tournament_favors_dominant() {
        let strong = EvaluatedRoute::new(vec![0, 1, 2, 0], 1.0, 1.0, 0);
        let weak = EvaluatedRoute::new(vec![0, 2, 1, 0], 2.0, 2.0, 1);
        let pop = vec![strong, weak];
        let mut rng = StdRng::seed_from_u64(5);
        let wins = (0..1000)
            .filter_map(|_| tournament(&pop, &mut rng))
            .filter(|w| w.total_distance == 1.0)
            .count();
        // the weak one only wins when drawn twice: about 1 in 4
        assert!(wins > 650, "strong won {wins} of 1000");
    }
}
