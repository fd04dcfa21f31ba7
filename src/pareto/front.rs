//! Incremental non-dominated front maintenance.

use std::collections::HashSet;

use crate::models::EvaluatedRoute;

use super::dominance::{dominates, Objectives};

/// A set of mutually non-dominated candidates in insertion order.
///
/// Candidates are inserted one at a time: a candidate dominated by any
/// member is rejected; otherwise every member it dominates is removed and it
/// is appended. Candidates with identical objectives never dominate each
/// other, so duplicates are all retained.
///
/// # Examples
///
/// ```
/// use u_droneroute::models::EvaluatedRoute;
/// use u_droneroute::pareto::ParetoFront;
///
/// let mut front = ParetoFront::new();
/// assert!(front.insert(EvaluatedRoute::new(vec![0, 1, 2, 0], 10.0, 3.0, 1)));
/// assert!(front.insert(EvaluatedRoute::new(vec![0, 2, 1, 0], 12.0, 3.0, 0)));
/// // dominated by the first member
/// assert!(!front.insert(EvaluatedRoute::new(vec![0, 1, 2, 0], 11.0, 3.5, 1)));
/// assert_eq!(front.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ParetoFront<T> {
    members: Vec<T>,
}

impl<T: Objectives> ParetoFront<T> {
    /// Creates an empty front.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Offers a candidate. Returns `true` if it joined the front.
    pub fn insert(&mut self, candidate: T) -> bool {
        if self.members.iter().any(|m| dominates(m, &candidate)) {
            return false;
        }
        self.members.retain(|m| !dominates(&candidate, m));
        self.members.push(candidate);
        true
    }

    /// Current members in insertion order.
    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the front has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Consumes the front, returning its members.
    pub fn into_vec(self) -> Vec<T> {
        self.members
    }
}

impl<T: Objectives> Default for ParetoFront<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Objectives> Extend<T> for ParetoFront<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for candidate in iter {
            self.insert(candidate);
        }
    }
}

impl<T: Objectives> FromIterator<T> for ParetoFront<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut front = Self::new();
        front.extend(iter);
        front
    }
}

/// Reduces `candidates` to their non-dominated subset, inserting in input
/// order.
pub fn pareto_front<T: Objectives>(candidates: impl IntoIterator<Item = T>) -> Vec<T> {
    candidates.into_iter().collect::<ParetoFront<T>>().into_vec()
}

/// Drops routes whose node sequence already appeared, keeping the first.
///
/// A route and its reverse are different sequences and are both kept.
pub fn dedup_by_route(routes: Vec<EvaluatedRoute>) -> Vec<EvaluatedRoute> {
    let mut seen = HashSet::with_capacity(routes.len());
    routes
        .into_iter()
        .filter(|r| seen.insert(r.route.clone()))
        .collect()
}
