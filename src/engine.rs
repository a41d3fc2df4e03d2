//! The generic depth-first backtracking engine every generator is built on.
//!
//! A generator describes its search space by implementing [`SearchProblem`]:
//!
//! - `expand(partial)` lazily lists candidate extensions, in the order they
//!   should be tried;
//! - `prune(partial, candidate)` rejects a candidate *before* a branch is
//!   built for it;
//! - `extend(partial, candidate)` builds the child partial solution as a new
//!   value (siblings never observe each other's state);
//! - `accept(partial, can_grow)` is the leaf test.
//!
//! The engine walks the tree pre-order. For every node it first looks for a
//! surviving (non-pruned) candidate, then evaluates `accept` (telling it
//! whether the node can grow any further, which the maximal-chain searches
//! need), then recurses into each surviving candidate in expansion order.
//!
//! Accepted solutions go into a [`ResultSet`], which drops any solution whose
//! canonical form was already recorded.
//!
//! # Budgets
//!
//! Several instantiations are exponential in corpus size, so every visited
//! node is charged against a [`SearchBudget`]: an optional wall-clock limit,
//! an optional node limit and an optional result cap. Running out is not an
//! error: the search stops and the results found so far are returned with a
//! [`SearchStatus`] saying why.
//!
//! # Example
//!
//! ```
//! use lexipuzzle::engine::{search, SearchLimits, SearchProblem, SearchStatus};
//!
//! /// All strictly increasing sequences over 0..4 of length 2.
//! struct Pairs;
//!
//! impl SearchProblem for Pairs {
//!     type Partial = Vec<u8>;
//!     type Candidate = u8;
//!     type Solution = Vec<u8>;
//!
//!     fn expand<'s>(&'s self, partial: &'s Vec<u8>) -> Box<dyn Iterator<Item = u8> + 's> {
//!         let start = partial.last().map_or(0, |&x| x + 1);
//!         Box::new(start..4)
//!     }
//!     fn prune(&self, partial: &Vec<u8>, _candidate: &u8) -> bool {
//!         partial.len() >= 2
//!     }
//!     fn extend(&self, partial: &Vec<u8>, candidate: u8) -> Vec<u8> {
//!         let mut next = partial.clone();
//!         next.push(candidate);
//!         next
//!     }
//!     fn accept(&self, partial: &Vec<u8>, _can_grow: bool) -> bool {
//!         partial.len() == 2
//!     }
//!     fn solution(&self, partial: &Vec<u8>) -> Vec<u8> {
//!         partial.clone()
//!     }
//! }
//!
//! let outcome = search(&Pairs, [Vec::new()], &SearchLimits::default());
//! assert_eq!(outcome.solutions.len(), 6);
//! assert_eq!(outcome.status, SearchStatus::Exhausted);
//! ```

use instant::Instant;
use log::{debug, warn};
use std::collections::HashSet;
use std::hash::Hash;
use std::time::Duration;

// How many nodes we visit between two wall-clock checks
const TIME_CHECK_INTERVAL: u64 = 256;

/// A search space explored by the engine.
pub trait SearchProblem {
    /// Partial solution owned by one search frame.
    type Partial: Clone;
    /// One possible extension of a partial solution.
    type Candidate;
    /// What an accepted partial solution is reported as.
    type Solution: Clone + Eq + Hash;

    /// Candidate extensions of `partial`, lazily and in try order. Must be finite.
    fn expand<'s>(&'s self, partial: &'s Self::Partial) -> Box<dyn Iterator<Item = Self::Candidate> + 's>;

    /// True if `candidate` can never lead to an accepted leaf from `partial`.
    fn prune(&self, _partial: &Self::Partial, _candidate: &Self::Candidate) -> bool {
        false
    }

    /// The child of `partial` with `candidate` applied, as a fresh value.
    fn extend(&self, partial: &Self::Partial, candidate: Self::Candidate) -> Self::Partial;

    /// Leaf test. `can_grow` is true if at least one candidate survived pruning.
    fn accept(&self, partial: &Self::Partial, can_grow: bool) -> bool;

    /// Materialize an accepted partial solution.
    fn solution(&self, partial: &Self::Partial) -> Self::Solution;

    /// Representation used to decide whether two solutions are the same result.
    fn canonical(&self, solution: &Self::Solution) -> Self::Solution {
        solution.clone()
    }
}

/// Caller-chosen bounds on a search. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop once this many distinct solutions were found.
    pub max_results: Option<usize>,
    /// Stop once this much wall-clock time has elapsed.
    pub time_limit: Option<Duration>,
    /// Stop after visiting this many nodes.
    pub max_steps: Option<u64>,
}

impl SearchLimits {
    #[must_use]
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = Some(n);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every branch was explored.
    Exhausted,

    /// The result cap was reached.
    FoundEnough,

    /// The time limit expired. Contains the elapsed time.
    TimedOut { elapsed: Duration },

    /// The node budget was used up.
    StepLimitReached { steps: u64 },
}

impl SearchStatus {
    /// True if the result set may be missing solutions.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        !matches!(self, SearchStatus::Exhausted)
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes (partial solutions) visited.
    pub nodes: u64,
    /// Candidates rejected by `prune`.
    pub pruned: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    FoundEnough,
    TimedOut,
    StepLimit,
}

/// Running budget shared by every `explore` call of one search.
///
/// Usage:
/// ```ignore
///  let mut budget = SearchBudget::new(&limits);
///  let mut results = ResultSet::new();
///  for root in roots {
///      explore(&problem, root, &mut budget, &mut results);
///  }
///  let outcome = budget.finish(results);
/// ```
#[derive(Debug)]
pub struct SearchBudget {
    start: Instant,
    limits: SearchLimits,
    nodes: u64,
    pruned: u64,
    halt: Option<Halt>,
}

impl SearchBudget {
    #[must_use]
    pub fn new(limits: &SearchLimits) -> Self {
        Self {
            start: Instant::now(),
            limits: *limits,
            nodes: 0,
            pruned: 0,
            halt: None,
        }
    }

    /// How long this budget has been running.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// True once any limit has been hit. Nothing is explored after that.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    /// Charge one node. Returns true if the search must stop instead.
    fn spend_node(&mut self) -> bool {
        if self.halt.is_some() {
            return true;
        }
        if self.limits.max_steps.is_some_and(|max| self.nodes >= max) {
            warn!("step budget of {} nodes used up", self.nodes);
            self.halt = Some(Halt::StepLimit);
            return true;
        }
        if self.nodes % TIME_CHECK_INTERVAL == 0
            && self.limits.time_limit.is_some_and(|limit| self.start.elapsed() >= limit)
        {
            warn!("time budget expired after {:.3}s", self.start.elapsed().as_secs_f64());
            self.halt = Some(Halt::TimedOut);
            return true;
        }
        self.nodes += 1;
        false
    }

    fn note_results(&mut self, count: usize) {
        if self.limits.max_results.is_some_and(|max| count >= max) {
            self.halt = Some(Halt::FoundEnough);
        }
    }

    /// Status as of now.
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        match self.halt {
            None => SearchStatus::Exhausted,
            Some(Halt::FoundEnough) => SearchStatus::FoundEnough,
            Some(Halt::TimedOut) => SearchStatus::TimedOut { elapsed: self.elapsed() },
            Some(Halt::StepLimit) => SearchStatus::StepLimitReached { steps: self.nodes },
        }
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats { nodes: self.nodes, pruned: self.pruned, elapsed: self.elapsed() }
    }

    /// Close the search and package what was found.
    #[must_use]
    pub fn finish<S>(self, results: ResultSet<S>) -> SearchOutcome<S> {
        SearchOutcome {
            status: self.status(),
            stats: self.stats(),
            solutions: results.into_vec(),
        }
    }
}

/// Accepted solutions in discovery order, at most one per canonical form.
#[derive(Debug, Clone)]
pub struct ResultSet<S> {
    solutions: Vec<S>,
    seen: HashSet<S>,
}

impl<S> Default for ResultSet<S> {
    fn default() -> Self {
        Self { solutions: Vec::new(), seen: HashSet::new() }
    }
}

impl<S> ResultSet<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.solutions.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<S> {
        self.solutions
    }
}

impl<S: Eq + Hash> ResultSet<S> {
    /// Record `solution` unless `canonical` was seen before. Returns true if recorded.
    pub fn insert(&mut self, canonical: S, solution: S) -> bool {
        if self.seen.insert(canonical) {
            self.solutions.push(solution);
            true
        } else {
            false
        }
    }
}

/// Result of a (possibly truncated) search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S> {
    /// Distinct accepted solutions, in discovery order.
    pub solutions: Vec<S>,
    /// Whether the search finished or why it stopped early.
    pub status: SearchStatus,
    pub stats: SearchStats,
}

impl<S> SearchOutcome<S> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Convert every solution, keeping status and stats.
    pub fn map<T, F: FnMut(S) -> T>(self, f: F) -> SearchOutcome<T> {
        SearchOutcome {
            solutions: self.solutions.into_iter().map(f).collect(),
            status: self.status,
            stats: self.stats,
        }
    }
}

impl<S> IntoIterator for SearchOutcome<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

/// Pull the next candidate that survives `prune`.
fn next_survivor<P, I>(
    problem: &P,
    partial: &P::Partial,
    candidates: &mut I,
    budget: &mut SearchBudget,
) -> Option<P::Candidate>
where
    P: SearchProblem,
    I: Iterator<Item = P::Candidate> + ?Sized,
{
    for candidate in candidates {
        if problem.prune(partial, &candidate) {
            budget.pruned += 1;
        } else {
            return Some(candidate);
        }
    }
    None
}

/// Depth-first exploration of everything reachable from `root`.
///
/// Accepted solutions are added to `results`. Returns early (leaving what was
/// found in `results`) as soon as `budget` halts.
pub fn explore<P: SearchProblem>(
    problem: &P,
    root: P::Partial,
    budget: &mut SearchBudget,
    results: &mut ResultSet<P::Solution>,
) {
    visit(problem, &root, budget, results);
}

fn visit<P: SearchProblem>(
    problem: &P,
    partial: &P::Partial,
    budget: &mut SearchBudget,
    results: &mut ResultSet<P::Solution>,
) {
    if budget.spend_node() {
        return;
    }

    let mut candidates = problem.expand(partial);
    let mut next = next_survivor(problem, partial, &mut candidates, budget);

    if problem.accept(partial, next.is_some()) {
        let solution = problem.solution(partial);
        let canonical = problem.canonical(&solution);
        if results.insert(canonical, solution) {
            budget.note_results(results.len());
            if budget.is_halted() {
                return;
            }
        }
    }

    while let Some(candidate) = next {
        let child = problem.extend(partial, candidate);
        visit(problem, &child, budget, results);
        if budget.is_halted() {
            return;
        }
        next = next_survivor(problem, partial, &mut candidates, budget);
    }
}

/// Explore every root in order under one budget.
pub fn search<P, I>(problem: &P, roots: I, limits: &SearchLimits) -> SearchOutcome<P::Solution>
where
    P: SearchProblem,
    I: IntoIterator<Item = P::Partial>,
{
    let mut budget = SearchBudget::new(limits);
    let mut results = ResultSet::new();
    for (i, root) in roots.into_iter().enumerate() {
        if budget.is_halted() {
            break;
        }
        explore(problem, root, &mut budget, &mut results);
        debug!("root #{i} done: {} results, {} nodes", results.len(), budget.nodes);
    }
    budget.finish(results)
}
