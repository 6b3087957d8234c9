// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the implementation of a breadth first branch-and-bound
//! solver for the knapsack problem.
//!
//! The search does not branch on an explicit include/exclude decision for
//! each item. Instead, every node of the search tree is a set of items whose
//! indices form a strictly increasing sequence, and the children of a node
//! are obtained by adding exactly one item located *after* the last item
//! of that node. Excluding an item is therefore implicit: it simply amounts
//! to a child which skips over it.
use std::collections::VecDeque;

use crate::{Instance, Selection, Solution, Solver, SolverError};

/// A node of the search tree: a partial selection along with the cached
/// values that are needed to expand or prune it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchNode {
    /// The items selected so far. Only the positions up to `last` are
    /// meaningful, all the subsequent ones are tentatively false.
    prefix: Selection,
    /// The index of the last item that has been included (None for the root)
    last: Option<usize>,
    /// The total cost of the items in `prefix`
    cost: usize,
    /// The total weight of the items in `prefix`
    weight: usize,
}
impl SearchNode {
    fn root(nb_items: usize) -> Self {
        SearchNode { prefix: vec![false; nb_items], last: None, cost: 0, weight: 0 }
    }
    /// The index of the first item that may still be added to this node
    fn first_free(&self) -> usize {
        self.last.map_or(0, |l| l + 1)
    }
    /// Creates the child node which additionally includes item `j`
    fn include(&self, instance: &Instance, j: usize) -> Self {
        let item = instance.items[j];
        let mut prefix = self.prefix.clone();
        prefix[j] = true;
        SearchNode {
            prefix,
            last: Some(j),
            cost: self.cost + item.cost,
            weight: self.weight + item.weight,
        }
    }
}

/// This is the structure implementing the branch-and-bound algorithm.
///
/// Nodes are explored in FIFO order (breadth first). Two rules prune the
/// search space:
///
/// * **weight bound**: a child which would exceed the capacity is never
///   enqueued;
/// * **cost bound**: a node whose cost, augmented with the cost of *all*
///   the items that may still be added to it, is less than the cost of the
///   best solution found so far is not expanded.
///
/// The incumbent is replaced whenever a node with a cost greater *or equal*
/// to the best known cost is dequeued. When several optimal solutions exist,
/// the solver hence returns the last one found in the (deterministic) FIFO
/// order.
///
/// # Example Usage
/// ```
/// # use kpsolve::*;
/// let instance = Instance::from_pairs(5, &[(2, 3), (3, 4), (4, 5), (5, 6)]);
/// let solution = BranchAndBound.solve(&instance).unwrap();
/// assert_eq!(7, solution.total_cost);
/// assert_eq!(vec![true, true, false, false], solution.selection);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound;

impl BranchAndBound {
    /// Runs the search and returns the best node that was found along with
    /// the number of nodes that have been dequeued.
    fn search(&self, instance: &Instance) -> (SearchNode, usize) {
        let n = instance.nb_items();
        let remaining = remaining_costs(instance);

        let mut queue = VecDeque::new();
        queue.push_back(SearchNode::root(n));

        let mut best = SearchNode::root(n);
        let mut explored = 0;

        while let Some(node) = queue.pop_front() {
            explored += 1;

            if node.cost >= best.cost {
                best = node.clone();
            }

            // cost bound
            let first = node.first_free();
            if node.cost + remaining[first] < best.cost {
                continue;
            }

            for j in first..n {
                // weight bound (node.weight never exceeds the capacity)
                if instance.items[j].weight <= instance.capacity - node.weight {
                    queue.push_back(node.include(instance, j));
                }
            }
        }

        (best, explored)
    }
}

impl Solver for BranchAndBound {
    fn name(&self) -> &'static str {
        "branch-and-bound"
    }

    fn solve(&self, instance: &Instance) -> Result<Solution, SolverError> {
        let (best, _explored) = self.search(instance);
        Ok(Solution { selection: best.prefix, total_cost: best.cost })
    }
}

/// Returns the table of suffix sums of the item costs: `remaining[i]` is the
/// total cost of the items `i..n`. The table has `n + 1` entries so that the
/// last one (zero) can be used for a node that already includes the last item.
fn remaining_costs(instance: &Instance) -> Vec<usize> {
    let n = instance.nb_items();
    let mut remaining = vec![0usize; n + 1];
    for i in (0..n).rev() {
        remaining[i] = remaining[i + 1].saturating_add(instance.items[i].cost);
    }
    remaining
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_branch_bound {
    use crate::*;
    use super::{remaining_costs, SearchNode};

    #[test]
    fn remaining_costs_are_suffix_sums() {
        let instance = Instance::from_pairs(5, &[(2, 3), (3, 4), (4, 5), (5, 6)]);
        assert_eq!(vec![18, 15, 11, 6, 0], remaining_costs(&instance));
    }
    #[test]
    fn include_extends_the_prefix() {
        let instance = Instance::from_pairs(5, &[(2, 3), (3, 4), (4, 5)]);
        let root  = SearchNode::root(3);
        let child = root.include(&instance, 1);
        assert_eq!(vec![false, true, false], child.prefix);
        assert_eq!(Some(1), child.last);
        assert_eq!(4, child.cost);
        assert_eq!(3, child.weight);
        assert_eq!(2, child.first_free());
        assert_eq!(0, root.first_free());
    }
    #[test]
    fn classic_small_case() {
        let instance = Instance::from_pairs(5, &[(2, 3), (3, 4), (4, 5), (5, 6)]);
        let solution = BranchAndBound.solve(&instance).unwrap();
        assert_eq!(7, solution.total_cost);
        assert_eq!(vec![true, true, false, false], solution.selection);
    }
    #[test]
    fn capacity_zero_yields_the_empty_solution() {
        let instance = Instance::from_pairs(0, &[(2, 3), (3, 4), (4, 5)]);
        assert_eq!(Solution::empty(3), BranchAndBound.solve(&instance).unwrap());
    }
    #[test]
    fn over_capacity_items_yield_the_empty_solution() {
        let instance = Instance::from_pairs(3, &[(4, 3), (5, 4), (9, 5)]);
        assert_eq!(Solution::empty(3), BranchAndBound.solve(&instance).unwrap());
    }
    #[test]
    fn single_fitting_item_is_taken() {
        let instance = Instance::from_pairs(5, &[(5, 10)]);
        let solution = BranchAndBound.solve(&instance).unwrap();
        assert_eq!(vec![true], solution.selection);
        assert_eq!(10, solution.total_cost);
    }
    #[test]
    fn no_item_at_all() {
        let instance = Instance::from_pairs(5, &[]);
        assert_eq!(Solution::empty(0), BranchAndBound.solve(&instance).unwrap());
    }
    #[test]
    fn ties_are_broken_in_favour_of_the_last_node_found() {
        // {0} and {1} both cost 5. The node {1} is dequeued after {0}.
        let instance = Instance::from_pairs(3, &[(3, 5), (3, 5)]);
        let solution = BranchAndBound.solve(&instance).unwrap();
        assert_eq!(vec![false, true], solution.selection);
        assert_eq!(5, solution.total_cost);
    }
    #[test]
    fn cost_bound_prunes_hopeless_nodes() {
        // once {0} is known (cost 100), the subtrees below {1} and {2} can
        // never reach that value and are not expanded.
        let instance = Instance::from_pairs(10, &[(1, 100), (1, 1), (1, 1), (1, 1)]);
        let (best, explored) = BranchAndBound.search(&instance);
        assert_eq!(103, best.cost);
        // a full enumeration would dequeue the 16 subsets
        assert!(explored < 16);
    }
    #[test]
    fn maximizes_yields_the_optimum() {
        let instance = Instance::from_pairs(50, &[(10, 60), (45, 210), (20, 12), (4, 5), (20, 100), (30, 120), (50, 110)]);
        let solution = BranchAndBound.solve(&instance).unwrap();
        assert_eq!(220, solution.total_cost);
        assert!(solution.is_consistent_with(&instance));
    }
    #[test]
    fn huge_weights_never_overflow() {
        let instance = Instance::from_pairs(10, &[(1, 1), (usize::MAX, 100)]);
        let solution = BranchAndBound.solve(&instance).unwrap();
        assert_eq!(vec![true, false], solution.selection);
        assert_eq!(1, solution.total_cost);
        assert!(instance.is_feasible(&solution.selection));
    }
}
