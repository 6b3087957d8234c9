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

//! This module provides a greedy heuristic for the knapsack problem.

use std::cmp::Ordering;

use crate::{Instance, Item, Solution, Solver, SolverError};

/// This solver considers the items by decreasing cost/weight ratio and puts
/// them in the sack until the first one which does not fit. It is fast but
/// gives no guarantee whatsoever on the quality of the solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

/// Compares the cost/weight ratio of two items without resorting to floating
/// point arithmetic. Items weighing nothing have an infinite ratio.
fn compare_ratio(a: &Item, b: &Item) -> Ordering {
    match (a.weight, b.weight) {
        (0, 0) => a.cost.cmp(&b.cost),
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        (wa, wb) => {
            let lhs = a.cost as u128 * wb as u128;
            let rhs = b.cost as u128 * wa as u128;
            lhs.cmp(&rhs)
        }
    }
}

impl Solver for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(&self, instance: &Instance) -> Result<Solution, SolverError> {
        let mut order = (0..instance.nb_items()).collect::<Vec<_>>();
        // stable: among items with the same ratio, the lowest index comes first
        order.sort_by(|a, b| compare_ratio(&instance.items[*a], &instance.items[*b]).reverse());

        let mut solution = Solution::empty(instance.nb_items());
        let mut weight = 0_usize;
        for i in order {
            let item = instance.items[i];
            match weight.checked_add(item.weight) {
                Some(total) if total <= instance.capacity => weight = total,
                _ => break,
            }
            solution.selection[i] = true;
            solution.total_cost += item.cost;
        }
        Ok(solution)
    }
}

#[cfg(test)]
mod test_greedy {
    use std::cmp::Ordering;
    use crate::*;
    use super::compare_ratio;

    #[test]
    fn ratios_are_compared_exactly() {
        assert_eq!(Ordering::Equal,   compare_ratio(&Item::new(2, 4), &Item::new(3, 6)));
        assert_eq!(Ordering::Greater, compare_ratio(&Item::new(2, 5), &Item::new(3, 6)));
        assert_eq!(Ordering::Less,    compare_ratio(&Item::new(3, 5), &Item::new(2, 6)));
        assert_eq!(Ordering::Greater, compare_ratio(&Item::new(0, 1), &Item::new(1, 100)));
    }
    #[test]
    fn takes_the_best_ratios_first() {
        let instance = Instance::from_pairs(50, &[(10, 60), (20, 100), (30, 120)]);
        let solution = Greedy.solve(&instance).unwrap();
        assert_eq!(vec![true, true, false], solution.selection);
        assert_eq!(160, solution.total_cost);
    }
    #[test]
    fn stops_at_the_first_item_that_does_not_fit() {
        // ratios: 3.0, 2.0, 1.5 -- the second item overflows, the third would fit
        let instance = Instance::from_pairs(5, &[(2, 6), (4, 8), (2, 3)]);
        let solution = Greedy.solve(&instance).unwrap();
        assert_eq!(vec![true, false, false], solution.selection);
        assert_eq!(6, solution.total_cost);
    }
    #[test]
    fn over_capacity_items_yield_the_empty_solution() {
        let instance = Instance::from_pairs(3, &[(4, 3), (5, 4)]);
        assert_eq!(Solution::empty(2), Greedy.solve(&instance).unwrap());
    }
    #[test]
    fn huge_weights_never_overflow() {
        let instance = Instance::from_pairs(10, &[(1, 1), (usize::MAX, 100)]);
        let solution = Greedy.solve(&instance).unwrap();
        assert_eq!(vec![true, false], solution.selection);
        assert_eq!(1, solution.total_cost);
    }
}
