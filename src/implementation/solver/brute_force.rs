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

//! This module provides the exhaustive enumeration of all the subsets of the
//! items. It is hopelessly slow on anything but tiny instances, but it is
//! trivially correct which makes it a good reference.

use crate::{Instance, Solution, Solver, SolverError};

/// This solver enumerates all the `2^n` subsets of the items and keeps the
/// last feasible subset (in enumeration order) having the best cost.
/// Subsets are enumerated as bitmasks: bit `i` of the mask tells whether the
/// i-th item is taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl BruteForce {
    /// The largest number of items this solver accepts to enumerate
    pub const MAX_ITEMS: usize = 63;
}

impl Solver for BruteForce {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn solve(&self, instance: &Instance) -> Result<Solution, SolverError> {
        let n = instance.nb_items();
        if n > Self::MAX_ITEMS {
            return Err(SolverError::TooLarge { items: n, max: Self::MAX_ITEMS });
        }

        let mut best_mask = 0_u64;
        let mut best_cost = 0;
        for mask in 0..(1_u64 << n) {
            // None once the weight exceeds usize::MAX
            let mut weight = Some(0_usize);
            let mut cost = 0;
            for (i, item) in instance.items.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    weight = weight.and_then(|w| w.checked_add(item.weight));
                    cost += item.cost;
                }
            }
            let fits = weight.map_or(false, |w| w <= instance.capacity);
            if fits && cost >= best_cost {
                best_mask = mask;
                best_cost = cost;
            }
        }

        let selection = (0..n).map(|i| best_mask & (1 << i) != 0).collect();
        Ok(Solution { selection, total_cost: best_cost })
    }
}

#[cfg(test)]
mod test_brute_force {
    use crate::*;

    #[test]
    fn classic_small_case() {
        let instance = Instance::from_pairs(5, &[(2, 3), (3, 4), (4, 5), (5, 6)]);
        let solution = BruteForce.solve(&instance).unwrap();
        assert_eq!(7, solution.total_cost);
        assert_eq!(vec![true, true, false, false], solution.selection);
    }
    #[test]
    fn over_capacity_items_yield_the_empty_solution() {
        let instance = Instance::from_pairs(3, &[(4, 3), (5, 4)]);
        assert_eq!(Solution::empty(2), BruteForce.solve(&instance).unwrap());
    }
    #[test]
    fn refuses_too_large_instances() {
        let instance = Instance::from_pairs(3, &[(1, 1); 64]);
        assert_eq!(Err(SolverError::TooLarge { items: 64, max: 63 }), BruteForce.solve(&instance));
    }
    #[test]
    fn huge_weights_never_overflow() {
        let instance = Instance::from_pairs(10, &[(1, 1), (usize::MAX, 100)]);
        let solution = BruteForce.solve(&instance).unwrap();
        assert_eq!(vec![true, false], solution.selection);
        assert_eq!(1, solution.total_cost);
    }
}
