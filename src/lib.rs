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

//! # KPSOLVE
//! KPSOLVE provides a handful of solvers for the 0/1 knapsack problem. Given
//! a sack of limited capacity and a set of items (each of which has a weight
//! and a cost), the problem consists of choosing the subset of items whose
//! total weight fits in the sack and whose total cost is maximal.
//!
//! The exact solvers are:
//! * `BranchAndBound` which explores the tree of partial selections breadth
//!   first and prunes every branch that cannot beat the best known solution.
//! * `DynamicProgramming` which builds a layered network of residual
//!   capacities (states with the same residual capacity are shared) and
//!   computes the best path through it.
//! * `BruteForce` which simply enumerates all subsets of (tiny) instances.
//!
//! The approximate solvers are:
//! * `Fptas` which runs a dynamic program over rounded costs. Its result is
//!   at most `n * (2^p - 1)` away from the optimum when the `p` low order bits
//!   of the costs are discarded.
//! * `Greedy` which takes the items by decreasing cost/weight ratio.
//!
//! ## Side benefit
//! Whole files of instances can be solved using all of your hardware thanks
//! to the `BatchSolver`.
//!
//! ## Quick Example
//! ```
//! # use kpsolve::*;
//! #
//! let instance = Instance::from_pairs(5, &[(2, 3), (3, 4), (4, 5), (5, 6)]);
//!
//! let solution = DynamicProgramming.solve(&instance).unwrap();
//! assert_eq!(7, solution.total_cost);
//! assert_eq!(vec![true, true, false, false], solution.selection);
//!
//! // The same instance, approximately solved
//! let fptas    = Fptas::new(1);
//! let solution = fptas.solve(&instance).unwrap();
//! assert!(solution.total_cost + fptas.error_bound(4) >= 7);
//! assert!(instance.is_feasible(&solution.selection));
//! ```

mod common;
mod abstraction;
mod implementation;

pub use common::*;
pub use abstraction::*;
pub use implementation::*;
