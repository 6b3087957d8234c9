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

//! This module defines the `Solver` trait.

use crate::{Instance, Solution, SolverError};

/// This is the solver abstraction. It is implemented by every structure that
/// is able to pick a subset of the items of a knapsack instance which fits
/// in the sack. Depending on the implementation, the returned solution is
/// either proved optimal (branch-and-bound, dynamic programming, brute force)
/// or an approximation (fptas, greedy).
///
/// # Note:
/// A solver never keeps any state between two calls to `solve`. Solving the
/// same instance twice with the same solver yields the very same solution.
/// This is also why `solve` only takes a shared reference to the solver: the
/// same solver can be used to solve many instances in parallel.
pub trait Solver {
    /// A short human readable name for the algorithm
    fn name(&self) -> &'static str;
    /// Solves the given instance. The returned solution always comprises one
    /// flag per item of the instance and its `total_cost` is always the sum
    /// of the (actual) costs of the selected items.
    ///
    /// An instance for which no item fits in the sack is not an error: the
    /// solver simply returns the empty solution.
    fn solve(&self, instance: &Instance) -> Result<Solution, SolverError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn solve(&self, instance: &Instance) -> Result<Solution, SolverError> {
        (**self).solve(instance)
    }
}
impl<S: Solver + ?Sized> Solver for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn solve(&self, instance: &Instance) -> Result<Solution, SolverError> {
        (**self).solve(instance)
    }
}
