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

//! This module provides the configuration of a knapsack resolution: which
//! algorithm is to be used, with which parameters and using how many threads.

use derive_builder::Builder;

use crate::{BranchAndBound, BruteForce, DynamicProgramming, Fptas, Greedy, Solver};

/// The algorithms that can be used to solve a knapsack instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Breadth first branch-and-bound (exact)
    BranchBound,
    /// Dynamic programming over the network of residual capacities (exact)
    #[default]
    Dynamic,
    /// Approximation scheme with rounded costs (see `precision`)
    Fptas,
    /// Enumeration of all subsets (exact, tiny instances only)
    BruteForce,
    /// Cost/weight ratio heuristic
    Greedy,
}

/// This is how you configure a resolution e.g. if you want to use the fptas
/// with a given precision on four threads.
///
/// # Example Usage
/// ```
/// # use kpsolve::*;
/// let config = ConfigBuilder::default()
///     .algorithm(Algorithm::Fptas)
///     .precision(3)
///     .threads(4)
///     .build()
///     .unwrap();
/// assert_eq!("fptas", config.solver().name());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct Config {
    /// The algorithm to use (dynamic programming by default)
    #[builder(default)]
    pub algorithm: Algorithm,
    /// The number of low order bits discarded from the item costs. This is
    /// only relevant to the fptas (defaults to zero).
    #[builder(default="0")]
    pub precision: u32,
    /// The number of instances that are solved concurrently. Defaults to the
    /// number of hardware threads available on the machine.
    #[builder(default="num_cpus::get()")]
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            algorithm: Algorithm::default(),
            precision: 0,
            threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Instanciates the configured solver
    pub fn solver(&self) -> Box<dyn Solver + Send + Sync> {
        match self.algorithm {
            Algorithm::BranchBound => Box::new(BranchAndBound),
            Algorithm::Dynamic     => Box::new(DynamicProgramming),
            Algorithm::Fptas       => Box::new(Fptas::new(self.precision)),
            Algorithm::BruteForce  => Box::new(BruteForce),
            Algorithm::Greedy      => Box::new(Greedy),
        }
    }
}
