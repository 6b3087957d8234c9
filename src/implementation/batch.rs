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

//! This module provides the parallel resolution of a batch of instances.
//! Each instance is solved by one single thread, independently of all the
//! others: the only piece of state shared among the workers is the index of
//! the next instance to solve and the slots where the outcomes are stored.
use parking_lot::Mutex;

use crate::{Instance, Solution, Solver, SolverError};

/// The outcome of the resolution of one instance
pub type Outcome = Result<Solution, SolverError>;

/// The shared data that may only be manipulated within critical sections
struct Critical {
    /// The index of the next instance that must be picked up by a worker
    next: usize,
    /// The outcome of each instance (None until it has been solved)
    outcomes: Vec<Option<Outcome>>,
}

/// The workload a thread can get from the shared state
enum WorkLoad {
    /// There is no work left to be done: you can safely terminate
    Complete,
    /// The index of the instance to solve
    WorkItem { index: usize },
}

/// This is the structure implementing a batch solver: it solves a slice of
/// instances using as many threads as requested (by default, as many as
/// the number of hardware threads available on the machine) and returns
/// the outcomes in the order of the instances.
///
/// # Example Usage
/// ```
/// # use kpsolve::*;
/// let instances = vec![
///     Instance::from_pairs(5,  &[(2, 3), (3, 4), (4, 5), (5, 6)]),
///     Instance::from_pairs(50, &[(10, 60), (20, 100), (30, 120)]),
/// ];
/// let outcomes = BatchSolver::new(&DynamicProgramming)
///     .with_nb_threads(2)
///     .solve_all(&instances);
///
/// let costs = outcomes.into_iter()
///     .map(|o| o.map(|s| s.total_cost))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(vec![7, 220], costs);
/// ```
pub struct BatchSolver<'a, S: Solver + Sync + ?Sized> {
    /// The solver used for each instance of the batch
    solver: &'a S,
    /// This is a configuration parameter that tunes the number of threads that
    /// will be spawned to solve the batch. By default, this number amounts
    /// to the number of hardware threads available on the machine.
    nb_threads: usize,
}

impl<'a, S: Solver + Sync + ?Sized> BatchSolver<'a, S> {
    pub fn new(solver: &'a S) -> Self {
        Self::custom(solver, num_cpus::get())
    }

    pub fn custom(solver: &'a S, nb_threads: usize) -> Self {
        BatchSolver { solver, nb_threads: nb_threads.max(1) }
    }

    /// Sets the number of threads used by the solver
    pub fn with_nb_threads(mut self, nb_threads: usize) -> Self {
        self.nb_threads = nb_threads.max(1);
        self
    }

    /// Solves all the given instances and returns one outcome per instance
    /// (in the same order as the instances).
    pub fn solve_all(&self, instances: &[Instance]) -> Vec<Outcome> {
        let shared = Mutex::new(Critical {
            next: 0,
            outcomes: (0..instances.len()).map(|_| None).collect(),
        });
        let nb_threads = self.nb_threads.min(instances.len()).max(1);

        std::thread::scope(|s| {
            for _ in 0..nb_threads {
                let shared = &shared;
                let solver = self.solver;
                s.spawn(move || {
                    while let WorkLoad::WorkItem { index } = Self::get_workload(shared, instances.len()) {
                        let outcome = solver.solve(&instances[index]);
                        shared.lock().outcomes[index] = Some(outcome);
                    }
                });
            }
        });

        // every slot has been filled when all workers are done
        shared.into_inner().outcomes.into_iter().flatten().collect()
    }

    /// Consults the shared state to fetch a workload.
    fn get_workload(shared: &Mutex<Critical>, nb_instances: usize) -> WorkLoad {
        let mut critical = shared.lock();
        if critical.next >= nb_instances {
            WorkLoad::Complete
        } else {
            let index = critical.next;
            critical.next += 1;
            WorkLoad::WorkItem { index }
        }
    }
}
