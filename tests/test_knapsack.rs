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

//! This module is meant to test the correctness of the knapsack solvers on
//! complete instance files and on randomly generated instances.

use std::{collections::HashMap, fs, io::Write, path::PathBuf};

use kpsolve::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn locate(id: &str) -> PathBuf {
    PathBuf::new()
        .join(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/knapsack/")
        .join(id)
}

fn instances(id: &str) -> Vec<Instance> {
    read_instances(locate(&format!("{id}.inst"))).expect("cannot read instances")
}

/// Reads the known optimum of each instance of the file (one `id cost` pair per line)
fn optima(id: &str) -> HashMap<usize, usize> {
    let text = fs::read_to_string(locate(&format!("{id}.opt"))).expect("cannot read optima");
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            let mut tokens = l.split_whitespace().map(|t| t.parse::<usize>().unwrap());
            (tokens.next().unwrap(), tokens.next().unwrap())
        })
        .collect()
}

/// Solves all the instances of the file and checks them against the known optima
fn check_exact<S: Solver + Sync + ?Sized>(solver: &S, id: &str) {
    let instances = instances(id);
    let optima = optima(id);
    let outcomes = BatchSolver::new(solver).solve_all(&instances);

    assert_eq!(optima.len(), instances.len());
    for (instance, outcome) in instances.iter().zip(outcomes) {
        let solution = outcome.unwrap();
        assert!(solution.is_consistent_with(instance), "instance {}", instance.id);
        assert_eq!(optima[&instance.id], solution.total_cost, "instance {}", instance.id);
    }
}

/// Generates a random instance. Zero weights and costs are purposedly allowed.
fn random_instance(rng: &mut StdRng, id: usize, max_items: usize) -> Instance {
    let n = rng.gen_range(0..=max_items);
    let items = (0..n)
        .map(|_| Item::new(rng.gen_range(0..=30), rng.gen_range(0..=100)))
        .collect::<Vec<_>>();
    let total = items.iter().map(|i| i.weight).sum::<usize>();
    let capacity = rng.gen_range(0..=total.max(1));
    Instance::new(id, capacity, items)
}

// ----------------------------------------------------------------------------
// --- INSTANCE FILES ---------------------------------------------------------
// ----------------------------------------------------------------------------
#[test]
fn small_instances_with_dynamic_programming() {
    check_exact(&DynamicProgramming, "small");
}
#[test]
fn small_instances_with_branch_and_bound() {
    check_exact(&BranchAndBound, "small");
}
#[test]
fn small_instances_with_brute_force() {
    check_exact(&BruteForce, "small");
}
#[test]
fn small_instances_with_exact_fptas() {
    check_exact(&Fptas::new(0), "small");
}
#[test]
fn correlated_instances_with_dynamic_programming() {
    check_exact(&DynamicProgramming, "correlated");
}
#[test]
fn correlated_instances_with_exact_fptas() {
    check_exact(&Fptas::new(0), "correlated");
}
#[test]
fn correlated_instances_with_approximate_fptas() {
    for precision in 1..=4 {
        let fptas = Fptas::new(precision);
        let instances = instances("correlated");
        let optima = optima("correlated");
        for instance in instances.iter() {
            let solution = fptas.solve(instance).unwrap();
            let opt = optima[&instance.id];
            assert!(solution.is_consistent_with(instance));
            assert!(solution.total_cost <= opt);
            assert!(solution.total_cost + fptas.error_bound(instance.nb_items()) >= opt,
                "instance {} precision {}", instance.id, precision);
        }
    }
}
#[test]
fn greedy_is_feasible_but_not_better_than_the_optimum() {
    let instances = instances("small");
    let optima = optima("small");
    for instance in instances.iter() {
        let solution = Greedy.solve(instance).unwrap();
        assert!(solution.is_consistent_with(instance));
        assert!(solution.total_cost <= optima[&instance.id]);
    }
}
#[test]
fn configured_solvers_agree_on_a_copied_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(fs::read_to_string(locate("small.inst")).unwrap().as_bytes()).unwrap();
    file.flush().unwrap();

    let instances = read_instances(file.path()).unwrap();
    assert_eq!(self::instances("small"), instances);

    let optima = optima("small");
    for algorithm in [Algorithm::BranchBound, Algorithm::Dynamic, Algorithm::Fptas, Algorithm::BruteForce] {
        let config = ConfigBuilder::default().algorithm(algorithm).threads(3).build().unwrap();
        let solver = config.solver();
        let outcomes = BatchSolver::new(solver.as_ref())
            .with_nb_threads(config.threads)
            .solve_all(&instances);
        for (instance, outcome) in instances.iter().zip(outcomes) {
            assert_eq!(optima[&instance.id], outcome.unwrap().total_cost);
        }
    }
}
#[test]
fn printed_solutions_can_be_checked_against_their_instance() {
    let instances = instances("small");
    let mut out = vec![];
    for instance in instances.iter() {
        let solution = DynamicProgramming.solve(instance).unwrap();
        write_solution(&mut out, instance, &solution).unwrap();
    }
    let text = String::from_utf8(out).unwrap();
    let optima = optima("small");

    for (instance, line) in instances.iter().zip(text.lines()) {
        let (head, bits) = line.split_once("  ").unwrap();
        let head = head.split_whitespace().map(|t| t.parse::<usize>().unwrap()).collect::<Vec<_>>();
        let selection = bits.split_whitespace().map(|t| t == "1").collect::<Vec<_>>();

        assert_eq!(vec![instance.id, instance.nb_items(), optima[&instance.id]], head);
        assert!(instance.is_feasible(&selection));
        assert_eq!(optima[&instance.id], instance.cost_of(&selection));
    }
}

// ----------------------------------------------------------------------------
// --- CORNER CASES -----------------------------------------------------------
// ----------------------------------------------------------------------------
fn all_solvers() -> Vec<Box<dyn Solver + Send + Sync>> {
    vec![
        Box::new(BranchAndBound),
        Box::new(DynamicProgramming),
        Box::new(Fptas::new(0)),
        Box::new(Fptas::new(2)),
        Box::new(BruteForce),
        Box::new(Greedy),
    ]
}
#[test]
fn a_null_capacity_yields_the_empty_selection() {
    let instance = Instance::from_pairs(0, &[(1, 5), (2, 7)]);
    for solver in all_solvers() {
        let solution = solver.solve(&instance).unwrap();
        assert_eq!(Solution::empty(2), solution, "{}", solver.name());
    }
}
#[test]
fn a_single_fitting_item_is_taken() {
    let instance = Instance::from_pairs(5, &[(5, 10)]);
    for solver in all_solvers() {
        let solution = solver.solve(&instance).unwrap();
        assert_eq!(vec![true], solution.selection, "{}", solver.name());
        assert_eq!(10, solution.total_cost, "{}", solver.name());
    }
}
#[test]
fn items_heavier_than_the_sack_are_never_taken() {
    let instance = Instance::from_pairs(10, &[(11, 100), (12, 200)]);
    for solver in all_solvers() {
        let solution = solver.solve(&instance).unwrap();
        assert_eq!(Solution::empty(2), solution, "{}", solver.name());
    }
}
#[test]
fn the_classic_instance_is_solved_by_the_exact_solvers() {
    let instance = Instance::from_pairs(5, &[(2, 3), (3, 4), (4, 5), (5, 6)]);
    for solver in [&BranchAndBound as &dyn Solver, &DynamicProgramming, &Fptas::new(0), &BruteForce] {
        let solution = solver.solve(&instance).unwrap();
        assert_eq!(vec![true, true, false, false], solution.selection, "{}", solver.name());
        assert_eq!(7, solution.total_cost, "{}", solver.name());
    }
}
#[test]
fn an_empty_instance_has_an_empty_solution() {
    let instance = Instance::from_pairs(10, &[]);
    for solver in all_solvers() {
        assert_eq!(Solution::empty(0), solver.solve(&instance).unwrap(), "{}", solver.name());
    }
}

// ----------------------------------------------------------------------------
// --- RANDOM INSTANCES -------------------------------------------------------
// ----------------------------------------------------------------------------
#[test]
fn exact_solvers_match_the_brute_force() {
    let mut rng = StdRng::seed_from_u64(20200);
    for id in 0..300 {
        let instance = random_instance(&mut rng, id, 12);
        let expected = BruteForce.solve(&instance).unwrap().total_cost;

        for solver in [&BranchAndBound as &dyn Solver, &DynamicProgramming, &Fptas::new(0)] {
            let solution = solver.solve(&instance).unwrap();
            assert!(solution.is_consistent_with(&instance), "{} on {:?}", solver.name(), instance);
            assert_eq!(expected, solution.total_cost, "{} on {:?}", solver.name(), instance);
        }
    }
}
#[test]
fn fptas_stays_within_its_error_bound() {
    let mut rng = StdRng::seed_from_u64(42);
    for id in 0..300 {
        let instance = random_instance(&mut rng, id, 12);
        let optimum = DynamicProgramming.solve(&instance).unwrap().total_cost;

        for precision in 0..=6 {
            let fptas = Fptas::new(precision);
            let solution = fptas.solve(&instance).unwrap();
            assert!(solution.is_consistent_with(&instance), "p={} on {:?}", precision, instance);
            assert!(solution.total_cost <= optimum);
            assert!(solution.total_cost + fptas.error_bound(instance.nb_items()) >= optimum,
                "p={} on {:?}", precision, instance);
        }
    }
}
#[test]
fn every_solver_is_feasible_and_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let instances = (0..100).map(|id| random_instance(&mut rng, id, 12)).collect::<Vec<_>>();
    for solver in all_solvers() {
        let first = BatchSolver::new(solver.as_ref()).with_nb_threads(4).solve_all(&instances);
        let again = BatchSolver::new(solver.as_ref()).with_nb_threads(1).solve_all(&instances);
        assert_eq!(first, again, "{}", solver.name());

        for (instance, outcome) in instances.iter().zip(first) {
            let solution = outcome.unwrap();
            assert!(solution.is_consistent_with(instance), "{} on {:?}", solver.name(), instance);
        }
    }
}
