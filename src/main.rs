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

//! This is the command line front end of the knapsack solvers. It reads a
//! file of instances, solves all of them with the selected algorithm and
//! prints one solution per line on the standard output.
use std::{io::{BufWriter, Write}, process::ExitCode, time::Instant};

use anyhow::Context;
use clap::Parser;
use kpsolve::*;

/// This structure uses `clap-derive` annotations and define the arguments that can
/// be passed on to the executable solver.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the file of instances to solve
    fname: String,
    /// The algorithm used to solve each instance
    #[clap(short, long, value_enum, default_value = "dynamic")]
    algorithm: Algorithm,
    /// The number of low order bits of the costs discarded by the fptas
    #[clap(short, long, default_value = "0")]
    precision: u32,
    /// The number of threads solving instances concurrently. By default, it uses
    /// as many threads as there are hardware threads on the machine.
    #[clap(short, long)]
    threads: Option<usize>,
    /// Print a summary of the resolution on the standard error
    #[clap(short, long)]
    verbose: bool,
    /// Verify that every solution is feasible and reports the cost of its selection
    #[clap(long)]
    check: bool,
}

/// This is your executable's entry point. It is the place where all the pieces are put together
/// to create a solver for the knapsack instances of a file.
fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut builder = ConfigBuilder::default();
    builder.algorithm(args.algorithm).precision(args.precision);
    if let Some(threads) = args.threads {
        builder.threads(threads);
    }
    let config = builder.build()?;

    let instances = read_instances(&args.fname)
        .with_context(|| format!("cannot read instances from {}", args.fname))?;

    let solver = config.solver();
    let start = Instant::now();
    let outcomes = BatchSolver::new(solver.as_ref())
        .with_nb_threads(config.threads)
        .solve_all(&instances);
    let duration = start.elapsed();

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failures = 0;
    let mut violations = 0;
    let mut total_cost = 0;
    for (instance, outcome) in instances.iter().zip(outcomes) {
        match outcome {
            Ok(solution) => {
                if args.check && !solution.is_consistent_with(instance) {
                    eprintln!("instance {}: invalid solution", instance.id);
                    violations += 1;
                }
                total_cost += solution.total_cost;
                write_solution(&mut out, instance, &solution)?;
            }
            Err(e) => {
                eprintln!("instance {}: {}", instance.id, e);
                failures += 1;
            }
        }
    }
    out.flush()?;

    if args.verbose {
        eprintln!("Algorithm:  {}",            solver.name());
        eprintln!("Precision:  {}",            config.precision);
        eprintln!("Threads:    {}",            config.threads);
        eprintln!("Instances:  {}",            instances.len());
        eprintln!("Failures:   {}",            failures);
        eprintln!("Total cost: {}",            total_cost);
        eprintln!("Duration:   {:.3} seconds", duration.as_secs_f32());
        if args.check {
            eprintln!("Violations: {}",        violations);
        }
    }

    if failures > 0 || violations > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
