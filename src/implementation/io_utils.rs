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

//! This module provides the reading of instance files and the writing of
//! solutions.
//!
//! An instance file comprises one instance per (non blank) line. Each line
//! is made of whitespace separated integers:
//! ```plain
//! id n capacity w1 c1 w2 c2 ... wn cn
//! ```
//! where `n` is the number of items and `wi`/`ci` are the weight and cost
//! of the i-th item.
//!
//! A solution is written as one line:
//! ```plain
//! id n cost  b1 b2 ... bn
//! ```
//! where `bi` is 1 when the i-th item is taken and 0 otherwise.

use std::{fs::File, io::{BufRead, BufReader, Write}, num::ParseIntError, path::Path};

use crate::{Instance, Item, Solution};

/// The ways reading a file of instances can fail. Any of them aborts the
/// whole file; `Format` and `ItemCount` point at the offending line.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// There was an io related error
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    /// The parser expected to read something that was an integer but got some garbage
    #[error("parse int {0}")]
    ParseInt(#[from] ParseIntError),
    /// The line was not properly formatted.
    #[error("ill formed instance at line {line}")]
    Format { line: usize },
    /// The line does not declare as many items as it provides
    #[error("ill formed instance at line {line}: {expected} items declared, {found} found")]
    ItemCount { line: usize, expected: usize, found: usize },
}

/// This function is used to read all the knapsack instances of a file. It
/// returns either the instances if everything went on well or an error
/// describing the problem.
pub fn read_instances<P: AsRef<Path>>(fname: P) -> Result<Vec<Instance>, LoadError> {
    let f = File::open(fname)?;
    let f = BufReader::new(f);
    parse_instances(f)
}

/// Parses all the instances (one per non blank line) provided by the reader
pub fn parse_instances<R: BufRead>(reader: R) -> Result<Vec<Instance>, LoadError> {
    let mut instances = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        instances.push(parse_instance(line, i + 1)?);
    }
    Ok(instances)
}

/// Parses one single instance. `lineno` is only used to report errors.
fn parse_instance(line: &str, lineno: usize) -> Result<Instance, LoadError> {
    let data = line.split_whitespace()
        .map(|x| x.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()?;

    if data.len() < 3 || (data.len() - 3) % 2 != 0 {
        return Err(LoadError::Format { line: lineno });
    }

    let id       = data[0];
    let expected = data[1];
    let capacity = data[2];
    let items    = data[3..].chunks_exact(2)
        .map(|pair| Item::new(pair[0], pair[1]))
        .collect::<Vec<_>>();

    if items.len() != expected {
        return Err(LoadError::ItemCount { line: lineno, expected, found: items.len() });
    }

    Ok(Instance::new(id, capacity, items))
}

/// Formats the solution of the given instance as one line of text
pub fn format_solution(instance: &Instance, solution: &Solution) -> String {
    let mut out = format!("{} {} {} ", instance.id, instance.nb_items(), solution.total_cost);
    for taken in solution.selection.iter() {
        out.push(' ');
        out.push(if *taken { '1' } else { '0' });
    }
    out.truncate(out.trim_end().len());
    out
}

/// Writes the solution of the given instance on its own line
pub fn write_solution<W: Write>(out: &mut W, instance: &Instance, solution: &Solution) -> std::io::Result<()> {
    writeln!(out, "{}", format_solution(instance, solution))
}
