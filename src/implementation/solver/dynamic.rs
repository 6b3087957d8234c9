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

//! This module provides an exact dynamic programming solver for the knapsack
//! problem. Rather than filling a dense `capacity x items` table, it unrolls
//! an explicit layered network whose nodes (cells) only stand for the residual
//! capacities that are actually reachable. This network is then solved by
//! backward induction and the optimal selection is recovered by following the
//! transitions that were chosen along the way.
//!
//! All the cells of one layer live in a vector owned by that layer; the
//! transitions are mere indices in the vector of the next layer.
use fxhash::FxHashMap;

use crate::{Instance, Selection, Solution, Solver, SolverError};

/// The identifier of a cell: it indicates the position of that cell in the
/// `cells` vector of the layer it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellId(usize);

/// The two possible decisions about an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Transition {
    /// Leave the item out of the sack
    Exclude,
    /// Put the item in the sack
    Include,
}

/// Represents one reachable state of the network: the capacity which is still
/// available when the decision about the item of its layer must be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    /// The capacity which has not been consumed yet
    residual: usize,
    /// The best cost achievable from this cell until the end of the network
    ///
    /// ### Note
    /// This field is only ever populated after the network has been solved.
    best_cost: usize,
    /// The weight of the items taken on the best path from this cell on
    best_weight: usize,
    /// The transition leading to `best_cost`
    chosen: Transition,
    /// Target of the exclude transition (in the next layer). Only the cells
    /// of the terminal layer have none.
    exclude: Option<CellId>,
    /// Target of the include transition (in the next layer), if the item fits
    include: Option<CellId>,
}
impl Cell {
    fn new(residual: usize) -> Self {
        Cell {
            residual,
            best_cost: 0,
            best_weight: 0,
            chosen: Transition::Exclude,
            exclude: None,
            include: None,
        }
    }
}

/// One layer of the network. Within a layer, there is at most one cell per
/// residual capacity.
#[derive(Debug, Clone, Default)]
struct Layer {
    cells: Vec<Cell>,
}

/// The layered network itself. Layer `i` comprises the cells where the
/// decision about the i-th item is taken; the last layer (index `n`) is the
/// terminal layer where all decisions have been made.
#[derive(Debug, Clone)]
struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Unrolls the network of the given instance, starting from a single root
    /// cell whose residual capacity is the capacity of the sack.
    fn build(instance: &Instance) -> Self {
        let mut layers = Vec::with_capacity(instance.nb_items() + 1);
        let mut current = Layer { cells: vec![Cell::new(instance.capacity)] };

        let mut index: FxHashMap<usize, CellId> = FxHashMap::default();
        for item in instance.items.iter() {
            index.clear();
            let mut next = Layer::default();

            for cell in current.cells.iter_mut() {
                let r = cell.residual;
                cell.exclude = Some(Self::intern(&mut next, &mut index, r));
                if let Some(rest) = r.checked_sub(item.weight) {
                    cell.include = Some(Self::intern(&mut next, &mut index, rest));
                }
            }

            layers.push(std::mem::replace(&mut current, next));
        }
        layers.push(current);

        Network { layers }
    }

    /// Returns the id of the cell with the given residual capacity in the
    /// layer being built; creating it when it does not exist yet.
    fn intern(layer: &mut Layer, index: &mut FxHashMap<usize, CellId>, residual: usize) -> CellId {
        *index.entry(residual).or_insert_with(|| {
            let id = CellId(layer.cells.len());
            layer.cells.push(Cell::new(residual));
            id
        })
    }

    /// Total number of cells in the network
    #[cfg(test)]
    fn size(&self) -> usize {
        self.layers.iter().map(|l| l.cells.len()).sum()
    }

    /// Computes the best cost of every cell by backward induction: from the
    /// layer of the last item up to the root. In case of a tie, leaving the
    /// item out is preferred.
    fn solve(&mut self, instance: &Instance) -> Result<(), SolverError> {
        for depth in (0..instance.nb_items()).rev() {
            let item = instance.items[depth];
            let (upper, lower) = self.layers.split_at_mut(depth + 1);
            let current = &mut upper[depth];
            let next = &lower[0];

            for cell in current.cells.iter_mut() {
                let exclude = cell.exclude
                    .and_then(|id| next.cells.get(id.0).copied())
                    .ok_or_else(|| SolverError::Inconsistent { layer: depth, weight: cell.residual })?;

                match cell.include.and_then(|id| next.cells.get(id.0).copied()) {
                    Some(include) if include.best_cost + item.cost > exclude.best_cost => {
                        cell.best_cost = include.best_cost + item.cost;
                        cell.best_weight = include.best_weight + item.weight;
                        cell.chosen = Transition::Include;
                    }
                    _ => {
                        cell.best_cost = exclude.best_cost;
                        cell.best_weight = exclude.best_weight;
                        cell.chosen = Transition::Exclude;
                    }
                }
            }
        }
        Ok(())
    }

    /// Follows the chosen transitions from the root and emits one flag per
    /// item. The terminal layer emits nothing.
    fn best_path(&self, nb_items: usize) -> Result<Selection, SolverError> {
        let mut selection = Vec::with_capacity(nb_items);
        let mut id = CellId(0);
        for depth in 0..nb_items {
            let cell = self.layers.get(depth)
                .and_then(|layer| layer.cells.get(id.0))
                .ok_or_else(|| SolverError::Inconsistent { layer: depth, weight: 0 })?;
            let next = match cell.chosen {
                Transition::Exclude => cell.exclude,
                Transition::Include => cell.include,
            };
            id = next.ok_or_else(|| SolverError::Inconsistent { layer: depth, weight: cell.residual })?;
            selection.push(cell.chosen == Transition::Include);
        }
        Ok(selection)
    }

    fn root(&self) -> &Cell {
        &self.layers[0].cells[0]
    }
}

/// This is the structure implementing the dynamic programming algorithm over
/// the network of reachable residual capacities. It always returns an
/// optimal solution.
///
/// # Example Usage
/// ```
/// # use kpsolve::*;
/// let instance = Instance::from_pairs(50, &[(10, 60), (20, 100), (30, 120)]);
/// let solution = DynamicProgramming.solve(&instance).unwrap();
/// assert_eq!(220, solution.total_cost);
/// assert_eq!(vec![false, true, true], solution.selection);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicProgramming;

impl Solver for DynamicProgramming {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn solve(&self, instance: &Instance) -> Result<Solution, SolverError> {
        let mut network = Network::build(instance);
        network.solve(instance)?;

        let selection = network.best_path(instance.nb_items())?;
        let total_cost = network.root().best_cost;
        Ok(Solution { selection, total_cost })
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
