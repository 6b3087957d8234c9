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

//! This module provides a fully polynomial time approximation scheme (FPTAS)
//! for the knapsack problem.
//!
//! The idea is to discard the `precision` lowest order bits of every item
//! cost before enumerating the distinct (cost, weight) pairs that can be
//! attained with the items. Rounding the costs drastically reduces the number
//! of distinct cumulative costs (hence the number of states to enumerate) at
//! the price of an error which is at most `2^precision - 1` per item.
//!
//! The enumeration unrolls a layered lattice (one layer per item). Every
//! cell of layer `k` stands for a non empty subset of the items `0..=k` and
//! it remembers how it was derived from the previous layer:
//!
//! * `Carried`: the item `k` is left out, the very same state exists in the
//!   previous layer (this is the exclusion pointer);
//! * `Alone`: the item `k` is the only item taken;
//! * `Extended`: the item `k` is added to some state of the previous layer.
//!
//! Within a layer, there is at most one cell per (cost, weight) pair.
use fxhash::FxHashMap;

use crate::{Instance, Selection, Solution, Solver, SolverError};

/// The identifier of a cell: its position in the `cells` vector of its layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellId(usize);

/// How a cell was derived from the previous layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// The item of the layer is left out. The payload identifies the cell
    /// holding the same state in the previous layer.
    Carried(CellId),
    /// The item of the layer is the only one being taken
    Alone,
    /// The item of the layer is added to a state of the previous layer
    Extended,
}

/// One state of the lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    /// The cumulative (rounded) cost of the items of this state
    cost: usize,
    /// The cumulative weight of the items of this state
    weight: usize,
    origin: Origin,
}

#[derive(Debug, Clone, Default)]
struct Layer {
    cells: Vec<Cell>,
}
impl Layer {
    /// Returns the cell having exactly the given weight with the highest
    /// cost (the first one in case of a tie).
    fn find_by_weight(&self, weight: usize) -> Option<(CellId, &Cell)> {
        self.best_where(|cell| cell.weight == weight)
    }
    /// Returns the cell that fits in the given capacity with the highest
    /// cost (the first one in case of a tie).
    fn best_feasible(&self, capacity: usize) -> Option<(CellId, &Cell)> {
        self.best_where(|cell| cell.weight <= capacity)
    }
    fn best_where<F>(&self, accept: F) -> Option<(CellId, &Cell)>
    where F: Fn(&Cell) -> bool
    {
        let mut best: Option<(CellId, &Cell)> = None;
        for (i, cell) in self.cells.iter().enumerate() {
            if accept(cell) && best.map_or(true, |(_, b)| cell.cost > b.cost) {
                best = Some((CellId(i), cell));
            }
        }
        best
    }
}

/// The lattice of all the (rounded cost, weight) pairs reachable with the
/// items of an instance. Layer `k` relates to the k-th item; the last layer
/// is thus the one where all items have been considered.
#[derive(Debug, Clone)]
struct Lattice {
    layers: Vec<Layer>,
}

impl Lattice {
    /// Unrolls the lattice. `costs` are the rounded item costs. States which
    /// do not fit in the sack are never created: their weight can only grow
    /// and they can never lead to a feasible solution.
    ///
    /// Dropping these states must not alter the order of the remaining ones
    /// since ties are broken by position. Within a layer, the fresh state of
    /// the item always follows the first state of the previous layer, which
    /// is the first item alone (carried over). When that one does not fit,
    /// the fresh state comes first.
    fn build(instance: &Instance, costs: &[usize]) -> Self {
        let capacity = instance.capacity;
        let lead_fits = instance.items.first().map_or(false, |item| item.weight <= capacity);

        let mut layers: Vec<Layer> = Vec::with_capacity(instance.nb_items());
        let mut index: FxHashMap<(usize, usize), CellId> = FxHashMap::default();

        for (k, item) in instance.items.iter().enumerate() {
            index.clear();
            let mut next = Layer::default();
            let cost = costs[k];
            let prev = layers.last().map_or(&[][..], |layer| layer.cells.as_slice());

            let alone = Cell { cost, weight: item.weight, origin: Origin::Alone };
            if prev.is_empty() || !lead_fits {
                Self::insert(&mut next, &mut index, capacity, alone);
            }
            for (i, cell) in prev.iter().enumerate() {
                Self::insert(&mut next, &mut index, capacity,
                    Cell { cost: cell.cost, weight: cell.weight, origin: Origin::Carried(CellId(i)) });
                if i == 0 {
                    Self::insert(&mut next, &mut index, capacity, alone);
                }
                // an overflowing weight cannot fit either
                if let Some(weight) = cell.weight.checked_add(item.weight) {
                    Self::insert(&mut next, &mut index, capacity,
                        Cell { cost: cell.cost + cost, weight, origin: Origin::Extended });
                }
            }

            layers.push(next);
        }

        Lattice { layers }
    }

    /// Adds the cell to the layer unless it exceeds the capacity or an
    /// identical state already exists in that layer.
    fn insert(layer: &mut Layer, index: &mut FxHashMap<(usize, usize), CellId>, capacity: usize, cell: Cell) {
        if cell.weight > capacity {
            return;
        }
        index.entry((cell.cost, cell.weight)).or_insert_with(|| {
            let id = CellId(layer.cells.len());
            layer.cells.push(cell);
            id
        });
    }

    fn cell(&self, depth: usize, id: CellId) -> Option<Cell> {
        self.layers.get(depth).and_then(|layer| layer.cells.get(id.0)).copied()
    }

    /// Returns the best feasible cell of the last layer (if any)
    fn best_terminal(&self, capacity: usize) -> Option<CellId> {
        self.layers.last()
            .and_then(|layer| layer.best_feasible(capacity))
            .map(|(id, _)| id)
    }

    /// Walks back from the given cell of the last layer and recovers the
    /// selection it stands for.
    ///
    /// Carried cells are followed through their exclusion pointer. When an
    /// item has been taken, its weight is subtracted from the running target
    /// weight and the walk proceeds with the best cell of the previous layer
    /// having exactly that weight. That cell must have the rounded cost of
    /// the current one minus the rounded cost of the item; anything else
    /// means the lattice is inconsistent.
    fn best_path(&self, instance: &Instance, costs: &[usize], from: CellId) -> Result<Selection, SolverError> {
        let mut selection = vec![false; instance.nb_items()];
        let mut depth = self.layers.len().saturating_sub(1);
        let mut id = from;
        let mut target = self.cell(depth, id).map_or(0, |cell| cell.weight);

        loop {
            let (layer, weight) = (depth, target);
            let inconsistent = move || SolverError::Inconsistent { layer, weight };
            let cell = self.cell(depth, id).ok_or_else(inconsistent)?;

            match cell.origin {
                Origin::Carried(prev) => {
                    depth = depth.checked_sub(1).ok_or_else(inconsistent)?;
                    id = prev;
                }
                Origin::Alone => {
                    selection[depth] = true;
                    return match target.checked_sub(instance.items[depth].weight) {
                        Some(0) => Ok(selection),
                        _ => Err(inconsistent()),
                    };
                }
                Origin::Extended => {
                    selection[depth] = true;
                    target = target.checked_sub(instance.items[depth].weight).ok_or_else(inconsistent)?;
                    let expected = cell.cost.checked_sub(costs[depth]).ok_or_else(inconsistent)?;
                    depth = depth.checked_sub(1).ok_or_else(inconsistent)?;

                    match self.layers[depth].find_by_weight(target) {
                        Some((prev, pcell)) if pcell.cost == expected => id = prev,
                        _ => return Err(inconsistent()),
                    }
                }
            }
        }
    }
}

/// Returns the mask that clears the `precision` lowest order bits of a value
fn mask(precision: u32) -> usize {
    usize::MAX.checked_shl(precision).unwrap_or(0)
}

/// Discards the `precision` lowest order bits of the given cost
#[inline]
pub fn reduce_precision(cost: usize, precision: u32) -> usize {
    cost & mask(precision)
}

/// This is the structure implementing the FPTAS. The solution it returns
/// always fits in the sack and its cost is at least the optimal cost minus
/// `n * (2^precision - 1)` where `n` is the number of items. With a precision
/// of zero, the returned solution is optimal.
///
/// The precision is not validated: a precision which is so large that all
/// costs round to zero is allowed. The solver still returns a feasible
/// solution, but it is then no better than an arbitrary one.
///
/// # Note:
/// The returned `total_cost` is the actual cost of the selected items, not
/// the rounded cost that was optimized.
///
/// # Example Usage
/// ```
/// # use kpsolve::*;
/// let instance = Instance::from_pairs(5, &[(2, 3), (3, 4), (4, 5), (5, 6)]);
/// let solution = Fptas::new(0).solve(&instance).unwrap();
/// assert_eq!(7, solution.total_cost);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fptas {
    /// The number of low order bits discarded from every item cost
    pub precision: u32,
}

impl Fptas {
    pub fn new(precision: u32) -> Self {
        Fptas { precision }
    }
    /// The largest possible gap between the optimal cost and the cost of the
    /// solution returned for an instance having `nb_items` items.
    pub fn error_bound(&self, nb_items: usize) -> usize {
        let per_item = !mask(self.precision);
        per_item.saturating_mul(nb_items)
    }
}

impl Solver for Fptas {
    fn name(&self) -> &'static str {
        "fptas"
    }

    fn solve(&self, instance: &Instance) -> Result<Solution, SolverError> {
        let costs = instance.items.iter()
            .map(|item| reduce_precision(item.cost, self.precision))
            .collect::<Vec<_>>();

        let lattice = Lattice::build(instance, &costs);
        match lattice.best_terminal(instance.capacity) {
            None => Ok(Solution::empty(instance.nb_items())),
            Some(best) => {
                let selection = lattice.best_path(instance, &costs, best)?;
                Ok(Solution::from_selection(instance, selection))
            }
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
