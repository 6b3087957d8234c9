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

//! This module defines the most basic data types that are used throughout all
//! the code of our library: the knapsack instances fed to the solvers and the
//! solutions they produce. These are also the types your client code is most
//! likely to work with.

// ----------------------------------------------------------------------------
// --- ITEM -------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// One object that may (or may not) be put in the sack.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Item {
    /// How much of the capacity this item consumes
    pub weight: usize,
    /// How much this item contributes to the objective
    pub cost: usize,
}
impl Item {
    #[inline]
    pub fn new(weight: usize, cost: usize) -> Self {
        Item { weight, cost }
    }
}

// ----------------------------------------------------------------------------
// --- SELECTION --------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A selection tells which items are put in the sack: `selection[i]` is true
/// iff the i-th item of the instance is taken. A selection always comprises
/// exactly one entry per item of the instance it relates to.
pub type Selection = Vec<bool>;

// ----------------------------------------------------------------------------
// --- INSTANCE ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// An instance of the 0/1 knapsack problem: a set of items in a fixed order
/// and the capacity of the sack. Instances are never modified by a solver.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Instance {
    /// The identifier of this instance (as read from the instance file)
    pub id: usize,
    /// The maximum total weight the sack can hold
    pub capacity: usize,
    /// The items, in their index order
    pub items: Vec<Item>,
}
impl Instance {
    pub fn new(id: usize, capacity: usize, items: Vec<Item>) -> Self {
        Instance { id, capacity, items }
    }
    /// Convenience constructor taking the items as (weight, cost) pairs.
    ///
    /// # Examples:
    /// ```
    /// # use kpsolve::*;
    /// let instance = Instance::from_pairs(5, &[(2, 3), (3, 4)]);
    /// assert_eq!(2, instance.nb_items());
    /// assert_eq!(Item::new(3, 4), instance.items[1]);
    /// ```
    pub fn from_pairs(capacity: usize, pairs: &[(usize, usize)]) -> Self {
        let items = pairs.iter().map(|&(w, c)| Item::new(w, c)).collect();
        Instance { id: 0, capacity, items }
    }
    #[inline]
    pub fn nb_items(&self) -> usize {
        self.items.len()
    }
    /// Total weight of the items marked in the given selection. The sum
    /// saturates at `usize::MAX`.
    pub fn weight_of(&self, selection: &[bool]) -> usize {
        self.items.iter().zip(selection)
            .filter(|(_, taken)| **taken)
            .map(|(item, _)| item.weight)
            .fold(0, usize::saturating_add)
    }
    /// Total (unrounded) cost of the items marked in the given selection
    pub fn cost_of(&self, selection: &[bool]) -> usize {
        self.items.iter().zip(selection)
            .filter(|(_, taken)| **taken)
            .map(|(item, _)| item.cost)
            .sum()
    }
    /// Returns true iff the selection has one entry per item and fits in the sack
    pub fn is_feasible(&self, selection: &[bool]) -> bool {
        selection.len() == self.nb_items() && self.items.iter().zip(selection)
            .filter(|(_, taken)| **taken)
            .try_fold(0_usize, |total, (item, _)| total.checked_add(item.weight))
            .map_or(false, |total| total <= self.capacity)
    }
}

// ----------------------------------------------------------------------------
// --- SOLUTION ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of a solver: the items it decided to take along with the total
/// cost they achieve.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Solution {
    /// One flag per item of the instance
    pub selection: Selection,
    /// The sum of the costs of the selected items
    pub total_cost: usize,
}
impl Solution {
    /// The solution taking no item at all
    pub fn empty(nb_items: usize) -> Self {
        Solution { selection: vec![false; nb_items], total_cost: 0 }
    }
    /// Builds a solution from the given selection. Its cost is computed from
    /// the actual costs of the instance items.
    pub fn from_selection(instance: &Instance, selection: Selection) -> Self {
        let total_cost = instance.cost_of(&selection);
        Solution { selection, total_cost }
    }
    /// Returns the indices of the items taken by this solution
    pub fn taken(&self) -> impl Iterator<Item = usize> + '_ {
        self.selection.iter().enumerate()
            .filter(|(_, taken)| **taken)
            .map(|(i, _)| i)
    }
    /// Returns true iff the solution is feasible for the given instance and
    /// its total cost matches the cost of its selection.
    pub fn is_consistent_with(&self, instance: &Instance) -> bool {
        instance.is_feasible(&self.selection) && instance.cost_of(&self.selection) == self.total_cost
    }
}

// ----------------------------------------------------------------------------
// --- ERRORS -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The reasons why a solver might fail to produce a solution. None of these
/// is a regular outcome: an infeasible instance simply yields the empty
/// solution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    /// The reconstruction of the best path through a lattice could not find
    /// the predecessor it expected. This is a bug, not a property of the
    /// instance.
    #[error("inconsistent lattice: no valid predecessor for weight {weight} in layer {layer}")]
    Inconsistent { layer: usize, weight: usize },
    /// The instance is too large for an exhaustive enumeration
    #[error("instance has {items} items, exhaustive enumeration supports at most {max}")]
    TooLarge { items: usize, max: usize },
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
