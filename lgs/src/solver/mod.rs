// LGS: Link-Guided Search for Segment Routing Traffic Engineering
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Link-Guided Search
//!
//! The solver of this crate implements a Link-Guided Search: a randomized,
//! incremental local search which, on every iteration,
//!
//! 1. selects an edge by roulette-wheel selection, where the probability of
//!    an edge grows with its utilization (see [`Config::alpha`]),
//! 2. selects a demand crossing that edge, where the probability of a
//!    demand grows with the traffic it contributes (see [`Config::beta`]),
//! 3. searches for the path mutation of that demand which reduces the load
//!    of the selected edge the most without pushing any edge to the current
//!    maximum utilization, and
//! 4. applies the mutation and incrementally updates all selection
//!    structures from the resulting load changes.
//!
//! The solver never owns a source of randomness: the driver supplies two
//! numbers in `[0, 1)` per iteration, which makes runs reproducible given
//! the input stream. See [`LinkGuidedSolver`] for the iteration protocol.

mod link_guided;
pub use link_guided::{Config, LinkGuidedSolver};
