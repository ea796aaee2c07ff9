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

//! Module containing the shared type definitions of the model

use thiserror::Error;

/// A traffic demand: `bandwidth` units of traffic to be sent from node
/// `from` to node `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demand {
    /// Source node of the demand
    pub from: usize,
    /// Destination node of the demand
    pub to: usize,
    /// Amount of traffic to route (non-negative)
    pub bandwidth: i64,
}

/// SRTE model errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SrteError {
    /// A node id is outside of the range `[0, N)` of the topology
    #[error("Node {0} is not in the graph")]
    NodeNotInGraph(usize),
    /// A demand references a node outside of the topology
    #[error("Demand {0} has an endpoint outside of the graph")]
    DemandOutOfRange(usize),
    /// The capacity vector does not have one entry per edge
    #[error("Expected {expected} link capacities, got {got}")]
    CapacityMismatch {
        /// Number of edges in the topology
        expected: usize,
        /// Number of capacities provided
        got: usize,
    },
}
