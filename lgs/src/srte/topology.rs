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

//! The network topology as a dense directed graph

/// A directed edge between two nodes, with a routing cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Tail node of the edge
    pub from: usize,
    /// Head node of the edge
    pub to: usize,
    /// Routing cost of the edge (non-negative)
    pub cost: u64,
}

/// The topology of the network as a directed graph.
///
/// Edges have stable integer identifiers in `[0, E)`: the index at which
/// they were inserted. For every node, the topology stores the ordered list
/// of its outgoing edge ids, which gives cache-friendly iteration without
/// any pointer chasing.
#[derive(Debug, Clone)]
pub struct Topology {
    nexts: Vec<Vec<usize>>,
    edges: Vec<Edge>,
}

impl Topology {
    /// Creates a new topology with the given edges and number of nodes.
    ///
    /// # Panics
    ///
    /// Panics if an edge references a node outside of `[0, num_nodes)`.
    pub fn new(edges: Vec<Edge>, num_nodes: usize) -> Self {
        let mut nexts: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
        for (i, e) in edges.iter().enumerate() {
            assert!(
                e.from < num_nodes && e.to < num_nodes,
                "edge {} references a node outside of [0, {})",
                i,
                num_nodes
            );
            nexts[e.from].push(i);
        }
        Self { nexts, edges }
    }

    /// Returns the number of nodes in the topology.
    pub fn num_nodes(&self) -> usize {
        self.nexts.len()
    }

    /// Returns the number of edges in the topology.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edge with the given id.
    pub fn edge(&self, edge: usize) -> Edge {
        self.edges[edge]
    }

    /// Returns all edges, indexed by edge id.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the ids of the outgoing edges of node `u`, in insertion
    /// order.
    pub fn out_edges(&self, u: usize) -> &[usize] {
        &self.nexts[u]
    }

    /// Overwrites the cost of every edge with 1, turning shortest-cost
    /// routing into fewest-hops routing.
    pub fn set_unary_costs(&mut self) {
        for e in self.edges.iter_mut() {
            e.cost = 1;
        }
    }
}
