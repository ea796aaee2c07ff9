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

//! The SRTE engine: move application and move search

use super::fgraphs::{split_load, ForwardingGraphs};
use super::paths::PathVar;
use super::state::{LoadChange, NetworkState};
use super::topology::Topology;
use super::types::{Demand, SrteError};

use itertools::iproduct;
use log::*;

/// A candidate modification of the path of one demand.
///
/// Every variant names the demand whose path it modifies. Positions refer
/// to the current path of the demand at the time the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Collapse the path back to the trivial `[from, to]` path
    Clear {
        /// Demand whose path is cleared
        demand: usize,
    },
    /// Remove the waypoint at `position`
    Remove {
        /// Demand whose path is modified
        demand: usize,
        /// Position of the removed waypoint
        position: usize,
    },
    /// Replace the waypoint at `position` with `node`
    Update {
        /// Demand whose path is modified
        demand: usize,
        /// Position of the replaced waypoint
        position: usize,
        /// New waypoint
        node: usize,
    },
    /// Insert `node` as a new waypoint at `position`
    Insert {
        /// Demand whose path is modified
        demand: usize,
        /// Position at which the waypoint is inserted
        position: usize,
        /// Inserted waypoint
        node: usize,
    },
}

impl Move {
    /// Returns the demand whose path is modified by the move.
    pub fn demand(&self) -> usize {
        match *self {
            Move::Clear { demand } => demand,
            Move::Remove { demand, .. } => demand,
            Move::Update { demand, .. } => demand,
            Move::Insert { demand, .. } => demand,
        }
    }
}

/// A complete problem instance: the topology, the link capacities, the
/// traffic demands, and the path length limit.
#[derive(Debug, Clone)]
pub struct SrteInstance {
    /// The network topology
    pub graph: Topology,
    /// Maximum number of nodes per path, including source and destination
    pub max_path_nodes: usize,
    /// The traffic demands to place
    pub demands: Vec<Demand>,
    /// Capacity of each edge, parallel to the topology's edge list
    pub link_capacities: Vec<i64>,
}

/// The SRTE engine. It owns the reversible [`NetworkState`], one
/// [`PathVar`] per demand, and the precomputed [`ForwardingGraphs`], and
/// uses them to apply and search [`Move`]s.
///
/// The engine reuses the state's change log as scratch space during
/// [`search`](Self::search): between two public operations the log either
/// is empty or contains speculative changes, which
/// [`apply_move`](Self::apply_move) drains by undoing them first. Callers
/// must not interleave their own state mutations between a search and the
/// following apply.
#[derive(Debug)]
pub struct Srte {
    instance: SrteInstance,
    fgraphs: ForwardingGraphs,
    state: NetworkState,
    path_vars: Vec<PathVar>,
}

impl Srte {
    /// Creates a new engine for the given instance. Every demand starts on
    /// its trivial path `[from, to]`, and the resulting loads are persisted
    /// as the initial state.
    pub fn new(instance: SrteInstance) -> Result<Self, SrteError> {
        let num_nodes = instance.graph.num_nodes();
        let num_edges = instance.graph.num_edges();

        if instance.link_capacities.len() != num_edges {
            return Err(SrteError::CapacityMismatch {
                expected: num_edges,
                got: instance.link_capacities.len(),
            });
        }
        for (i, d) in instance.demands.iter().enumerate() {
            if d.from >= num_nodes || d.to >= num_nodes {
                return Err(SrteError::DemandOutOfRange(i));
            }
        }

        let fgraphs = ForwardingGraphs::new(&instance.graph)?;

        let path_vars: Vec<PathVar> = instance
            .demands
            .iter()
            .map(|d| PathVar::new(d.from, d.to, instance.max_path_nodes))
            .collect();

        let mut state = NetworkState::new(num_edges);
        for d in instance.demands.iter() {
            for er in fgraphs.edge_ratios(d.from, d.to) {
                state.add_load(er.edge, split_load(d.bandwidth, er.ratio));
            }
        }
        state.persist_changes(); // mark the initial state

        debug!(
            "SRTE engine ready: {} nodes, {} edges, {} demands",
            num_nodes,
            num_edges,
            instance.demands.len()
        );

        Ok(Self { instance, fgraphs, state, path_vars })
    }

    /// Returns the problem instance.
    pub fn instance(&self) -> &SrteInstance {
        &self.instance
    }

    /// Returns the precomputed forwarding graphs.
    pub fn fgraphs(&self) -> &ForwardingGraphs {
        &self.fgraphs
    }

    /// Returns the current path of the demand.
    pub fn path(&self, demand: usize) -> &PathVar {
        &self.path_vars[demand]
    }

    /// Returns the current load on the edge.
    pub fn load(&self, edge: usize) -> i64 {
        self.state.load(edge)
    }

    /// Returns the capacity of the edge.
    pub fn capacity(&self, edge: usize) -> i64 {
        self.instance.link_capacities[edge]
    }

    /// Returns the utilization of the edge: its load divided by its
    /// capacity.
    pub fn utilization(&self, edge: usize) -> f64 {
        self.state.load(edge) as f64 / self.instance.link_capacities[edge] as f64
    }

    /// Returns the load changes accumulated since the last persist.
    pub fn changes(&self) -> &[LoadChange] {
        self.state.changes()
    }

    /// Persists the accumulated load changes as the new reference state.
    pub fn persist_changes(&mut self) {
        self.state.persist_changes();
    }

    /// Applies the move if possible and returns whether it was applied.
    ///
    /// Any speculative changes left in the state (e.g. by a preceding
    /// [`search`](Self::search)) are undone first. If `persist` is false,
    /// the load changes of the move stay in the change log so that the
    /// caller can inspect them through [`changes`](Self::changes) before
    /// calling [`persist_changes`](Self::persist_changes).
    ///
    /// A move whose waypoints all lie on the shortest paths of the demand
    /// can be applied without changing any load; such a move still counts
    /// as applied. Callers relying on state-change detection must inspect
    /// [`changes`](Self::changes).
    pub fn apply_move(&mut self, mv: &Move, persist: bool) -> bool {
        self.state.undo_changes();

        let applied = match *mv {
            Move::Clear { demand } => self.clear(demand),
            Move::Remove { demand, position } => self.remove(demand, position),
            Move::Update { demand, position, node } => self.update(demand, position, node),
            Move::Insert { demand, position, node } => self.insert(demand, position, node),
        };
        if !applied {
            return false;
        }

        // Mirror the accepted mutation onto the path variable.
        match *mv {
            Move::Clear { demand } => self.path_vars[demand].clear(),
            Move::Remove { demand, position } => self.path_vars[demand].remove(position),
            Move::Update { demand, position, node } => {
                self.path_vars[demand].update(position, node)
            }
            Move::Insert { demand, position, node } => {
                self.path_vars[demand].insert(position, node)
            }
        };

        if persist {
            self.state.persist_changes();
        }
        true
    }

    /// Searches for a move that reduces the load of `edge` by changing the
    /// path of `demand`.
    ///
    /// A move is only valid if, after applying it, every changed edge has a
    /// utilization strictly below `max_util`, and the load of `edge` is
    /// strictly below its load at entry. The move families are tried in the
    /// order clear, remove, update, insert; the first family containing a
    /// valid move wins, and within a family the move that reduces the
    /// edge's load the most is returned.
    ///
    /// The state's change log is used as scratch space, and is left undone
    /// when the search returns.
    pub fn search(&mut self, edge: usize, demand: usize, max_util: f64) -> Option<Move> {
        if let Some(mv) = self.search_clear(edge, demand, max_util) {
            return Some(mv);
        }
        if let Some(mv) = self.search_remove(edge, demand, max_util) {
            return Some(mv);
        }
        if let Some(mv) = self.search_update(edge, demand, max_util) {
            return Some(mv);
        }
        self.search_insert(edge, demand, max_util)
    }

    fn search_clear(&mut self, edge: usize, demand: usize, max_util: f64) -> Option<Move> {
        let edge_load = self.state.load(edge);

        self.state.undo_changes();
        let accepted = self.clear(demand)
            && self.check_max_util(max_util)
            && self.state.load(edge) < edge_load;
        self.state.undo_changes();

        if accepted {
            Some(Move::Clear { demand })
        } else {
            None
        }
    }

    fn search_remove(&mut self, edge: usize, demand: usize, max_util: f64) -> Option<Move> {
        let mut edge_load = self.state.load(edge);
        let length = self.path_vars[demand].length();

        let mut best = None;
        for position in 1..length {
            self.state.undo_changes();
            if !self.remove(demand, position) {
                continue;
            }
            if !self.check_max_util(max_util) {
                continue;
            }
            let load = self.state.load(edge);
            if load < edge_load {
                best = Some(Move::Remove { demand, position });
                edge_load = load;
            }
        }

        self.state.undo_changes();
        best
    }

    fn search_update(&mut self, edge: usize, demand: usize, max_util: f64) -> Option<Move> {
        let num_nodes = self.instance.graph.num_nodes();
        let length = self.path_vars[demand].length();
        let mut edge_load = self.state.load(edge);

        let mut best = None;
        for (position, node) in iproduct!(1..length, 0..num_nodes) {
            self.state.undo_changes();
            if !self.update(demand, position, node) {
                continue;
            }
            if !self.check_max_util(max_util) {
                continue;
            }
            let load = self.state.load(edge);
            if load < edge_load {
                best = Some(Move::Update { demand, position, node });
                edge_load = load;
            }
        }

        self.state.undo_changes();
        best
    }

    fn search_insert(&mut self, edge: usize, demand: usize, max_util: f64) -> Option<Move> {
        let num_nodes = self.instance.graph.num_nodes();
        let length = self.path_vars[demand].length();
        let mut edge_load = self.state.load(edge);

        let mut best = None;
        for (position, node) in iproduct!(1..=length, 0..num_nodes) {
            self.state.undo_changes();
            if !self.insert(demand, position, node) {
                continue;
            }
            if !self.check_max_util(max_util) {
                continue;
            }
            let load = self.state.load(edge);
            if load < edge_load {
                best = Some(Move::Insert { demand, position, node });
                edge_load = load;
            }
        }

        self.state.undo_changes();
        best
    }

    /// Applies the load deltas of a clear of the demand's path. The path
    /// variable itself is not modified.
    fn clear(&mut self, demand: usize) -> bool {
        if !self.path_vars[demand].can_clear() {
            return false;
        }

        // Before: from -> ... -> node -> ... -> to
        // After:  from -----------------------> to
        let bw = self.instance.demands[demand].bandwidth;
        let length = self.path_vars[demand].length();
        for i in 1..length {
            let a = self.path_vars[demand].node(i - 1);
            let b = self.path_vars[demand].node(i);
            self.remove_path_load(a, b, bw);
        }
        let from = self.path_vars[demand].node(0);
        let to = self.path_vars[demand].node(length - 1);
        self.add_path_load(from, to, bw);

        true
    }

    /// Applies the load deltas of removing the waypoint at `pos`. The path
    /// variable itself is not modified.
    fn remove(&mut self, demand: usize, pos: usize) -> bool {
        if !self.path_vars[demand].can_remove(pos) {
            return false;
        }

        // Before: prev -> node -> next
        // After:  prev ---------> next
        let prev = self.path_vars[demand].node(pos - 1);
        let node = self.path_vars[demand].node(pos);
        let next = self.path_vars[demand].node(pos + 1);
        let bw = self.instance.demands[demand].bandwidth;
        self.remove_path_load(prev, node, bw);
        self.remove_path_load(node, next, bw);
        self.add_path_load(prev, next, bw);

        true
    }

    /// Applies the load deltas of replacing the waypoint at `pos` with
    /// `new_node`. The path variable itself is not modified.
    fn update(&mut self, demand: usize, pos: usize, new_node: usize) -> bool {
        if !self.path_vars[demand].can_update(pos, new_node) {
            return false;
        }

        // Before: prev -> old_node -> next
        // After:  prev -> new_node -> next
        let prev = self.path_vars[demand].node(pos - 1);
        let old_node = self.path_vars[demand].node(pos);
        let next = self.path_vars[demand].node(pos + 1);
        let bw = self.instance.demands[demand].bandwidth;
        self.remove_path_load(prev, old_node, bw);
        self.remove_path_load(old_node, next, bw);
        self.add_path_load(prev, new_node, bw);
        self.add_path_load(new_node, next, bw);

        true
    }

    /// Applies the load deltas of inserting `node` at `pos`. The path
    /// variable itself is not modified.
    fn insert(&mut self, demand: usize, pos: usize, node: usize) -> bool {
        if !self.path_vars[demand].can_insert(pos, node) {
            return false;
        }

        // Before: prev ---------> next
        // After:  prev -> node -> next
        let prev = self.path_vars[demand].node(pos - 1);
        let next = self.path_vars[demand].node(pos);
        let bw = self.instance.demands[demand].bandwidth;
        self.remove_path_load(prev, next, bw);
        self.add_path_load(prev, node, bw);
        self.add_path_load(node, next, bw);

        true
    }

    fn check_max_util(&self, max_util: f64) -> bool {
        self.state.changes().iter().all(|lc| self.utilization(lc.edge) < max_util)
    }

    fn add_path_load(&mut self, from: usize, to: usize, bw: i64) {
        for er in self.fgraphs.edge_ratios(from, to) {
            self.state.add_load(er.edge, split_load(bw, er.ratio));
        }
    }

    fn remove_path_load(&mut self, from: usize, to: usize, bw: i64) {
        for er in self.fgraphs.edge_ratios(from, to) {
            self.state.remove_load(er.edge, split_load(bw, er.ratio));
        }
    }
}
