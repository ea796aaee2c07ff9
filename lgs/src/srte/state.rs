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

//! The reversible per-edge load state of the network

/// A change applied to the load of an edge since the last persist: the edge
/// id and the load it carried before the first change of the current epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadChange {
    /// Id of the changed edge
    pub edge: usize,
    /// Load of the edge before the change
    pub previous_load: i64,
}

/// A reversible structure representing the state of the network in terms
/// of traffic. It keeps track of the changes applied to its edges and can
/// efficiently undo them.
///
/// Instead of a set of dirty edges, the state keeps a logical `timestamp`
/// and a per-edge `saved_at` array: an edge is already logged in the
/// current epoch if and only if `saved_at[e] == timestamp`. Resetting the
/// dirty set after a persist or an undo is then a single timestamp
/// increment, with a rare `O(E)` zeroing when the timestamp overflows.
#[derive(Debug, Clone)]
pub struct NetworkState {
    loads: Vec<i64>,
    changes: Vec<LoadChange>,
    saved_at: Vec<u64>,
    timestamp: u64,
}

impl NetworkState {
    /// Creates a new state with all edge loads at zero.
    pub fn new(num_edges: usize) -> Self {
        Self {
            loads: vec![0; num_edges],
            changes: Vec::with_capacity(num_edges),
            saved_at: vec![0; num_edges],
            timestamp: 1,
        }
    }

    /// Returns the current load on the edge.
    pub fn load(&self, edge: usize) -> i64 {
        self.loads[edge]
    }

    /// Adds the load to the edge. The change is registered so that it can
    /// be undone if needed.
    pub fn add_load(&mut self, edge: usize, load: i64) {
        if self.saved_at[edge] != self.timestamp {
            self.saved_at[edge] = self.timestamp;
            self.changes.push(LoadChange { edge, previous_load: self.loads[edge] });
        }
        self.loads[edge] += load;
    }

    /// Removes the load from the edge. The change is registered so that it
    /// can be undone if needed.
    pub fn remove_load(&mut self, edge: usize, load: i64) {
        self.add_load(edge, -load);
    }

    /// Persists all the changes as the new reference state. New changes can
    /// be accumulated (and undone) from this point.
    pub fn persist_changes(&mut self) {
        self.changes.clear();
        self.incr_timestamp();
    }

    /// Undoes all the changes since the last time changes were persisted.
    /// This operation runs in `O(C)` where `C` is the number of edges that
    /// have been changed.
    pub fn undo_changes(&mut self) {
        while let Some(lc) = self.changes.pop() {
            self.loads[lc.edge] = lc.previous_load;
        }
        self.incr_timestamp();
    }

    /// Returns the changes registered since the last persist. Every changed
    /// edge appears exactly once.
    pub fn changes(&self) -> &[LoadChange] {
        &self.changes
    }

    fn incr_timestamp(&mut self) {
        if self.timestamp == u64::MAX {
            for s in self.saved_at.iter_mut() {
                *s = 0;
            }
            self.timestamp = 1;
        } else {
            self.timestamp += 1;
        }
    }
}
