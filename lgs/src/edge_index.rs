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

//! # Ordered Edge Index
//!
//! A mutable map from edge ids to floating-point keys that maintains the
//! minimum-key edge under incremental updates. The solver stores
//! `-utilization` as the key, so that the minimum is always the most
//! utilized edge of the network.

/// An indexed min-heap over edge ids.
///
/// The heap stores edge ids; an inverse permutation (`pos`) maps every
/// contained edge back to its heap slot, so that [`put`](Self::put) of an
/// already-known edge reheapifies in `O(log n)` instead of rebuilding.
/// Ties between equal keys are broken towards the smaller edge id.
#[derive(Debug, Clone)]
pub struct OrderedEdgeIndex {
    keys: Vec<f64>,
    heap: Vec<usize>,
    pos: Vec<Option<usize>>,
}

impl OrderedEdgeIndex {
    /// Creates a new empty index for edge ids in `[0, n)`.
    pub fn new(n: usize) -> Self {
        Self { keys: vec![0.0; n], heap: Vec::with_capacity(n), pos: vec![None; n] }
    }

    /// Returns the number of edges contained in the index.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the index contains no edge.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Inserts the edge with the given key, or updates its key if the edge
    /// is already contained.
    pub fn put(&mut self, edge: usize, key: f64) {
        self.keys[edge] = key;
        match self.pos[edge] {
            Some(i) => {
                let i = self.sift_up(i);
                self.sift_down(i);
            }
            None => {
                let i = self.heap.len();
                self.heap.push(edge);
                self.pos[edge] = Some(i);
                self.sift_up(i);
            }
        }
    }

    /// Returns the key of the edge, or `None` if the edge is not contained.
    pub fn get(&self, edge: usize) -> Option<f64> {
        self.pos[edge].map(|_| self.keys[edge])
    }

    /// Returns the edge with the smallest key, together with its key. Ties
    /// are broken towards the smaller edge id.
    ///
    /// # Panics
    ///
    /// Panics if the index is empty.
    pub fn min(&self) -> (usize, f64) {
        let edge = self.heap[0];
        (edge, self.keys[edge])
    }

    /// Returns true if the edge at heap slot `a` must be ordered before the
    /// edge at heap slot `b`.
    fn less(&self, a: usize, b: usize) -> bool {
        let (ea, eb) = (self.heap[a], self.heap[b]);
        self.keys[ea] < self.keys[eb] || (self.keys[ea] == self.keys[eb] && ea < eb)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos[self.heap[a]] = Some(a);
        self.pos[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let p = (i - 1) / 2;
            if !self.less(i, p) {
                break;
            }
            self.swap(i, p);
            i = p;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let l = 2 * i + 1;
            if l >= self.heap.len() {
                break;
            }
            let mut child = l;
            let r = l + 1;
            if r < self.heap.len() && self.less(r, l) {
                child = r;
            }
            if !self.less(child, i) {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_min_returns_smallest_key() {
        let mut index = OrderedEdgeIndex::new(4);
        index.put(0, -0.1);
        index.put(1, -0.7);
        index.put(2, -0.3);
        index.put(3, -0.5);

        assert_eq!(index.min(), (1, -0.7));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_ties_broken_by_smaller_edge_id() {
        let mut index = OrderedEdgeIndex::new(4);
        index.put(3, -0.5);
        index.put(1, -0.5);
        index.put(2, -0.5);

        assert_eq!(index.min(), (1, -0.5));
    }

    #[test]
    fn test_put_updates_known_edge() {
        let mut index = OrderedEdgeIndex::new(3);
        index.put(0, -0.9);
        index.put(1, -0.2);
        index.put(2, -0.4);
        assert_eq!(index.min(), (0, -0.9));

        // decrease the utilization of the minimum: it must sift down
        index.put(0, -0.1);
        assert_eq!(index.min(), (2, -0.4));

        // increase the utilization of another edge: it must sift up
        index.put(1, -1.0);
        assert_eq!(index.min(), (1, -1.0));

        assert_eq!(index.len(), 3);
        assert_eq!(index.get(0), Some(-0.1));
        assert_eq!(index.get(1), Some(-1.0));
    }

    #[test]
    fn test_get_absent_edge() {
        let index = OrderedEdgeIndex::new(2);

        assert_eq!(index.get(1), None);
        assert!(index.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_min_on_empty_index_panics() {
        OrderedEdgeIndex::new(2).min();
    }
}
