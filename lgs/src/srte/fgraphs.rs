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

//! # Forwarding Graphs
//!
//! This module precomputes, for every ordered pair of nodes `(s, t)`, how
//! traffic sent from `s` to `t` splits across the network under shortest
//! path routing with Equal-Cost Multi-Path (ECMP): at every node, traffic
//! is split equally among the outgoing edges that lie on a shortest path
//! towards the destination.

use super::topology::Topology;
use super::types::SrteError;

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// An edge of a forwarding graph together with the fraction of traffic sent
/// over that edge. For example, `EdgeRatio { edge: 5, ratio: 0.5 }` means
/// that 50% of the traffic sent on the forwarding graph traverses edge 5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRatio {
    /// Id of the edge in the topology
    pub edge: usize,
    /// Fraction of the traffic sent over the edge, in `(0, 1]`
    pub ratio: f64,
}

/// The forwarding graphs of every ordered pair of nodes.
///
/// A forwarding graph is the DAG of all shortest paths from a source to a
/// destination, annotated with the fraction of traffic each edge carries
/// under ECMP splitting. The ratios only depend on the topology and the
/// edge costs; they are computed once at construction and never change
/// during the search.
///
/// For every pair `(s, t)` with `t` reachable from `s`, the ratios satisfy
/// flow conservation: the ratios leaving `s` sum to 1, the ratios entering
/// `t` sum to 1, and at every other node of the DAG the incoming and
/// outgoing ratio sums are equal.
#[derive(Debug, Clone)]
pub struct ForwardingGraphs {
    num_nodes: usize,
    // flattened 2-dimensional lookup, indexed by s * num_nodes + t
    edge_ratios: Vec<Vec<EdgeRatio>>,
}

impl ForwardingGraphs {
    /// Precomputes the forwarding graphs of every ordered pair of nodes of
    /// the given topology.
    pub fn new(graph: &Topology) -> Result<Self, SrteError> {
        let num_nodes = graph.num_nodes();
        let mut edge_ratios: Vec<Vec<EdgeRatio>> = vec![Vec::new(); num_nodes * num_nodes];

        for s in 0..num_nodes {
            let prevs = shortest_dag(graph, s)?;
            for t in 0..num_nodes {
                if s == t {
                    continue;
                }
                let mut ratios: Vec<EdgeRatio> = forwarding_graph(graph, &prevs, s, t)
                    .into_iter()
                    .map(|(edge, ratio)| EdgeRatio { edge, ratio })
                    .collect();
                ratios.sort_by_key(|er| er.edge);
                edge_ratios[get_idx(s, t, num_nodes)] = ratios;
            }
        }

        Ok(Self { num_nodes, edge_ratios })
    }

    /// Returns the list of [`EdgeRatio`] pairs of the forwarding graph from
    /// node `s` to node `t`, sorted by ascending edge id. The list is empty
    /// if `t` is not reachable from `s`, or if `s == t`.
    pub fn edge_ratios(&self, s: usize, t: usize) -> &[EdgeRatio] {
        &self.edge_ratios[get_idx(s, t, self.num_nodes)]
    }
}

/// Returns the integer amount of load that an edge carrying `ratio` of the
/// demand receives when `bandwidth` units of traffic enter its forwarding
/// graph.
///
/// The result is rounded up. Rounding must be identical everywhere loads
/// are added and removed, so that the contributions of a demand cancel
/// exactly when its path changes.
pub fn split_load(bandwidth: i64, ratio: f64) -> i64 {
    (bandwidth as f64 * ratio).ceil() as i64
}

fn get_idx(s: usize, t: usize, num_nodes: usize) -> usize {
    s * num_nodes + t
}

/// Computes the DAG of all shortest paths from `src` to every other node.
///
/// The returned vector maps each node `v` to the list of incoming edges
/// `(u, v)` such that `cost(src, u) + cost(u, v) = cost(src, v)`. The list
/// of a node that is unreachable from `src` is empty.
fn shortest_dag(graph: &Topology, src: usize) -> Result<Vec<Vec<usize>>, SrteError> {
    let num_nodes = graph.num_nodes();
    if src >= num_nodes {
        return Err(SrteError::NodeNotInGraph(src));
    }

    let mut prevs: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut costs: Vec<u64> = vec![u64::MAX; num_nodes];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    costs[src] = 0;
    heap.push(Reverse((0, src)));

    while let Some(Reverse((cost, u))) = heap.pop() {
        if cost > costs[u] {
            // stale entry, a cheaper path to u was already expanded
            continue;
        }
        for &e in graph.out_edges(u) {
            let edge = graph.edge(e);
            let new_cost = cost + edge.cost;
            let v = edge.to;

            // Path src -> u -> v is worse than the best known path.
            if costs[v] < new_cost {
                continue;
            }

            // Path src -> u -> v is one of the best paths to v so far.
            if costs[v] == new_cost {
                prevs[v].push(e);
                continue;
            }

            // Path src -> u -> v is better than the best path to v so far.
            costs[v] = new_cost;
            prevs[v].clear();
            prevs[v].push(e);
            heap.push(Reverse((new_cost, v)));
        }
    }

    Ok(prevs)
}

/// Computes the fraction of traffic sent on each edge when routing from `s`
/// to `t` along the shortest paths encoded in `prevs`.
///
/// The first phase walks `prevs` backwards from `t` to extract the DAG of
/// the shortest `s -> t` paths and the in-degree of each of its nodes. The
/// second phase traverses that DAG in topological order starting from `s`:
/// every node splits its accumulated fraction equally across its outgoing
/// DAG edges. Processing nodes in topological order guarantees that the
/// total fraction received at a node is known before it is split.
fn forwarding_graph(
    graph: &Topology,
    prevs: &[Vec<usize>],
    s: usize,
    t: usize,
) -> HashMap<usize, f64> {
    let num_nodes = graph.num_nodes();

    // Phase 1: extract the DAG
    let mut nexts: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut degrees: Vec<usize> = vec![0; num_nodes];
    let mut in_queue: Vec<bool> = vec![false; num_nodes];

    let mut queue: Vec<usize> = Vec::with_capacity(num_nodes);
    queue.push(t);
    in_queue[t] = true;

    let mut i = 0;
    while i < queue.len() {
        let v = queue[i];
        i += 1;
        degrees[v] = prevs[v].len();
        for &e in &prevs[v] {
            let u = graph.edge(e).from;
            if !in_queue[u] {
                queue.push(u);
                in_queue[u] = true;
            }
            nexts[u].push(e);
        }
    }

    // Phase 2: compute the load ratios
    let mut node_load: Vec<f64> = vec![0.0; num_nodes];
    let mut edge_load: HashMap<usize, f64> = HashMap::new();

    queue.clear();
    queue.push(s);
    node_load[s] = 1.0;

    let mut i = 0;
    while i < queue.len() {
        let u = queue[i];
        i += 1;
        for &e in &nexts[u] {
            let v = graph.edge(e).to;

            let l = node_load[u] / nexts[u].len() as f64;
            edge_load.insert(e, l);
            node_load[v] += l;

            degrees[v] -= 1;
            if degrees[v] == 0 {
                queue.push(v);
            }
        }
    }

    edge_load
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::srte::Edge;
    use assert_approx_eq::assert_approx_eq;
    use maplit::hashmap;

    fn ratios_as_map(fgs: &ForwardingGraphs, s: usize, t: usize) -> HashMap<usize, f64> {
        fgs.edge_ratios(s, t).iter().map(|er| (er.edge, er.ratio)).collect()
    }

    #[test]
    fn test_one_edge() {
        let topo = Topology::new(vec![Edge { from: 0, to: 1, cost: 1 }], 2);
        let fgs = ForwardingGraphs::new(&topo).unwrap();

        assert_eq!(fgs.edge_ratios(0, 1), &[EdgeRatio { edge: 0, ratio: 1.0 }]);
        assert_eq!(fgs.edge_ratios(1, 0), &[] as &[EdgeRatio]);
    }

    #[test]
    fn test_not_connected() {
        let topo = Topology::new(
            vec![Edge { from: 0, to: 1, cost: 1 }, Edge { from: 2, to: 3, cost: 1 }],
            4,
        );
        let fgs = ForwardingGraphs::new(&topo).unwrap();

        assert_eq!(fgs.edge_ratios(0, 1), &[EdgeRatio { edge: 0, ratio: 1.0 }]);
        assert_eq!(fgs.edge_ratios(2, 3), &[EdgeRatio { edge: 1, ratio: 1.0 }]);
        assert_eq!(fgs.edge_ratios(0, 3), &[] as &[EdgeRatio]);
        assert_eq!(fgs.edge_ratios(3, 0), &[] as &[EdgeRatio]);
    }

    #[test]
    fn test_diamond_splits_evenly() {
        // 0 --> {1, 2} --> 3, all costs equal
        let topo = Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 1 },
                Edge { from: 0, to: 2, cost: 1 },
                Edge { from: 1, to: 3, cost: 1 },
                Edge { from: 2, to: 3, cost: 1 },
            ],
            4,
        );
        let fgs = ForwardingGraphs::new(&topo).unwrap();

        assert_eq!(
            ratios_as_map(&fgs, 0, 3),
            hashmap! {0 => 0.5, 1 => 0.5, 2 => 0.5, 3 => 0.5}
        );
    }

    #[test]
    fn test_strongly_connected_ring() {
        // 0 <-> 1 <-> 2, 0 <-> 3 <-> 2, unit costs
        let topo = Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 1 }, // edge 0
                Edge { from: 1, to: 0, cost: 1 }, // edge 1
                Edge { from: 1, to: 2, cost: 1 }, // edge 2
                Edge { from: 2, to: 1, cost: 1 }, // edge 3
                Edge { from: 0, to: 3, cost: 1 }, // edge 4
                Edge { from: 3, to: 0, cost: 1 }, // edge 5
                Edge { from: 2, to: 3, cost: 1 }, // edge 6
                Edge { from: 3, to: 2, cost: 1 }, // edge 7
            ],
            4,
        );
        let fgs = ForwardingGraphs::new(&topo).unwrap();

        assert_eq!(ratios_as_map(&fgs, 0, 1), hashmap! {0 => 1.0});
        assert_eq!(ratios_as_map(&fgs, 0, 3), hashmap! {4 => 1.0});
        assert_eq!(
            ratios_as_map(&fgs, 0, 2),
            hashmap! {0 => 0.5, 2 => 0.5, 4 => 0.5, 7 => 0.5}
        );
        assert_eq!(
            ratios_as_map(&fgs, 3, 1),
            hashmap! {0 => 0.5, 3 => 0.5, 5 => 0.5, 7 => 0.5}
        );
    }

    #[test]
    fn test_ratios_sorted_without_duplicates() {
        let topo = Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 2 },
                Edge { from: 1, to: 2, cost: 2 },
                Edge { from: 2, to: 3, cost: 1 },
                Edge { from: 0, to: 4, cost: 1 },
                Edge { from: 4, to: 1, cost: 1 },
                Edge { from: 4, to: 5, cost: 3 },
                Edge { from: 5, to: 3, cost: 1 },
            ],
            6,
        );
        let fgs = ForwardingGraphs::new(&topo).unwrap();

        for s in 0..6 {
            for t in 0..6 {
                let ratios = fgs.edge_ratios(s, t);
                for w in ratios.windows(2) {
                    assert!(w[0].edge < w[1].edge, "F[{}][{}] not strictly sorted", s, t);
                }
            }
        }
    }

    #[test]
    fn test_flow_conservation() {
        // three equal-cost paths from 0 to 3 with a shared prefix
        let topo = Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 2 },
                Edge { from: 1, to: 2, cost: 2 },
                Edge { from: 2, to: 3, cost: 1 },
                Edge { from: 0, to: 4, cost: 1 },
                Edge { from: 4, to: 1, cost: 1 },
                Edge { from: 4, to: 5, cost: 3 },
                Edge { from: 5, to: 3, cost: 1 },
            ],
            6,
        );
        let fgs = ForwardingGraphs::new(&topo).unwrap();

        let (s, t) = (0, 3);
        let mut load_in = vec![0.0; 6];
        let mut load_out = vec![0.0; 6];
        for er in fgs.edge_ratios(s, t) {
            load_out[topo.edge(er.edge).from] += er.ratio;
            load_in[topo.edge(er.edge).to] += er.ratio;
        }

        assert_approx_eq!(load_out[s], 1.0);
        assert_approx_eq!(load_in[s], 0.0);
        assert_approx_eq!(load_in[t], 1.0);
        assert_approx_eq!(load_out[t], 0.0);
        for n in 0..6 {
            if n != s && n != t {
                assert_approx_eq!(load_in[n], load_out[n]);
            }
        }
    }

    #[test]
    fn test_shortest_dag_single_path() {
        // the direct edge 0 -> 2 is more expensive than the detour
        let topo = Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 1 },
                Edge { from: 1, to: 2, cost: 1 },
                Edge { from: 0, to: 2, cost: 3 },
            ],
            3,
        );

        let prevs = shortest_dag(&topo, 0).unwrap();

        assert_eq!(prevs, vec![vec![], vec![0], vec![1]]);
    }

    #[test]
    fn test_shortest_dag_direct_edge_wins() {
        let topo = Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 1 },
                Edge { from: 1, to: 2, cost: 1 },
                Edge { from: 0, to: 2, cost: 1 },
            ],
            3,
        );

        let prevs = shortest_dag(&topo, 0).unwrap();

        assert_eq!(prevs, vec![vec![], vec![0], vec![2]]);
    }

    #[test]
    fn test_shortest_dag_keeps_equal_cost_edges() {
        let topo = Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 1 },
                Edge { from: 1, to: 2, cost: 1 },
                Edge { from: 0, to: 2, cost: 2 },
            ],
            3,
        );

        let mut prevs = shortest_dag(&topo, 0).unwrap();
        prevs[2].sort_unstable();

        assert_eq!(prevs, vec![vec![], vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_shortest_dag_source_out_of_range() {
        let topo = Topology::new(Vec::new(), 0);

        assert_eq!(shortest_dag(&topo, 0), Err(SrteError::NodeNotInGraph(0)));
    }

    #[test]
    fn test_split_load_rounds_up() {
        assert_eq!(split_load(4, 0.5), 2);
        assert_eq!(split_load(5, 0.5), 3);
        assert_eq!(split_load(1, 0.25), 1);
        assert_eq!(split_load(0, 0.25), 0);
        assert_eq!(split_load(7, 1.0), 7);
    }
}
