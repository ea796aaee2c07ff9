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

//! Prepared instances for testing and for the documentation examples

use crate::srte::{Demand, Edge, SrteInstance, Topology};

/// Two nodes joined by a single edge, carrying one demand at utilization
/// 0.7. No move can improve this network.
pub fn single_link() -> SrteInstance {
    SrteInstance {
        graph: Topology::new(vec![Edge { from: 0, to: 1, cost: 1 }], 2),
        max_path_nodes: 4,
        demands: vec![Demand { from: 0, to: 1, bandwidth: 7 }],
        link_capacities: vec![10],
    }
}

/// A diamond `0 -> {1, 2} -> 3` with unit costs and one demand of 4 units,
/// which ECMP splits evenly over both branches.
pub fn diamond() -> SrteInstance {
    SrteInstance {
        graph: Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 1 },
                Edge { from: 0, to: 2, cost: 1 },
                Edge { from: 1, to: 3, cost: 1 },
                Edge { from: 2, to: 3, cost: 1 },
            ],
            4,
        ),
        max_path_nodes: 4,
        demands: vec![Demand { from: 0, to: 3, bandwidth: 4 }],
        link_capacities: vec![10, 10, 10, 10],
    }
}

/// A triangle whose direct edge `0 -> 2` is more expensive than the detour
/// through node 1, so the single demand routes over `0 -> 1 -> 2`.
pub fn triangle_detour() -> SrteInstance {
    SrteInstance {
        graph: Topology::new(
            vec![
                Edge { from: 0, to: 1, cost: 1 },
                Edge { from: 1, to: 2, cost: 1 },
                Edge { from: 0, to: 2, cost: 3 },
            ],
            3,
        ),
        max_path_nodes: 4,
        demands: vec![Demand { from: 0, to: 2, bandwidth: 6 }],
        link_capacities: vec![10, 10, 10],
    }
}

/// Two demands forced over a shared bottleneck edge `2 -> 4`, while a
/// costlier parallel path through node 3 has spare capacity. Rerouting one
/// demand over the detour halves the maximum utilization.
pub fn dumbbell() -> SrteInstance {
    SrteInstance {
        graph: Topology::new(
            vec![
                Edge { from: 0, to: 2, cost: 1 }, // edge 0
                Edge { from: 1, to: 2, cost: 1 }, // edge 1
                Edge { from: 2, to: 4, cost: 1 }, // edge 2, bottleneck
                Edge { from: 0, to: 3, cost: 2 }, // edge 3
                Edge { from: 3, to: 4, cost: 2 }, // edge 4
            ],
            5,
        ),
        max_path_nodes: 4,
        demands: vec![
            Demand { from: 0, to: 4, bandwidth: 6 },
            Demand { from: 1, to: 4, bandwidth: 6 },
        ],
        link_capacities: vec![10, 10, 10, 10, 10],
    }
}

/// A `k x k` grid with bidirectional unit-cost edges. Every even row
/// carries one west-to-east demand at 90% of the link capacity, while the
/// odd rows are left idle, so that waypoints through idle rows can relieve
/// the loaded ones.
pub fn grid(k: usize) -> SrteInstance {
    assert!(k >= 2, "grid requires at least 2x2 nodes");

    let node = |r: usize, c: usize| r * k + c;

    let mut edges = Vec::new();
    for r in 0..k {
        for c in 0..k {
            if c + 1 < k {
                edges.push(Edge { from: node(r, c), to: node(r, c + 1), cost: 1 });
                edges.push(Edge { from: node(r, c + 1), to: node(r, c), cost: 1 });
            }
            if r + 1 < k {
                edges.push(Edge { from: node(r, c), to: node(r + 1, c), cost: 1 });
                edges.push(Edge { from: node(r + 1, c), to: node(r, c), cost: 1 });
            }
        }
    }

    let link_capacities = vec![100; edges.len()];
    let demands = (0..k)
        .step_by(2)
        .map(|r| Demand { from: node(r, 0), to: node(r, k - 1), bandwidth: 90 })
        .collect();

    SrteInstance {
        graph: Topology::new(edges, k * k),
        max_path_nodes: 4,
        demands,
        link_capacities,
    }
}
