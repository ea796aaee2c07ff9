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

//! The Link-Guided Search solver

use crate::edge_index::OrderedEdgeIndex;
use crate::srte::{split_load, Move, Srte};
use crate::wheels::{DemandWheel, StaticWheel};

use log::*;

/// Initial capacity of the per-edge demand wheels. Large enough to make
/// grows rare on realistic instances.
const INITIAL_WHEEL_CAPACITY: usize = 64;

/// Configuration of the selection policy.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Concentration of the edge selection. The probability of selecting
    /// edge `e` is `util[e]^alpha / Σ util[j]^alpha`: high values
    /// concentrate the selection on the most utilized edges, while zero
    /// yields a uniform distribution.
    pub alpha: f64,
    /// Concentration of the demand selection within an edge, analogous to
    /// `alpha` but weighted by the utilization contributed by each demand.
    pub beta: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self { alpha: 8.0, beta: 2.0 }
    }
}

/// A Link-Guided Search solver minimizing the maximum link utilization of
/// an [`Srte`] engine.
///
/// The solver owns the engine together with three selection structures,
/// and keeps all of them consistent after every accepted move:
///
/// - a [`StaticWheel`] over edges, weighted by `utilization^alpha`,
/// - one [`DemandWheel`] per edge over the demands crossing it, weighted by
///   `contributed_utilization^beta`,
/// - an [`OrderedEdgeIndex`] keyed by `-utilization`, whose minimum is the
///   most utilized edge.
///
/// The iteration protocol is: [`select_edge`](Self::select_edge) with a
/// first random number, [`select_demand`](Self::select_demand) with a
/// second one, [`search`](Self::search) under the current
/// [`max_utilization`](Self::max_utilization), and
/// [`apply_move`](Self::apply_move) if a move was found.
#[derive(Debug)]
pub struct LinkGuidedSolver {
    srte: Srte,
    cfg: Config,
    edge_wheel: StaticWheel,
    edges_by_util: OrderedEdgeIndex,
    demands_by_edge: Vec<DemandWheel>,
}

impl LinkGuidedSolver {
    /// Creates a new solver owning the given engine.
    pub fn new(srte: Srte, cfg: Config) -> Self {
        let num_edges = srte.instance().graph.num_edges();

        let mut edge_wheel = StaticWheel::new(num_edges);
        let mut edges_by_util = OrderedEdgeIndex::new(num_edges);
        let mut demands_by_edge = Vec::with_capacity(num_edges);
        for e in 0..num_edges {
            let util = srte.utilization(e);
            edge_wheel.set_weight(e, util.powf(cfg.alpha));
            edges_by_util.put(e, -util); // min() is the most utilized edge
            demands_by_edge.push(DemandWheel::new(INITIAL_WHEEL_CAPACITY));
        }

        for (d, demand) in srte.instance().demands.iter().enumerate() {
            for er in srte.fgraphs().edge_ratios(demand.from, demand.to) {
                let load = split_load(demand.bandwidth, er.ratio);
                let util = load as f64 / srte.capacity(er.edge) as f64;
                demands_by_edge[er.edge].put(d, load, util.powf(cfg.beta));
            }
        }

        info!(
            "link-guided solver ready: {} edges, {} demands, alpha = {}, beta = {}",
            num_edges,
            srte.instance().demands.len(),
            cfg.alpha,
            cfg.beta
        );

        Self { srte, cfg, edge_wheel, edges_by_util, demands_by_edge }
    }

    /// Returns the underlying engine.
    pub fn srte(&self) -> &Srte {
        &self.srte
    }

    /// Returns the id of the edge with the highest utilization. If several
    /// edges share the highest utilization, the one with the smallest id is
    /// returned.
    pub fn most_utilized_edge(&self) -> usize {
        self.edges_by_util.min().0
    }

    /// Returns the maximum edge utilization of the network.
    pub fn max_utilization(&self) -> f64 {
        self.srte.utilization(self.most_utilized_edge())
    }

    /// Selects an edge by roulette-wheel selection driven by the random
    /// number `r` in `[0, 1)`. Returns `None` if every edge carries zero
    /// load.
    pub fn select_edge(&self, r: f64) -> Option<usize> {
        self.edge_wheel.roll(r)
    }

    /// Selects a demand crossing the edge by roulette-wheel selection
    /// driven by the random number `r` in `[0, 1)`. Returns `None` if no
    /// demand sends traffic over the edge.
    pub fn select_demand(&self, edge: usize, r: f64) -> Option<usize> {
        self.demands_by_edge[edge].roll(r)
    }

    /// Searches for a move that reduces the load of `edge` by changing the
    /// path of `demand`. Moves that raise the utilization of any edge to
    /// `max_util` or above are not considered. If several moves qualify,
    /// the one reducing the edge's load the most is returned.
    pub fn search(&mut self, edge: usize, demand: usize, max_util: f64) -> Option<Move> {
        self.srte.search(edge, demand, max_util)
    }

    /// Applies the move if possible and returns whether it was applied.
    ///
    /// On success, the selection structures are refreshed for every edge
    /// whose load changed, and the changes are persisted as the new
    /// reference state of the engine.
    pub fn apply_move(&mut self, mv: &Move) -> bool {
        // Apply the move but do not persist the changes yet: the change
        // log drives the incremental updates below.
        if !self.srte.apply_move(mv, false) {
            return false;
        }

        let demand = mv.demand();
        for lc in self.srte.changes() {
            let util = self.srte.utilization(lc.edge);
            self.edge_wheel.set_weight(lc.edge, util.powf(self.cfg.alpha));
            self.edges_by_util.put(lc.edge, -util);

            // Maintain the demand wheel of the edge by comparing the load
            // change with the traffic the demand was sending on the edge
            // before the move.
            let wheel = &mut self.demands_by_edge[lc.edge];
            let old_traffic = wheel.get_load(demand);
            let delta = self.srte.load(lc.edge) - lc.previous_load;
            let new_traffic = old_traffic + delta;
            if new_traffic == 0 {
                wheel.remove(demand);
            } else {
                let new_util = new_traffic as f64 / self.srte.capacity(lc.edge) as f64;
                wheel.put(demand, new_traffic, new_util.powf(self.cfg.beta));
            }
        }

        // Persist now that the structures are updated.
        self.srte.persist_changes();
        true
    }
}
