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

#![deny(missing_docs)]

//! # LGS: Link-Guided Search for Segment Routing Traffic Engineering
//!
//! This is a library for optimizing the placement of traffic demands in a
//! Segment Routing (SR) enabled IP network. Given a directed topology with
//! per-link capacities and a set of point-to-point demands, it searches for
//! one segment-routed path per demand (a short sequence of waypoint nodes)
//! that minimizes the maximum link utilization of the network.
//!
//! The search is *link guided*: a randomized local search which repeatedly
//! selects a highly utilized link, selects a demand crossing that link, and
//! tries to reroute the demand so that the link's load strictly decreases
//! without pushing any other link above the current maximum utilization.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`srte`]**: The traffic engineering model. It contains the network
//!   [`Topology`](srte::Topology), the precomputed ECMP
//!   [`ForwardingGraphs`](srte::ForwardingGraphs), the reversible
//!   [`NetworkState`](srte::NetworkState), the per-demand
//!   [`PathVar`](srte::PathVar) variables, and the [`Srte`](srte::Srte)
//!   engine which applies and searches [`Move`](srte::Move)s.
//!
//! - **[`wheels`]**: Roulette-wheel selection structures. The
//!   [`StaticWheel`](wheels::StaticWheel) samples edges proportionally to
//!   their weight, and the [`DemandWheel`](wheels::DemandWheel) samples the
//!   sparse, changing set of demands crossing an edge.
//!
//! - **[`edge_index`]**: An [`OrderedEdgeIndex`](edge_index::OrderedEdgeIndex)
//!   which maintains the most utilized edge of the network under incremental
//!   key updates.
//!
//! - **[`solver`]**: The [`LinkGuidedSolver`](solver::LinkGuidedSolver),
//!   which combines the selection structures with the `Srte` engine and
//!   keeps all of them consistent after every accepted move.
//!
//! - **[`parser`]**: Parsers for the line-oriented topology and demand file
//!   formats consumed by the command line driver.
//!
//! - **[`example_networks`]**: Small prepared instances used throughout the
//!   tests and the documentation examples.
//!
//! ## Usage
//!
//! The solver never owns a source of randomness: the caller supplies two
//! numbers in `[0, 1)` per iteration, which keeps every run reproducible.
//!
//! ```
//! use lgs::example_networks;
//! use lgs::solver::{Config, LinkGuidedSolver};
//! use lgs::srte::Srte;
//! use lgs::Error;
//!
//! fn main() -> Result<(), Error> {
//!     let instance = example_networks::dumbbell();
//!     let srte = Srte::new(instance)?;
//!     let mut solver = LinkGuidedSolver::new(srte, Config { alpha: 8.0, beta: 2.0 });
//!
//!     // The driver owns the random source; here, we draw fixed numbers.
//!     for r in [0.3, 0.6, 0.9].iter() {
//!         let max_util = solver.max_utilization();
//!         let edge = match solver.select_edge(*r) {
//!             Some(e) => e,
//!             None => break,
//!         };
//!         let demand = match solver.select_demand(edge, *r) {
//!             Some(d) => d,
//!             None => continue,
//!         };
//!         if let Some(mv) = solver.search(edge, demand, max_util) {
//!             solver.apply_move(&mv);
//!         }
//!     }
//!
//!     println!("max utilization: {:.3}", solver.max_utilization());
//!     Ok(())
//! }
//! ```

// test modules
pub mod example_networks;
mod test;

mod error;

pub mod edge_index;
pub mod parser;
pub mod solver;
pub mod srte;
pub mod wheels;

pub use error::Error;
