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

//! # SRTE
//!
//! The Segment Routing Traffic Engineering model. This module contains the
//! network [`Topology`], the precomputed ECMP [`ForwardingGraphs`], the
//! reversible [`NetworkState`], the per-demand [`PathVar`] variables, and
//! the [`Srte`] engine, which ties them together to apply and search
//! [`Move`]s.
//!
//! All cross-references between structures are integer ids into dense
//! arrays: nodes are `usize` in `[0, N)`, edges are `usize` in `[0, E)`
//! (their insertion order in the topology), and demands are `usize` in
//! `[0, D)`. There are no pointer-linked node objects.

mod topology;
pub use topology::{Edge, Topology};

mod fgraphs;
pub use fgraphs::{split_load, EdgeRatio, ForwardingGraphs};

mod paths;
pub use paths::PathVar;

mod state;
pub use state::{LoadChange, NetworkState};

mod engine;
pub use engine::{Move, Srte, SrteInstance};

pub(crate) mod types;
pub use types::{Demand, SrteError};
