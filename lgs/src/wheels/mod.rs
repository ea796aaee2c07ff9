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

//! # Roulette Wheels
//!
//! Weighted sampling structures based on implicit binary sum trees: the
//! weights live in the leaves, every internal node holds the sum of its
//! children, and a *roll* descends from the root with a budget drawn in
//! `[0, total)`. Both selection and weight updates run in `O(log n)`.
//!
//! Two variants exist:
//!
//! - [`StaticWheel`]: a fixed universe of elements `0..n`, used to select
//!   edges. Elements never appear or disappear, only their weight changes.
//! - [`DemandWheel`]: a sparse, growable membership, used to select the
//!   demands currently crossing an edge. Elements can be inserted, updated
//!   and removed, and each element carries an integer load next to its
//!   sampling weight.

mod static_wheel;
pub use static_wheel::StaticWheel;

mod demand_wheel;
pub use demand_wheel::DemandWheel;
