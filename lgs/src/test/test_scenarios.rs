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

//! End-to-end scenarios exercising the full public surface of the crate.

use crate::example_networks::*;
use crate::solver::{Config, LinkGuidedSolver};
use crate::srte::Srte;

use assert_approx_eq::assert_approx_eq;

#[test]
fn test_single_link_cannot_be_improved() {
    let srte = Srte::new(single_link()).unwrap();
    let mut solver = LinkGuidedSolver::new(srte, Config { alpha: 8.0, beta: 2.0 });

    assert_approx_eq!(solver.max_utilization(), 0.7);
    assert_eq!(solver.select_edge(0.5), Some(0));
    assert_eq!(solver.select_demand(0, 0.5), Some(0));

    // no move can reduce the load of the only carrying edge
    assert_eq!(solver.search(0, 0, 0.7), None);
    assert_approx_eq!(solver.max_utilization(), 0.7);
}

#[test]
fn test_balanced_diamond_makes_no_move() {
    let srte = Srte::new(diamond()).unwrap();
    let mut solver = LinkGuidedSolver::new(srte, Config { alpha: 8.0, beta: 2.0 });

    for e in 0..4 {
        assert_eq!(solver.srte().load(e), 2);
    }
    assert_approx_eq!(solver.max_utilization(), 0.2);

    // under the strict guard, no move strictly improves any edge
    let max_util = solver.max_utilization();
    for edge in 0..4 {
        if let Some(demand) = solver.select_demand(edge, 0.5) {
            assert_eq!(solver.search(edge, demand, max_util), None);
        }
    }
    assert_approx_eq!(solver.max_utilization(), 0.2);
}

#[test]
fn test_triangle_detour_is_stuck_at_initial_mlu() {
    let srte = Srte::new(triangle_detour()).unwrap();
    let mut solver = LinkGuidedSolver::new(srte, Config { alpha: 8.0, beta: 2.0 });

    assert_eq!(solver.srte().load(0), 6);
    assert_eq!(solver.srte().load(1), 6);
    assert_eq!(solver.srte().load(2), 0);
    assert_approx_eq!(solver.max_utilization(), 0.6);

    // the initial path is trivial, so clear has nothing to collapse, and
    // every insertion either cancels out or violates the guard
    let max_util = solver.max_utilization();
    for edge in 0..3 {
        assert_eq!(solver.search(edge, 0, max_util), None);
    }
    assert_approx_eq!(solver.max_utilization(), 0.6);
}

#[test]
fn test_dumbbell_driver_loop_halves_mlu() {
    let srte = Srte::new(dumbbell()).unwrap();
    let mut solver = LinkGuidedSolver::new(srte, Config { alpha: 8.0, beta: 2.0 });
    assert_approx_eq!(solver.max_utilization(), 1.2);

    // a deterministic stand-in for the driver's random stream
    let stream = [0.9, 0.1, 0.5, 0.5, 0.2, 0.8, 0.7, 0.3];
    let mut draws = stream.iter().cycle();
    let mut draw = || *draws.next().unwrap();

    for _ in 0..16 {
        let max_util = solver.max_utilization();
        let edge = match solver.select_edge(draw()) {
            Some(e) => e,
            None => break,
        };
        let demand = match solver.select_demand(edge, draw()) {
            Some(d) => d,
            None => continue,
        };
        if let Some(mv) = solver.search(edge, demand, max_util) {
            assert!(solver.apply_move(&mv));
        }
    }

    assert!(solver.max_utilization() <= 0.6 + 1e-9);
}
