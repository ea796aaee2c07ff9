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

use lgs::parser;
use lgs::solver::{Config, LinkGuidedSolver};
use lgs::srte::{Srte, SrteInstance};

use clap::Parser;
use log::*;
use rand::prelude::*;
use serde::Serialize;
use std::error::Error;
use std::time::Instant;

/// Minimize the maximum link utilization of a segment-routed network using
/// Link-Guided Search. The program reads a topology file and a demand
/// file, runs the search for the requested number of iterations, and
/// reports the initial and final maximum link utilization.
#[derive(Parser, Debug)]
#[clap(name = "lgs")]
struct CommandLineArguments {
    /// Topology file of the network
    #[clap(short = 'n', long = "network")]
    network_file: String,
    /// Traffic demand file
    #[clap(short = 'd', long = "demands")]
    demand_file: String,
    /// Overwrite the cost of every edge with 1 after parsing
    #[clap(short = 'u', long)]
    unary_weights: bool,
    /// Factor by which every bandwidth and capacity is multiplied
    #[clap(long, default_value = "1000")]
    scaling: i64,
    /// Maximum number of intermediate nodes per path
    #[clap(long, default_value = "4")]
    max_nodes: usize,
    /// Number of search iterations to perform
    #[clap(short = 'i', long, default_value = "1000")]
    max_iterations: usize,
    /// Seed of the random number generator, to get reproducible runs
    #[clap(short = 's', long, default_value = "42")]
    seed: u64,
    /// Edge selection concentration: the probability of selecting an edge
    /// is proportional to its utilization raised to this power
    #[clap(long, default_value = "8.0")]
    alpha: f64,
    /// Demand selection concentration, analogous to alpha for the demands
    /// crossing the selected edge
    #[clap(long, default_value = "2.0")]
    beta: f64,
    /// Store the result summary in a json file
    #[clap(long = "json")]
    json_filename: Option<String>,
}

/// Result summary written by the `--json` option.
#[derive(Debug, Serialize)]
struct ResultSummary {
    initial_max_utilization: f64,
    final_max_utilization: f64,
    iterations: usize,
    accepted_moves: usize,
    optimization_time_ms: u64,
    total_time_ms: u64,
}

fn validate_args(args: &CommandLineArguments) -> Result<(), String> {
    if args.network_file.is_empty() {
        return Err("missing network file".to_string());
    }
    if args.demand_file.is_empty() {
        return Err("missing demand file".to_string());
    }
    if args.scaling <= 0 {
        return Err(format!("scaling should be greater than 0, got: {}", args.scaling));
    }
    if args.max_nodes == 0 {
        return Err(format!(
            "paths must allow at least 1 intermediate node, got: {}",
            args.max_nodes
        ));
    }
    if args.alpha < 0.0 {
        return Err(format!("parameter alpha must be non-negative, got: {}", args.alpha));
    }
    if args.beta < 0.0 {
        return Err(format!("parameter beta must be non-negative, got: {}", args.beta));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CommandLineArguments::parse();
    pretty_env_logger::init();
    validate_args(&args)?;

    let total_timer = Instant::now();

    let (mut topology, mut capacities) = parser::parse_topology(&args.network_file)?;
    let mut demands = parser::parse_demands(&args.demand_file)?;
    info!(
        "parsed {} nodes, {} edges and {} demands",
        topology.num_nodes(),
        topology.num_edges(),
        demands.len()
    );

    if args.scaling > 1 {
        for demand in demands.iter_mut() {
            demand.bandwidth *= args.scaling;
        }
        for capacity in capacities.iter_mut() {
            *capacity *= args.scaling;
        }
    }
    if args.unary_weights {
        topology.set_unary_costs();
    }

    let srte = Srte::new(SrteInstance {
        graph: topology,
        max_path_nodes: args.max_nodes + 2, // + source and destination
        demands,
        link_capacities: capacities,
    })?;
    let mut solver = LinkGuidedSolver::new(srte, Config { alpha: args.alpha, beta: args.beta });

    let initial_mlu = solver.max_utilization();
    let mut accepted = 0;

    let optimization_timer = Instant::now();
    let mut rng = StdRng::seed_from_u64(args.seed);
    for iter in 0..args.max_iterations {
        let max_util = solver.max_utilization();

        // Select the edge to improve: the more utilized, the more likely.
        let edge = match solver.select_edge(rng.gen()) {
            Some(e) => e,
            None => {
                warn!("no edge carries any traffic, stopping early");
                break;
            }
        };

        // Select a demand crossing the edge, then search for a move that
        // reduces the edge's load without worsening the network.
        let demand = match solver.select_demand(edge, rng.gen()) {
            Some(d) => d,
            None => continue,
        };
        let mv = match solver.search(edge, demand, max_util) {
            Some(mv) => mv,
            None => continue,
        };

        if solver.apply_move(&mv) {
            accepted += 1;
            debug!(
                "iter {}: applied {:?}, max utilization is now {:.6}",
                iter,
                mv,
                solver.max_utilization()
            );
        }
    }
    let optimization_time_ms = optimization_timer.elapsed().as_millis() as u64;

    let final_mlu = solver.max_utilization();
    let total_time_ms = total_timer.elapsed().as_millis() as u64;

    println!("Initial max utilization: {:.3}", initial_mlu);
    println!("Final max utilization:   {:.3}", final_mlu);
    println!("Accepted moves:          {}", accepted);
    println!("Optimization time:       {} ms", optimization_time_ms);
    println!("Total time:              {} ms", total_time_ms);

    if let Some(filename) = &args.json_filename {
        let summary = ResultSummary {
            initial_max_utilization: initial_mlu,
            final_max_utilization: final_mlu,
            iterations: args.max_iterations,
            accepted_moves: accepted,
            optimization_time_ms,
            total_time_ms,
        };
        std::fs::write(filename, serde_json::to_string_pretty(&summary)?)?;
        info!("wrote the result summary to {}", filename);
    }

    Ok(())
}
