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

//! Parsers for the line-oriented topology and demand file formats
//!
//! A topology file starts with a line `<keyword> <N>` giving the node
//! count, followed by a header line and `N` node label lines (all
//! discarded), a blank line, an edge header line and an edge count line
//! (also discarded). Every remaining non-empty line describes one edge
//! with six space-separated fields: `<label> <from> <to> <cost> <capacity>
//! <ignored>`. Edge ids follow the insertion order.
//!
//! A demand file starts with two header lines (discarded); every remaining
//! non-empty line describes one demand with four space-separated fields:
//! `<label> <from> <to> <bandwidth>`. Demand ids follow the insertion
//! order.

use crate::srte::{Demand, Edge, Topology};

use std::fs::read_to_string;
use thiserror::Error;

/// Parse errors of the topology and demand file parsers
#[derive(Error, Debug)]
pub enum ParseError {
    /// The file could not be read
    #[error("Cannot read the input file: {0}")]
    IoError(#[from] std::io::Error),
    /// The file ends before the expected header lines
    #[error("Unexpected end of file")]
    UnexpectedEndOfFile,
    /// A line does not have the expected number of fields
    #[error("Line {line}: expected {expected} fields, found {found}")]
    MissingFields {
        /// 1-based line number
        line: usize,
        /// Number of expected fields
        expected: usize,
        /// Number of fields found
        found: usize,
    },
    /// A field could not be parsed as a number
    #[error("Cannot parse a number: {0}")]
    CannotParseNumber(#[from] std::num::ParseIntError),
    /// An edge references a node outside of the declared node count
    #[error("Line {line}: node {node} is outside of the declared node count")]
    UnknownNode {
        /// 1-based line number
        line: usize,
        /// The offending node id
        node: usize,
    },
}

/// Parses a topology file and returns the topology together with the
/// capacity vector, parallel to the edge list.
pub fn parse_topology(filename: impl AsRef<str>) -> Result<(Topology, Vec<i64>), ParseError> {
    let content = read_to_string(filename.as_ref())?;
    let mut lines = content.lines().enumerate();

    let (_, first) = lines.next().ok_or(ParseError::UnexpectedEndOfFile)?;
    let fields: Vec<&str> = first.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(ParseError::MissingFields { line: 1, expected: 2, found: fields.len() });
    }
    let num_nodes: usize = fields[1].parse()?;

    // skip the node header, the node labels, the separator line, the edge
    // header and the edge count
    for _ in 0..num_nodes + 4 {
        lines.next();
    }

    let mut edges = Vec::new();
    let mut capacities = Vec::new();
    for (i, line) in lines {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(ParseError::MissingFields {
                line: i + 1,
                expected: 6,
                found: fields.len(),
            });
        }
        let from: usize = fields[1].parse()?;
        let to: usize = fields[2].parse()?;
        let cost: u64 = fields[3].parse()?;
        let capacity: i64 = fields[4].parse()?;

        for &node in [from, to].iter() {
            if node >= num_nodes {
                return Err(ParseError::UnknownNode { line: i + 1, node });
            }
        }

        edges.push(Edge { from, to, cost });
        capacities.push(capacity);
    }

    Ok((Topology::new(edges, num_nodes), capacities))
}

/// Parses a demand file and returns the demands in insertion order.
pub fn parse_demands(filename: impl AsRef<str>) -> Result<Vec<Demand>, ParseError> {
    let content = read_to_string(filename.as_ref())?;

    let mut demands = Vec::new();
    for (i, line) in content.lines().enumerate() {
        // the first two lines are headers
        if i <= 1 || line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(ParseError::MissingFields {
                line: i + 1,
                expected: 4,
                found: fields.len(),
            });
        }
        demands.push(Demand {
            from: fields[1].parse()?,
            to: fields[2].parse()?,
            bandwidth: fields[3].parse()?,
        });
    }

    Ok(demands)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    const TOPOLOGY: &str = "\
NODES 3
label x y
node_0 0 0
node_1 1 0
node_2 2 0

EDGES label src dest weight bw delay
4
edge_0 0 1 10 1000 1
edge_1 1 2 10 1000 1

edge_2 0 2 30 2000 1
edge_3 2 0 30 2000 1
";

    const DEMANDS: &str = "\
DEMANDS 2
label src dest bw
demand_0 0 2 150

demand_1 1 2 50
";

    #[test]
    fn test_parse_topology() {
        let path = write_temp_file("lgs_parse_topology.graph", TOPOLOGY);

        let (topo, capacities) = parse_topology(path.to_str().unwrap()).unwrap();

        assert_eq!(topo.num_nodes(), 3);
        assert_eq!(topo.num_edges(), 4);
        assert_eq!(topo.edge(0), Edge { from: 0, to: 1, cost: 10 });
        assert_eq!(topo.edge(2), Edge { from: 0, to: 2, cost: 30 });
        assert_eq!(capacities, vec![1000, 1000, 2000, 2000]);
    }

    #[test]
    fn test_parse_demands() {
        let path = write_temp_file("lgs_parse_demands.demands", DEMANDS);

        let demands = parse_demands(path.to_str().unwrap()).unwrap();

        assert_eq!(
            demands,
            vec![
                Demand { from: 0, to: 2, bandwidth: 150 },
                Demand { from: 1, to: 2, bandwidth: 50 },
            ]
        );
    }

    #[test]
    fn test_missing_file() {
        let result = parse_topology("/nonexistent/lgs.graph");

        assert!(matches!(result, Err(ParseError::IoError(_))));
    }

    #[test]
    fn test_topology_with_wrong_field_count() {
        let path = write_temp_file(
            "lgs_parse_bad_edge.graph",
            "NODES 1\nheader\nnode_0 0 0\n\nEDGES\n0\nedge_0 0 0 1\n",
        );

        let result = parse_topology(path.to_str().unwrap());

        assert!(matches!(
            result,
            Err(ParseError::MissingFields { line: 7, expected: 6, found: 4 })
        ));
    }

    #[test]
    fn test_topology_with_unknown_node() {
        let path = write_temp_file(
            "lgs_parse_unknown_node.graph",
            "NODES 2\nheader\nn0 0 0\nn1 1 0\n\nEDGES\n1\ne0 0 5 1 100 0\n",
        );

        let result = parse_topology(path.to_str().unwrap());

        assert!(matches!(result, Err(ParseError::UnknownNode { line: 8, node: 5 })));
    }

    #[test]
    fn test_demand_with_bad_number() {
        let path = write_temp_file(
            "lgs_parse_bad_demand.demands",
            "DEMANDS 1\nheader\nd0 0 1 many\n",
        );

        let result = parse_demands(path.to_str().unwrap());

        assert!(matches!(result, Err(ParseError::CannotParseNumber(_))));
    }
}
