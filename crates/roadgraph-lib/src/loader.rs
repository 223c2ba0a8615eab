//! Loader for the plain-text road map format.
//!
//! Each non-empty line describes one directed road segment:
//!
//! ```text
//! <lat1> <lon1> <lat2> <lon2> "<road name>" <road type>
//! ```
//!
//! Lines starting with `#` are comments. Both endpoints become vertices and
//! the segment length is the great-circle distance between them in
//! kilometres. Two-way roads are written as two lines, one per direction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::GeoPoint;
use crate::graph::RoadGraph;

/// One parsed line of a road map file.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub road_name: String,
    pub road_type: String,
}

/// Load a road map file into a new graph.
pub fn load_road_map(path: impl AsRef<Path>) -> Result<RoadGraph> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading road map");
    let file = File::open(path)?;
    let graph = parse_road_map(BufReader::new(file))?;
    info!(
        path = %path.display(),
        vertices = graph.num_vertices(),
        edges = graph.num_edges(),
        "loaded road map"
    );
    Ok(graph)
}

/// Parse road map text from any buffered reader into a new graph.
pub fn parse_road_map<R: BufRead>(reader: R) -> Result<RoadGraph> {
    let mut graph = RoadGraph::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(segment) = parse_segment(&line, index + 1)? {
            add_segment(&mut graph, segment, index + 1)?;
        }
    }
    Ok(graph)
}

fn add_segment(graph: &mut RoadGraph, segment: RoadSegment, line: usize) -> Result<()> {
    graph.add_vertex(segment.from);
    graph.add_vertex(segment.to);
    let length = segment.from.distance(&segment.to);
    graph
        .add_edge(
            segment.from,
            segment.to,
            segment.road_name,
            segment.road_type,
            length,
        )
        .map_err(|error| Error::MapParse {
            line,
            message: error.to_string(),
        })
}

/// Parse a single line. Blank lines and comments yield `None`.
pub fn parse_segment(line: &str, line_number: usize) -> Result<Option<RoadSegment>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let malformed = |message: String| Error::MapParse {
        line: line_number,
        message,
    };

    let tokens = tokenize(trimmed).map_err(|message| malformed(message.to_string()))?;
    if tokens.len() != 6 {
        return Err(malformed(format!(
            "expected 6 fields (4 coordinates, road name, road type), found {}",
            tokens.len()
        )));
    }

    let mut coordinates = [0.0f64; 4];
    for (slot, token) in coordinates.iter_mut().zip(&tokens[..4]) {
        *slot = token
            .parse()
            .ok()
            .filter(|value: &f64| value.is_finite())
            .ok_or_else(|| malformed(format!("invalid coordinate '{token}'")))?;
    }

    Ok(Some(RoadSegment {
        from: GeoPoint::new(coordinates[0], coordinates[1]),
        to: GeoPoint::new(coordinates[2], coordinates[3]),
        road_name: tokens[4].clone(),
        road_type: tokens[5].clone(),
    }))
}

/// Split on whitespace, keeping double-quoted runs (which may be empty) as
/// single tokens.
fn tokenize(line: &str) -> std::result::Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => return Err("unterminated quoted road name"),
                }
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}
