use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geometry::GeoPoint;
use crate::graph::RoadGraph;
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header plus one annotated line per step.
    PlainText,
    /// Bare coordinates, one per line, marked `+` (start), `|` and `-` (goal).
    Basic,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub location: GeoPoint,
    /// Road used to arrive at this step; absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road_type: Option<String>,
    /// Length of the segment arriving at this step.
    pub segment_length: f64,
    pub cumulative_length: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub total_length: f64,
    pub expanded: usize,
    pub start: GeoPoint,
    pub goal: GeoPoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary annotated with road metadata.
    pub fn from_plan(graph: &RoadGraph, plan: &RoutePlan) -> Result<Self> {
        let (Some(&start), Some(&goal)) = (plan.steps.first(), plan.steps.last()) else {
            return Err(Error::EmptyRoutePlan);
        };

        let mut cumulative = 0.0;
        let mut steps = Vec::with_capacity(plan.steps.len());
        for (index, location) in plan.steps.iter().enumerate() {
            let edge = index
                .checked_sub(1)
                .and_then(|previous| graph.edge_between(&plan.steps[previous], location));
            let segment_length = edge.map(|edge| edge.length()).unwrap_or(0.0);
            cumulative += segment_length;
            steps.push(RouteStep {
                index,
                location: *location,
                road_name: edge.map(|edge| edge.road_name().to_string()),
                road_type: edge.map(|edge| edge.road_type().to_string()),
                segment_length,
                cumulative_length: cumulative,
            });
        }

        Ok(Self {
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            total_length: plan.total_length,
            expanded: plan.expanded,
            start,
            goal,
            steps,
        })
    }

    /// Render the summary as text.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Basic => self.render_basic(),
        }
    }

    /// Serialise the summary as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn render_plain(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Route from {} to {} (algorithm: {}, {} hops, {:.3} total, {} nodes expanded):",
            self.start, self.goal, self.algorithm, self.hops, self.total_length, self.expanded
        );
        for step in &self.steps {
            match &step.road_name {
                Some(name) => {
                    let _ = writeln!(
                        out,
                        "{:>3}. {} via {} [{}] +{:.3} ({:.3})",
                        step.index,
                        step.location,
                        display_road_name(name),
                        step.road_type.as_deref().unwrap_or("unknown"),
                        step.segment_length,
                        step.cumulative_length
                    );
                }
                None => {
                    let _ = writeln!(out, "{:>3}. {} (start)", step.index, step.location);
                }
            }
        }
        out
    }

    fn render_basic(&self) -> String {
        let mut out = String::new();
        let len = self.steps.len();
        for (i, step) in self.steps.iter().enumerate() {
            let prefix = if i == 0 {
                '+'
            } else if i + 1 == len {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(out, "{} {},{}", prefix, step.location.x, step.location.y);
        }
        out
    }
}

fn display_road_name(name: &str) -> &str {
    if name.is_empty() {
        "<unnamed road>"
    } else {
        name
    }
}
