//! Text rendering of the directions panel.

use crate::sdk::routing::route::DirectionStep;
use crate::sdk::session::RouteOutcome;
use std::fmt;

pub const PROMPT: &str =
    "Click on the map to set start point, then click again to set destination and calculate route.";

/// What the directions panel shows for a given session status.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectionsView {
    Prompt,
    Calculating,
    Failed(String),
    Steps(Vec<DirectionStep>),
}

impl DirectionsView {
    pub fn new(is_calculating: bool, outcome: Option<&RouteOutcome>) -> Self {
        if is_calculating {
            return Self::Calculating;
        }
        match outcome {
            None => Self::Prompt,
            Some(RouteOutcome::Error(message)) => Self::Failed(message.clone()),
            Some(RouteOutcome::Directions(steps)) => Self::Steps(steps.clone()),
        }
    }
}

impl fmt::Display for DirectionsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => write!(f, "{}", PROMPT),
            Self::Calculating => write!(f, "Calculating route..."),
            Self::Failed(message) => write!(f, "{}", message),
            Self::Steps(steps) => {
                writeln!(f, "Route Instructions ({} steps)", steps.len())?;
                for step in steps {
                    writeln!(
                        f,
                        "{}. {} ({:.2} miles)",
                        step.index, step.instruction, step.distance_miles
                    )?;
                }
                let total: f64 = steps.iter().map(|s| s.distance_miles).sum();
                write!(f, "Total: {}", format_distance(total))
            }
        }
    }
}

/// Feet under a tenth of a mile, miles otherwise.
pub fn format_distance(miles: f64) -> String {
    if miles < 0.1 {
        format!("{:.0} ft", miles * 5280.0)
    } else {
        format!("{:.2} mi", miles)
    }
}
