use crate::sdk::routing::route::DirectionStep;
use serde::Serialize;

/// Where a route session stands. Each state implies a marker count:
/// `Empty` 0, `AwaitingDestination` 1, everything else 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RouteSessionState {
    #[default]
    Empty,
    AwaitingDestination,
    /// Route request in flight; holds the session lock.
    Resolving,
    Resolved,
    /// Request failed; markers stay so the next click starts over.
    Failed,
}

impl RouteSessionState {
    pub fn expected_markers(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::AwaitingDestination => 1,
            Self::Resolving | Self::Resolved | Self::Failed => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteOutcome {
    Directions(Vec<DirectionStep>),
    Error(String),
}
