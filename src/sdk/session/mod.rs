//! Click-driven route session.
//!
//! A session sequences map clicks into an origin, a destination and exactly
//! one route request, then publishes the outcome for the directions panel.

pub mod controller;
pub mod state;

pub use controller::{SessionController, SessionEvent, SessionHandle};
pub use state::{RouteOutcome, RouteSessionState};

use crate::sdk::directions::DirectionsView;
use crate::sdk::map::canvas::{Graphic, GraphicId};
use crate::sdk::map::geometry::{MapPoint, Marker};
use crate::sdk::map::graphics::GraphicStore;
use crate::sdk::routing::error::RouteError;
use crate::sdk::routing::route::{DirectionStep, RouteRequester, SolvedRoute};
use serde::Serialize;
use std::sync::Arc;

/// A route calculation the session wants run. `generation` ties the result
/// back to the session that asked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub generation: u64,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub state: RouteSessionState,
    pub markers: Vec<Marker>,
    pub directions: Vec<DirectionStep>,
    pub error: Option<String>,
    pub graphics: Vec<(GraphicId, Graphic)>,
}

pub struct RouteSession {
    store: GraphicStore,
    requester: Arc<RouteRequester>,
    state: RouteSessionState,
    outcome: Option<RouteOutcome>,
    is_calculating: bool,
    generation: u64,
}

impl RouteSession {
    pub fn new(store: GraphicStore, requester: Arc<RouteRequester>) -> Self {
        Self {
            store,
            requester,
            state: RouteSessionState::Empty,
            outcome: None,
            is_calculating: false,
            generation: 0,
        }
    }

    /// Applies a map click. Returns the route request to run when this click
    /// placed the destination.
    pub fn on_click(&mut self, point: MapPoint) -> Option<RouteRequest> {
        let request = match self.state {
            RouteSessionState::Empty => {
                self.store.add(Marker::origin(point));
                self.state = RouteSessionState::AwaitingDestination;
                None
            }
            RouteSessionState::AwaitingDestination => {
                self.store.add(Marker::destination(point));
                self.state = RouteSessionState::Resolving;
                self.outcome = None;
                self.is_calculating = true;
                self.generation += 1;
                Some(RouteRequest {
                    generation: self.generation,
                    markers: self.store.markers().copied().collect(),
                })
            }
            RouteSessionState::Resolving => {
                log::debug!("Ignoring click at {} while a route is resolving", point);
                None
            }
            RouteSessionState::Resolved | RouteSessionState::Failed => {
                self.reset();
                self.store.add(Marker::origin(point));
                self.state = RouteSessionState::AwaitingDestination;
                None
            }
        };
        debug_assert_eq!(self.store.count(), self.state.expected_markers());
        request
    }

    /// Publishes the result of a request issued by [`RouteSession::on_click`].
    pub fn on_route_finished(&mut self, generation: u64, result: Result<SolvedRoute, RouteError>) {
        if generation != self.generation || self.state != RouteSessionState::Resolving {
            log::warn!(
                "Dropping stale route result (generation {}, current {})",
                generation,
                self.generation
            );
            return;
        }

        self.is_calculating = false;
        match result {
            Ok(solved) => {
                let steps = self.requester.publish(solved, &mut self.store);
                self.outcome = Some(RouteOutcome::Directions(steps));
                self.state = RouteSessionState::Resolved;
            }
            Err(e) => {
                log::warn!("Route calculation failed: {}", e);
                self.outcome = Some(RouteOutcome::Error(e.to_string()));
                self.state = RouteSessionState::Failed;
            }
        }
    }

    /// The panel's "clear" action. Also abandons any request in flight.
    pub fn clear(&mut self) {
        self.reset();
        self.generation += 1;
        self.state = RouteSessionState::Empty;
    }

    fn reset(&mut self) {
        self.store.clear();
        self.outcome = None;
        self.is_calculating = false;
    }

    pub fn state(&self) -> RouteSessionState {
        self.state
    }

    pub fn outcome(&self) -> Option<&RouteOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_calculating(&self) -> bool {
        self.is_calculating
    }

    pub fn marker_count(&self) -> usize {
        self.store.count()
    }

    pub fn directions(&self) -> &[DirectionStep] {
        match &self.outcome {
            Some(RouteOutcome::Directions(steps)) => steps.as_slice(),
            _ => &[],
        }
    }

    pub fn route_error(&self) -> Option<&str> {
        match &self.outcome {
            Some(RouteOutcome::Error(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn requester(&self) -> Arc<RouteRequester> {
        Arc::clone(&self.requester)
    }

    pub fn store(&self) -> &GraphicStore {
        &self.store
    }

    pub fn view(&self) -> DirectionsView {
        DirectionsView::new(self.is_calculating, self.outcome.as_ref())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            markers: self.store.markers().copied().collect(),
            directions: self.directions().to_vec(),
            error: self.route_error().map(str::to_string),
            graphics: self.store.canvas().graphics(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::map::canvas::{MarkerSymbol, MemoryCanvas};
    use crate::sdk::map::geometry::MarkerKind;
    use crate::sdk::routing::route::tests::{line, FakeProvider};

    fn session() -> RouteSession {
        let store = GraphicStore::new(
            Box::new(MemoryCanvas::new()),
            MarkerSymbol::circle("white", 8.0),
            MarkerSymbol::circle("black", 8.0),
        );
        let requester = RouteRequester::new(FakeProvider::returning(vec![]), line());
        RouteSession::new(store, Arc::new(requester))
    }

    fn point(lon: f64, lat: f64) -> MapPoint {
        MapPoint::new(lon, lat).unwrap()
    }

    fn solved(n: usize) -> SolvedRoute {
        SolvedRoute {
            paths: vec![vec![point(-118.40, 34.20), point(-118.35, 34.25)]],
            steps: (1..=n)
                .map(|index| DirectionStep {
                    index,
                    instruction: format!("Step {}", index),
                    distance_miles: 0.5,
                })
                .collect(),
        }
    }

    #[test]
    fn first_click_places_origin() {
        let mut session = session();
        assert!(session.on_click(point(-118.40, 34.20)).is_none());
        assert_eq!(session.state(), RouteSessionState::AwaitingDestination);
        assert_eq!(session.marker_count(), 1);
        assert_eq!(session.store().markers().next().unwrap().kind, MarkerKind::Origin);
    }

    #[test]
    fn second_click_requests_route_with_both_markers() {
        let mut session = session();
        session.on_click(point(-118.40, 34.20));
        let request = session.on_click(point(-118.35, 34.25)).unwrap();

        assert_eq!(session.state(), RouteSessionState::Resolving);
        assert!(session.is_calculating());
        assert_eq!(request.markers.len(), 2);
        assert_eq!(request.markers[0], Marker::origin(point(-118.40, 34.20)));
        assert_eq!(request.markers[1], Marker::destination(point(-118.35, 34.25)));
    }

    #[test]
    fn action_cycles_on_marker_count() {
        let mut session = session();
        for round in 0..3 {
            let n = session.marker_count();
            let request = session.on_click(point(-118.0 - round as f64 * 0.1, 34.0));
            match n {
                0 => assert!(request.is_none() && session.marker_count() == 1),
                1 => {
                    let request = request.unwrap();
                    session.on_route_finished(request.generation, Ok(solved(2)));
                    assert_eq!(session.marker_count(), 2);
                }
                _ => assert!(request.is_none() && session.marker_count() == 1),
            }
        }
        // 1 + 1 + reset: the third click restarted the cycle
        assert_eq!(session.state(), RouteSessionState::AwaitingDestination);
    }

    #[test]
    fn third_click_resets_to_a_single_origin() {
        let mut session = session();
        session.on_click(point(-118.40, 34.20));
        let request = session.on_click(point(-118.35, 34.25)).unwrap();
        session.on_route_finished(request.generation, Ok(solved(3)));
        assert_eq!(session.directions().len(), 3);
        assert!(session.store().has_route_line());

        session.on_click(point(-118.30, 34.30));

        assert_eq!(session.marker_count(), 1);
        assert_eq!(session.store().markers().next().unwrap().kind, MarkerKind::Origin);
        assert!(session.directions().is_empty());
        assert!(session.route_error().is_none());
        assert!(!session.store().has_route_line());
        assert_eq!(session.store().canvas().graphics().len(), 1);
    }

    #[test]
    fn failure_keeps_markers_and_reports_error() {
        let mut session = session();
        session.on_click(point(-118.40, 34.20));
        let request = session.on_click(point(-118.35, 34.25)).unwrap();
        assert!(session.is_calculating());

        session.on_route_finished(
            request.generation,
            Err(RouteError::RouteUnavailable("Unable to complete operation.".into())),
        );

        assert!(!session.is_calculating());
        assert_eq!(session.state(), RouteSessionState::Failed);
        assert_eq!(session.route_error(), Some("Unable to complete operation."));
        assert!(session.directions().is_empty());
        assert_eq!(session.marker_count(), 2);
        assert!(!session.store().has_route_line());

        // next click starts over
        session.on_click(point(-118.30, 34.30));
        assert_eq!(session.marker_count(), 1);
        assert!(session.route_error().is_none());
    }

    #[test]
    fn clicks_while_resolving_are_ignored() {
        let mut session = session();
        session.on_click(point(-118.40, 34.20));
        session.on_click(point(-118.35, 34.25)).unwrap();

        assert!(session.on_click(point(-118.30, 34.30)).is_none());
        assert!(session.on_click(point(-118.20, 34.30)).is_none());

        assert_eq!(session.state(), RouteSessionState::Resolving);
        assert_eq!(session.marker_count(), 2);
    }

    #[test]
    fn clear_while_resolving_discards_the_late_result() {
        let mut session = session();
        session.on_click(point(-118.40, 34.20));
        let request = session.on_click(point(-118.35, 34.25)).unwrap();

        session.clear();
        session.on_route_finished(request.generation, Ok(solved(3)));

        assert_eq!(session.state(), RouteSessionState::Empty);
        assert_eq!(session.marker_count(), 0);
        assert!(session.outcome().is_none());
        assert!(!session.is_calculating());
        assert!(session.store().canvas().graphics().is_empty());
    }

    #[test]
    fn new_request_clears_the_previous_outcome() {
        let mut session = session();
        session.on_click(point(-118.40, 34.20));
        let request = session.on_click(point(-118.35, 34.25)).unwrap();
        session.on_route_finished(request.generation, Err(RouteError::InsufficientStops));
        session.on_click(point(-118.40, 34.20));

        session.on_click(point(-118.35, 34.25)).unwrap();

        assert!(session.outcome().is_none());
        assert!(session.is_calculating());
    }

    #[test]
    fn snapshot_serializes() {
        let mut session = session();
        session.on_click(point(-118.40, 34.20));
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["state"], "AwaitingDestination");
        assert_eq!(json["markers"][0]["kind"], "origin");
        assert!(json["error"].is_null());
    }
}
