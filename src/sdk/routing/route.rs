use super::error::{RouteError, RoutingError};
use super::service::RoutingProvider;
use crate::sdk::map::canvas::LineSymbol;
use crate::sdk::map::geometry::{MapPoint, Marker, MarkerKind};
use crate::sdk::map::graphics::GraphicStore;
use serde::Serialize;
use std::sync::Arc;

/// One line of turn-by-turn output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionStep {
    /// 1-based position along the route.
    pub index: usize,
    pub instruction: String,
    /// Rounded to 2 decimals.
    pub distance_miles: f64,
}

/// A route that came back from the service but is not drawn yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedRoute {
    pub paths: Vec<Vec<MapPoint>>,
    pub steps: Vec<DirectionStep>,
}

fn round_miles(length: f64) -> f64 {
    (length * 100.0).round() / 100.0
}

/// Builds the stop list from the session markers, asks the provider for
/// directions and turns the first candidate into steps.
pub struct RouteRequester {
    provider: Arc<dyn RoutingProvider>,
    route_line: LineSymbol,
}

impl RouteRequester {
    pub fn new(provider: Arc<dyn RoutingProvider>, route_line: LineSymbol) -> Self {
        Self {
            provider,
            route_line,
        }
    }

    pub async fn solve(&self, markers: &[Marker]) -> Result<SolvedRoute, RouteError> {
        let origin = markers.iter().find(|m| m.kind == MarkerKind::Origin);
        let destination = markers.iter().find(|m| m.kind == MarkerKind::Destination);
        let (Some(origin), Some(destination)) = (origin, destination) else {
            log::debug!("Route requested with {} marker(s); skipping", markers.len());
            return Err(RouteError::InsufficientStops);
        };
        let stops = [origin.location, destination.location];

        log::info!("Requesting route {} → {}", stops[0], stops[1]);
        let candidates = self.provider.solve(&stops).await.map_err(|e| {
            log::error!("Error calculating route: {}", e);
            RouteError::from(e)
        })?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or(RouteError::from(RoutingError::NoRoute))?;
        if first.directions.is_empty() {
            return Err(RouteError::RouteUnavailable(
                "Route returned no directions".to_string(),
            ));
        }

        let steps = first
            .directions
            .into_iter()
            .enumerate()
            .map(|(i, feature)| DirectionStep {
                index: i + 1,
                instruction: feature.text,
                distance_miles: round_miles(feature.length_miles),
            })
            .collect::<Vec<_>>();

        log::info!("Route solved with {} steps", steps.len());
        Ok(SolvedRoute {
            paths: first.paths,
            steps,
        })
    }

    /// Draws the route line through the store so it is cleared with the
    /// markers, and hands back the steps.
    pub fn publish(&self, solved: SolvedRoute, store: &mut GraphicStore) -> Vec<DirectionStep> {
        store.add_route_line(solved.paths, self.route_line.clone());
        solved.steps
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sdk::map::canvas::{Graphic, MarkerSymbol, MemoryCanvas};
    use crate::sdk::routing::service::{DirectionFeature, RouteCandidate};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider double that records every stop list it is asked to solve.
    pub(crate) struct FakeProvider {
        pub calls: Mutex<Vec<Vec<MapPoint>>>,
        pub response: Mutex<Option<Result<Vec<RouteCandidate>, RoutingError>>>,
    }

    impl FakeProvider {
        pub fn returning(candidates: Vec<RouteCandidate>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response: Mutex::new(Some(Ok(candidates))),
            })
        }

        pub fn failing(err: RoutingError) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response: Mutex::new(Some(Err(err))),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RoutingProvider for FakeProvider {
        async fn solve(&self, stops: &[MapPoint]) -> Result<Vec<RouteCandidate>, RoutingError> {
            self.calls.lock().unwrap().push(stops.to_vec());
            match self.response.lock().unwrap().as_ref() {
                Some(Ok(candidates)) => Ok(candidates.clone()),
                Some(Err(e)) => Err(RoutingError::RawApiError(e.to_string())),
                None => Err(RoutingError::NoRoute),
            }
        }
    }

    pub(crate) fn candidate(lengths: &[f64]) -> RouteCandidate {
        RouteCandidate {
            paths: vec![vec![
                MapPoint::new(-118.40, 34.20).unwrap(),
                MapPoint::new(-118.35, 34.25).unwrap(),
            ]],
            directions: lengths
                .iter()
                .enumerate()
                .map(|(i, &length_miles)| DirectionFeature {
                    text: format!("Step {}", i + 1),
                    length_miles,
                })
                .collect(),
        }
    }

    pub(crate) fn line() -> LineSymbol {
        LineSymbol {
            color: [5, 150, 255],
            width: 3.0,
        }
    }

    fn markers() -> Vec<Marker> {
        vec![
            Marker::origin(MapPoint::new(-118.40, 34.20).unwrap()),
            Marker::destination(MapPoint::new(-118.35, 34.25).unwrap()),
        ]
    }

    #[tokio::test]
    async fn fewer_than_two_stops_never_calls_the_provider() {
        let provider = FakeProvider::returning(vec![candidate(&[1.0])]);
        let requester = RouteRequester::new(provider.clone(), line());

        assert_eq!(requester.solve(&[]).await, Err(RouteError::InsufficientStops));
        assert_eq!(
            requester.solve(&markers()[..1]).await,
            Err(RouteError::InsufficientStops)
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn steps_follow_feature_order_with_rounded_distances() {
        let provider = FakeProvider::returning(vec![
            candidate(&[0.0, 1.23456, 0.005, 12.999]),
            candidate(&[99.0]),
        ]);
        let requester = RouteRequester::new(provider.clone(), line());

        let solved = requester.solve(&markers()).await.unwrap();

        let indices: Vec<_> = solved.steps.iter().map(|s| s.index).collect();
        assert_eq!(indices, [1, 2, 3, 4]);
        let distances: Vec<_> = solved.steps.iter().map(|s| s.distance_miles).collect();
        assert_eq!(distances, [0.0, 1.23, 0.01, 13.0]);
        assert_eq!(solved.steps[3].instruction, "Step 4");

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0], MapPoint::new(-118.40, 34.20).unwrap());
        assert_eq!(calls[0][1], MapPoint::new(-118.35, 34.25).unwrap());
    }

    #[tokio::test]
    async fn stops_are_ordered_origin_first() {
        let provider = FakeProvider::returning(vec![candidate(&[1.0])]);
        let requester = RouteRequester::new(provider.clone(), line());
        let mut reversed = markers();
        reversed.reverse();

        requester.solve(&reversed).await.unwrap();

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls[0][0].longitude, -118.40);
    }

    #[tokio::test]
    async fn zero_candidates_is_route_unavailable() {
        let requester = RouteRequester::new(FakeProvider::returning(vec![]), line());
        assert!(matches!(
            requester.solve(&markers()).await,
            Err(RouteError::RouteUnavailable(msg)) if msg.contains("No route")
        ));
    }

    #[tokio::test]
    async fn candidate_without_directions_is_route_unavailable() {
        let requester = RouteRequester::new(FakeProvider::returning(vec![candidate(&[])]), line());
        assert!(matches!(
            requester.solve(&markers()).await,
            Err(RouteError::RouteUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn provider_failure_carries_its_message() {
        let provider = FakeProvider::failing(RoutingError::NoRoute);
        let requester = RouteRequester::new(provider, line());
        match requester.solve(&markers()).await {
            Err(RouteError::RouteUnavailable(msg)) => {
                assert!(msg.contains("No route found"), "{}", msg)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn publish_draws_one_tagged_line() {
        let requester = RouteRequester::new(FakeProvider::returning(vec![]), line());
        let mut store = GraphicStore::new(
            Box::new(MemoryCanvas::new()),
            MarkerSymbol::circle("white", 8.0),
            MarkerSymbol::circle("black", 8.0),
        );
        let solved = SolvedRoute {
            paths: candidate(&[]).paths,
            steps: vec![DirectionStep {
                index: 1,
                instruction: "Go".to_string(),
                distance_miles: 1.0,
            }],
        };

        let steps = requester.publish(solved, &mut store);

        assert_eq!(steps.len(), 1);
        assert!(store.has_route_line());
        assert_eq!(store.count(), 0);
        assert!(matches!(
            &store.canvas().graphics()[0].1,
            Graphic::Polyline { symbol, .. } if symbol.color == [5, 150, 255]
        ));
    }
}
