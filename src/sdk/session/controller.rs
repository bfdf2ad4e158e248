use super::{RouteRequest, RouteSession};
use crate::sdk::map::geometry::MapPoint;
use crate::sdk::routing::error::RouteError;
use crate::sdk::routing::route::SolvedRoute;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

const TASK_FAILED: &str = "Route request failed unexpectedly";

type RouteTask = JoinHandle<Result<SolvedRoute, RouteError>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Click(MapPoint),
    Clear,
}

/// Cloneable sender for UI events. The controller stops once every handle
/// is dropped and no route is in flight.
#[derive(Clone)]
pub struct SessionHandle {
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    /// Returns `false` once the controller has shut down.
    pub fn click(&self, point: MapPoint) -> bool {
        self.events.send(SessionEvent::Click(point)).is_ok()
    }

    pub fn clear(&self) -> bool {
        self.events.send(SessionEvent::Clear).is_ok()
    }
}

/// Owns a [`RouteSession`] and runs its route requests on the tokio runtime.
///
/// All map mutation happens on the controller; spawned tasks only talk to
/// the routing service and hand their result back through the join handle.
pub struct SessionController {
    session: RouteSession,
    events_tx: Option<mpsc::UnboundedSender<SessionEvent>>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    in_flight: Option<(u64, RouteTask)>,
}

/// Resolves when the request in `slot` ends; never resolves for an empty slot.
async fn join_in_flight(
    slot: &mut Option<(u64, RouteTask)>,
) -> Result<Result<SolvedRoute, RouteError>, JoinError> {
    match slot {
        Some((_, task)) => task.await,
        None => std::future::pending().await,
    }
}

impl SessionController {
    pub fn new(session: RouteSession) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            session,
            events_tx: Some(events_tx),
            events_rx,
            in_flight: None,
        }
    }

    pub fn handle(&self) -> Option<SessionHandle> {
        self.events_tx.as_ref().map(|events| SessionHandle {
            events: events.clone(),
        })
    }

    pub fn session(&self) -> &RouteSession {
        &self.session
    }

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Click(point) => {
                if let Some(request) = self.session.on_click(point) {
                    self.spawn_request(request);
                }
            }
            SessionEvent::Clear => {
                if let Some((_, task)) = self.in_flight.take() {
                    log::info!("Clear requested; cancelling route request in flight");
                    task.abort();
                }
                self.session.clear();
            }
        }
    }

    fn spawn_request(&mut self, request: RouteRequest) {
        let requester = self.session.requester();
        let generation = request.generation;
        let task = tokio::spawn(async move { requester.solve(&request.markers).await });
        self.in_flight = Some((generation, task));
    }

    /// A task that panicked or was cancelled still ends the calculation.
    fn finish(
        &mut self,
        generation: u64,
        joined: Result<Result<SolvedRoute, RouteError>, JoinError>,
    ) {
        let result = joined.unwrap_or_else(|e| {
            if e.is_panic() {
                log::error!("Route request task panicked: {}", e);
            } else {
                log::warn!("Route request task was cancelled: {}", e);
            }
            Err(RouteError::RouteUnavailable(TASK_FAILED.to_string()))
        });
        self.session.on_route_finished(generation, result);
    }

    /// Waits until the request in flight, if any, has been published.
    pub async fn settle(&mut self) {
        if let Some((generation, task)) = self.in_flight.take() {
            let joined = task.await;
            self.finish(generation, joined);
        }
    }

    /// Event loop: applies UI events as they arrive and publishes route
    /// results, until all handles are gone and nothing is in flight.
    pub async fn run(mut self) -> RouteSession {
        // only external handles keep the loop alive
        self.events_tx = None;
        let mut inputs_open = true;

        loop {
            if !inputs_open && self.in_flight.is_none() {
                break;
            }
            tokio::select! {
                joined = join_in_flight(&mut self.in_flight), if self.in_flight.is_some() => {
                    if let Some((generation, _)) = self.in_flight.take() {
                        self.finish(generation, joined);
                    }
                }
                event = self.events_rx.recv(), if inputs_open => match event {
                    Some(event) => self.apply(event),
                    None => inputs_open = false,
                },
                else => break,
            }
        }

        self.session
    }
}
