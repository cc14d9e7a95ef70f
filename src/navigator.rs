//! Single-owner event loop around a [`NavigationSession`].
//!
//! Position fixes, navigation requests and route responses all arrive as
//! [`Event`]s on one channel and are applied strictly in order. Route
//! requests block on network I/O, so they run on a small rayon pool owned by
//! the navigator rather than the global compute pool; their outcome is
//! posted back onto the same channel instead of being awaited.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::debug;

use crate::config::NavigationConfig;
use crate::error::RoutingError;
use crate::geo::Coordinate;
use crate::position::PositionFix;
use crate::request::{RequestId, RouteRequest};
use crate::session::{Effect, NavigationSession, Notification, RenderCommand, Snapshot};
use crate::traits::{NotificationSink, RenderSink, RoutingService};
use crate::trip::Trip;

#[derive(Debug)]
pub enum Event {
    Position(PositionFix),
    Navigate { destination: Coordinate },
    Exit,
    RouteResponse {
        id: RequestId,
        result: Result<Trip, RoutingError>,
    },
    Shutdown,
}

pub struct Navigator<S, R, N> {
    session: NavigationSession,
    service: Arc<S>,
    workers: ThreadPool,
    renderer: R,
    notifier: N,
    events: Sender<Event>,
    inbox: Receiver<Event>,
    last_fix: Option<PositionFix>,
    marker_shown: bool,
}

impl<S, R, N> Navigator<S, R, N>
where
    S: RoutingService + 'static,
    R: RenderSink,
    N: NotificationSink,
{
    pub fn new(
        config: NavigationConfig,
        service: Arc<S>,
        renderer: R,
        notifier: N,
    ) -> Result<Self, ThreadPoolBuildError> {
        let workers = ThreadPoolBuilder::new()
            .num_threads(config.request_workers.max(1))
            .thread_name(|index| format!("route-request-{}", index))
            .build()?;
        let (events, inbox) = mpsc::channel();
        Ok(Self {
            session: NavigationSession::new(config),
            service,
            workers,
            renderer,
            notifier,
            events,
            inbox,
            last_fix: None,
            marker_shown: false,
        })
    }

    /// A handle for pushing events from other threads.
    pub fn sender(&self) -> Sender<Event> {
        self.events.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Processes events until [`Event::Shutdown`] arrives.
    pub fn run(&mut self) {
        while let Ok(event) = self.inbox.recv() {
            if let Event::Shutdown = event {
                break;
            }
            self.handle_at(event, Utc::now());
        }
    }

    /// Waits up to `timeout` for one event and processes it. Returns false
    /// if nothing arrived or shutdown was requested.
    pub fn process_next(&mut self, timeout: Duration) -> bool {
        match self.inbox.recv_timeout(timeout) {
            Ok(Event::Shutdown) => false,
            Ok(event) => {
                self.handle_at(event, Utc::now());
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Processes every event already queued, without blocking.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.inbox.try_recv() {
            if let Event::Shutdown = event {
                break;
            }
            self.handle_at(event, Utc::now());
            handled += 1;
        }
        handled
    }

    /// Applies one event as of `now`.
    pub fn handle_at(&mut self, event: Event, now: DateTime<Utc>) {
        let effects = match event {
            Event::Position(fix) => self.on_position(fix, now),
            Event::Navigate { destination } => self.on_navigate(destination, now),
            Event::Exit => self.session.exit(),
            Event::RouteResponse { id, result } => self.session.complete_route(id, result),
            Event::Shutdown => Vec::new(),
        };
        self.apply(effects);
    }

    fn on_position(&mut self, fix: PositionFix, now: DateTime<Utc>) -> Vec<Effect> {
        if fix.is_stale(now, self.session.config().max_fix_age) {
            debug!(timestamp = %fix.timestamp, "dropping stale fix");
            if self.marker_shown {
                self.marker_shown = false;
                return vec![Effect::Render(RenderCommand::RemoveMarker)];
            }
            return Vec::new();
        }

        self.last_fix = Some(fix);
        self.marker_shown = true;
        let mut effects = vec![Effect::Render(RenderCommand::MoveMarker {
            position: fix.coordinate(),
            rotation: fix.heading_degrees(),
        })];
        effects.extend(self.session.update_position(&fix));
        effects
    }

    fn on_navigate(&mut self, destination: Coordinate, now: DateTime<Utc>) -> Vec<Effect> {
        let max_age = self.session.config().max_fix_age;
        match self.last_fix.filter(|fix| !fix.is_stale(now, max_age)) {
            Some(fix) => self.session.navigate_to(
                fix.coordinate(),
                Some(fix.heading_degrees()),
                destination,
            ),
            None => vec![Effect::Notify(Notification::PositionUnavailable)],
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render(command) => self.renderer.apply(command),
                Effect::Notify(notification) => self.notifier.notify(notification),
                Effect::RequestRoute(request) => self.dispatch(request),
            }
        }
    }

    fn dispatch(&self, request: RouteRequest) {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        self.workers.spawn(move || {
            let id = request.id;
            let result = panic::catch_unwind(AssertUnwindSafe(|| service.route(&request)))
                .unwrap_or_else(|payload| Err(RoutingError::Aborted(panic_message(payload.as_ref()))));
            if events.send(Event::RouteResponse { id, result }).is_err() {
                debug!(?id, "navigator gone before the route arrived");
            }
        });
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "routing worker panicked".to_string())
}
