//! Progress state machine.
//!
//! A [`NavigationSession`] owns the live route, the cursor into it and the
//! request guard. Every transition returns the [`Effect`]s it produced as
//! plain data; the session never talks to a renderer or the network itself.

use tracing::{debug, info, warn};

use crate::config::NavigationConfig;
use crate::error::RoutingError;
use crate::geo::Coordinate;
use crate::haversine::{distance_m, path_length_m};
use crate::position::PositionFix;
use crate::projection::{Projection, project};
use crate::request::{self, RequestGuard, RequestId, RouteRequest};
use crate::route::Route;
use crate::trip::{Maneuver, Trip};

/// Position within the active route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Index `i` of the segment `[route[i], route[i + 1]]` being travelled.
    pub segment: usize,
    /// Index of the active maneuver. Never decreases for a given route.
    pub maneuver: usize,
}

impl Cursor {
    /// Moves to the next segment, activating at most one further maneuver.
    fn advance(&mut self, maneuvers: &[Maneuver]) {
        self.segment += 1;
        if let Some(current) = maneuvers.get(self.maneuver) {
            if self.segment + 1 >= current.begin_shape_index && self.maneuver + 1 < maneuvers.len() {
                self.maneuver += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoRoute,
    Active(Cursor),
    RecomputePending,
}

/// Drawing instructions for the map surface.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    AddRouteLine(Vec<Coordinate>),
    UpdateRouteLine(Vec<Coordinate>),
    RemoveRouteLine,
    /// Place the agent icon; `rotation` is in degrees clockwise from north.
    MoveMarker { position: Coordinate, rotation: f64 },
    RemoveMarker,
}

/// Human-facing messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    NavigationComplete,
    RouteFailed(String),
    /// Navigation was requested before any fresh position was known.
    PositionUnavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Render(RenderCommand),
    Notify(Notification),
    RequestRoute(RouteRequest),
}

/// Read-only view of a session after a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: SessionState,
    pub destination: Option<Coordinate>,
    pub maneuver: Option<Maneuver>,
    /// Along-route meters from the agent to where the active maneuver begins.
    pub distance_to_maneuver_m: Option<f64>,
    /// Along-route meters from the agent to the end of the route.
    pub remaining_distance_m: Option<f64>,
}

#[derive(Debug)]
struct ActiveRoute {
    route: Route,
    cursor: Cursor,
    last_projection: Option<Projection>,
}

impl ActiveRoute {
    fn new(route: Route) -> Self {
        Self {
            route,
            cursor: Cursor::default(),
            last_projection: None,
        }
    }

    /// Along-route distance from the last projected point to shape index
    /// `target`; zero for targets already behind the agent.
    fn distance_to(&self, target: usize) -> Option<f64> {
        let projection = self.last_projection?;
        let shape = self.route.shape();
        let next = self.cursor.segment + 1;
        if target < next {
            return Some(0.0);
        }
        Some(distance_m(projection.point, shape[next]) + path_length_m(&shape[next..=target]))
    }
}

enum Step {
    Reroute,
    Arrive,
    Advance,
    Track,
}

#[derive(Debug)]
pub struct NavigationSession {
    config: NavigationConfig,
    destination: Option<Coordinate>,
    active: Option<ActiveRoute>,
    requests: RequestGuard,
    line_shown: bool,
}

impl NavigationSession {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            destination: None,
            active: None,
            requests: RequestGuard::default(),
            line_shown: false,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        if self.requests.is_pending() {
            SessionState::RecomputePending
        } else if let Some(active) = &self.active {
            SessionState::Active(active.cursor)
        } else {
            SessionState::NoRoute
        }
    }

    pub fn is_navigating(&self) -> bool {
        self.destination.is_some()
    }

    pub fn route(&self) -> Option<&Route> {
        self.active.as_ref().map(|active| &active.route)
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.active.as_ref().map(|active| active.cursor)
    }

    /// Starts (or retargets) navigation and asks for a route from `origin`.
    ///
    /// While another request is outstanding no new one is issued; the
    /// destination is still updated and used by the next reroute.
    pub fn navigate_to(
        &mut self,
        origin: Coordinate,
        heading: Option<f64>,
        destination: Coordinate,
    ) -> Vec<Effect> {
        self.destination = Some(destination);
        self.requests
            .begin(origin, destination, heading)
            .map(Effect::RequestRoute)
            .into_iter()
            .collect()
    }

    /// Advances progress for one validated position fix.
    pub fn update_position(&mut self, fix: &PositionFix) -> Vec<Effect> {
        let Some(active) = &self.active else {
            return Vec::new();
        };
        let cursor = active.cursor;
        let Some((start, end)) = active.route.segment(cursor.segment) else {
            return Vec::new();
        };
        let position = fix.coordinate();
        let projection = project(start, end, position);

        let step = if projection.distance_sq > self.config.off_route_threshold_sq()
            && !self.requests.is_pending()
        {
            Step::Reroute
        } else if projection.percent >= 1.0 {
            if cursor.segment + 2 >= active.route.len() {
                Step::Arrive
            } else {
                Step::Advance
            }
        } else {
            Step::Track
        };

        let mut effects = Vec::new();
        match step {
            Step::Arrive => return self.finish(),
            Step::Reroute => {
                info!(
                    distance_m = projection.distance_m(),
                    segment = cursor.segment,
                    "off route, requesting a new route"
                );
                if let Some(destination) = self.destination {
                    let heading = Some(fix.heading_degrees());
                    if let Some(request) = self.requests.begin(position, destination, heading) {
                        effects.push(Effect::RequestRoute(request));
                    }
                }
            }
            Step::Advance | Step::Track => {}
        }

        let Some(active) = self.active.as_mut() else {
            return effects;
        };
        active.last_projection = Some(projection);
        if let Step::Advance = step {
            active.cursor.advance(active.route.maneuvers());
            debug!(segment = active.cursor.segment, maneuver = active.cursor.maneuver, "advanced");
        }

        let mut line = active.route.shape()[active.cursor.segment..].to_vec();
        if let Step::Track = step {
            if projection.percent >= 0.0 {
                line[0] = projection.point;
            }
        }
        effects.push(self.show_line(line));
        effects
    }

    /// Applies the outcome of route request `id`.
    pub fn complete_route(&mut self, id: RequestId, result: Result<Trip, RoutingError>) -> Vec<Effect> {
        if !self.requests.finish(id) {
            debug!(?id, "discarding response nobody is waiting for");
            return Vec::new();
        }
        if !self.is_navigating() {
            debug!(?id, "navigation ended before the route arrived");
            return Vec::new();
        }

        let route = result.and_then(|trip| request::install(&trip).map_err(RoutingError::from));
        match route {
            Ok(route) => {
                info!(
                    points = route.len(),
                    maneuvers = route.maneuvers().len(),
                    "route installed"
                );
                let line = route.shape().to_vec();
                self.active = Some(ActiveRoute::new(route));
                vec![self.show_line(line)]
            }
            Err(err) => {
                warn!(error = %err, "route request failed");
                vec![Effect::Notify(Notification::RouteFailed(err.to_string()))]
            }
        }
    }

    /// Ends navigation on request. Any in-flight response will be ignored.
    pub fn exit(&mut self) -> Vec<Effect> {
        self.destination = None;
        self.active = None;
        self.requests.abandon();
        self.hide_line().into_iter().collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        let active = self.active.as_ref();
        let maneuver = active.and_then(|a| a.route.maneuvers().get(a.cursor.maneuver).cloned());
        let distance_to_maneuver_m = active.zip(maneuver.as_ref()).and_then(|(a, m)| {
            a.distance_to(m.begin_shape_index)
        });
        let remaining_distance_m = active.and_then(|a| a.distance_to(a.route.len() - 1));

        Snapshot {
            state: self.state(),
            destination: self.destination,
            maneuver,
            distance_to_maneuver_m,
            remaining_distance_m,
        }
    }

    fn finish(&mut self) -> Vec<Effect> {
        info!("navigation complete");
        self.destination = None;
        self.active = None;
        self.requests.abandon();

        let mut effects = vec![Effect::Notify(Notification::NavigationComplete)];
        effects.extend(self.hide_line());
        effects
    }

    fn show_line(&mut self, line: Vec<Coordinate>) -> Effect {
        let command = if self.line_shown {
            RenderCommand::UpdateRouteLine(line)
        } else {
            RenderCommand::AddRouteLine(line)
        };
        self.line_shown = true;
        Effect::Render(command)
    }

    fn hide_line(&mut self) -> Option<Effect> {
        if !self.line_shown {
            return None;
        }
        self.line_shown = false;
        Some(Effect::Render(RenderCommand::RemoveRouteLine))
    }
}
