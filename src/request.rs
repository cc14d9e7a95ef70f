//! Route (re)computation requests and the guard that keeps at most one of
//! them in flight.

use tracing::debug;

use crate::error::RouteError;
use crate::geo::Coordinate;
use crate::route::Route;
use crate::trip::Trip;

/// Identity of one route request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// What the engine asks the routing service for.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub id: RequestId,
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Direction of travel at the origin in degrees, if known.
    pub heading: Option<f64>,
}

/// Tracks the single outstanding request.
#[derive(Debug, Default)]
pub struct RequestGuard {
    pending: Option<RequestId>,
    next_id: u64,
}

impl RequestGuard {
    /// Allocates a request unless one is already outstanding.
    pub fn begin(
        &mut self,
        origin: Coordinate,
        destination: Coordinate,
        heading: Option<f64>,
    ) -> Option<RouteRequest> {
        if let Some(pending) = self.pending {
            debug!(?pending, "route request already in flight");
            return None;
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.pending = Some(id);

        Some(RouteRequest {
            id,
            origin,
            destination,
            heading,
        })
    }

    /// Clears the guard if `id` is the outstanding request. Returns false for
    /// responses nobody is waiting for any more.
    pub fn finish(&mut self, id: RequestId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forgets the outstanding request; its response will be ignored.
    pub fn abandon(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Turns a raw trip into the route the session navigates.
pub fn install(trip: &Trip) -> Result<Route, RouteError> {
    Route::from_trip(trip)
}
