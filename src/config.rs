//! Navigation tuning knobs.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NavigationConfig {
    /// Lateral distance from the current segment beyond which a new route
    /// is requested.
    pub off_route_threshold_m: f64,
    /// Fixes older than this are dropped before they reach the session.
    pub max_fix_age: Duration,
    /// Threads available for route requests. Abandoned requests keep their
    /// thread until the routing service answers or times out.
    pub request_workers: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            off_route_threshold_m: 30.0,
            max_fix_age: Duration::from_secs(10),
            request_workers: 2,
        }
    }
}

impl NavigationConfig {
    pub fn off_route_threshold_sq(&self) -> f64 {
        self.off_route_threshold_m * self.off_route_threshold_m
    }
}
