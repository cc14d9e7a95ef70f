//! route-progress
//!
//! Tracks an agent's progress along a routed polyline and drives
//! turn-by-turn guidance state from periodic position fixes.

pub mod config;
pub mod error;
pub mod geo;
pub mod haversine;
pub mod navigator;
pub mod polyline;
pub mod position;
pub mod projection;
pub mod request;
pub mod route;
pub mod session;
pub mod traits;
pub mod trip;
pub mod valhalla;

pub use config::NavigationConfig;
pub use error::{DecodeError, EncodeError, RouteError, RoutingError};
pub use geo::Coordinate;
pub use navigator::{Event, Navigator};
pub use position::PositionFix;
pub use session::{Cursor, Effect, NavigationSession, Notification, RenderCommand, SessionState, Snapshot};
