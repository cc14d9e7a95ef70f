//! Seams to the collaborators around the engine.
//!
//! The engine never draws, never talks to the network and never shows a
//! message itself. Embedders implement these for their map widget, routing
//! backend and notification area.

use crate::error::RoutingError;
use crate::request::RouteRequest;
use crate::session::{Notification, RenderCommand};
use crate::trip::Trip;

/// Computes routes. Called off the coordinating thread, so it may block.
pub trait RoutingService: Send + Sync {
    fn route(&self, request: &RouteRequest) -> Result<Trip, RoutingError>;
}

/// Applies drawing instructions to the map surface.
pub trait RenderSink {
    fn apply(&mut self, command: RenderCommand);
}

/// Shows human-readable messages.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl RenderSink for Vec<RenderCommand> {
    fn apply(&mut self, command: RenderCommand) {
        self.push(command);
    }
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
