//! Mock routing services.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use route_progress::RoutingError;
use route_progress::request::RouteRequest;
use route_progress::traits::RoutingService;
use route_progress::trip::Trip;

/// Answers every request with the same trip.
pub struct StaticRouter {
    trip: Trip,
    calls: AtomicUsize,
}

impl StaticRouter {
    pub fn new(trip: Trip) -> Self {
        Self {
            trip,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingService for StaticRouter {
    fn route(&self, _request: &RouteRequest) -> Result<Trip, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.trip.clone())
    }
}

/// Reports a service-side error for every request.
pub struct FailingRouter;

impl RoutingService for FailingRouter {
    fn route(&self, _request: &RouteRequest) -> Result<Trip, RoutingError> {
        Err(RoutingError::Service {
            message: "No suitable edges near location".to_string(),
            code: Some(171),
        })
    }
}

/// Panics inside the worker.
pub struct PanickingRouter {
    calls: AtomicUsize,
}

impl PanickingRouter {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingService for PanickingRouter {
    fn route(&self, _request: &RouteRequest) -> Result<Trip, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("backend exploded");
    }
}

/// Holds each request until the test opens the gate once for it.
pub struct GatedRouter {
    trip: Trip,
    calls: AtomicUsize,
    gate: Mutex<Receiver<()>>,
}

impl GatedRouter {
    pub fn new(trip: Trip) -> (Self, Sender<()>) {
        let (open, gate) = mpsc::channel();
        let router = Self {
            trip,
            calls: AtomicUsize::new(0),
            gate: Mutex::new(gate),
        };
        (router, open)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingService for GatedRouter {
    fn route(&self, _request: &RouteRequest) -> Result<Trip, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap();
        match gate.recv() {
            Ok(()) => Ok(self.trip.clone()),
            Err(_) => Err(RoutingError::Aborted("gate closed".to_string())),
        }
    }
}
