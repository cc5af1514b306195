//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use std::sync::Once;

use lazy_static::lazy_static;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Route guard
    pub static ref GUARD_DECISIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_guard_decisions_total", "Route guard decisions"),
        &["decision"]
    ).expect("metric can be created");

    // Sessions
    pub static ref SIGNINS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_signins_total", "Completed and failed sign-in attempts"),
        &["status"]
    ).expect("metric can be created");
    pub static ref SIGNOUTS_TOTAL: IntCounter = IntCounter::new(
        "gatehouse_signouts_total",
        "Total number of sign-outs"
    ).expect("metric can be created");

    // Errors
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_errors_total", "Total number of errors"),
        &["error_type"]
    ).expect("metric can be created");
}

static INIT: Once = Once::new();

/// Initialize metrics registry. Safe to call more than once.
pub fn init_metrics() {
    INIT.call_once(register_all);
}

fn register_all() {
    REGISTRY
        .register(Box::new(GUARD_DECISIONS_TOTAL.clone()))
        .expect("GUARD_DECISIONS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(SIGNINS_TOTAL.clone()))
        .expect("SIGNINS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(SIGNOUTS_TOTAL.clone()))
        .expect("SIGNOUTS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(ERRORS_TOTAL.clone()))
        .expect("ERRORS_TOTAL can be registered");

    tracing::info!("Metrics registry initialized");
}
