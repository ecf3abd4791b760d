//! Per-process request accounting.
//!
//! One `ApiMetrics` is built at startup and shared with every request task
//! through router state. Counters live in a private Prometheus registry so
//! several services can run side by side in one test process.

use std::time::{Duration, Instant};

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Opts, Registry, TextEncoder};

use crate::types::HealthReport;

const LATENCY_BUCKETS: [f64; 10] = [0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

pub struct ApiMetrics {
    service: String,
    started_at: Instant,
    registry: Registry,
    calls: IntCounter,
    latency: Histogram,
}

impl ApiMetrics {
    pub fn new(service: &str) -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let calls = IntCounter::with_opts(
            Opts::new("api_calls_total", "Total requests handled by the service")
                .const_label("service", service),
        )?;
        let latency = Histogram::with_opts(
            HistogramOpts::new("api_request_duration_seconds", "Request duration in seconds")
                .const_label("service", service)
                .buckets(LATENCY_BUCKETS.to_vec()),
        )?;

        registry.register(Box::new(calls.clone()))?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self {
            service: service.to_string(),
            started_at: Instant::now(),
            registry,
            calls,
            latency,
        })
    }

    pub fn record_call(&self) {
        self.calls.inc();
    }

    pub fn observe_latency(&self, elapsed: Duration) {
        self.latency.observe(elapsed.as_secs_f64());
    }

    pub fn calls(&self) -> u64 {
        self.calls.get()
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Uptime since boot together with the current call count.
    pub fn report(&self) -> HealthReport {
        report(&self.service, self.started_at, self.calls())
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

pub fn report(service: &str, boot: Instant, calls: u64) -> HealthReport {
    HealthReport::new(service, boot.elapsed(), calls)
}
