//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Session operations produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (operation counters and latencies)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
