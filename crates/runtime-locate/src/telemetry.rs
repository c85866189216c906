//! Telemetry collaborator notified when a new executable is configured.

use tracing::info;

/// Event emitted once a resolved executable reports its version.
pub const CONFIGURED_EVENT: &str = "configured-new-binary";

/// Receives version reports and named events from the resolver.
pub trait Telemetry: Send + Sync {
    /// Records the version string reported by the resolved executable.
    fn set_runtime_version(&self, version: &str);

    /// Records a named event with no payload.
    fn trace_event(&self, name: &str);
}

/// Forwards telemetry to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry {
    fn set_runtime_version(&self, version: &str) {
        info!(version = %version, "runtime version detected");
    }

    fn trace_event(&self, name: &str) {
        info!(event = %name, "telemetry event");
    }
}
