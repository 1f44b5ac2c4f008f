pub mod cancellation;
pub mod telemetry;

pub use cancellation::cancellable;
pub use telemetry::{env_filter, init_tracing};
