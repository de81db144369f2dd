pub mod drivers;
pub mod forecast;
pub mod readiness;
pub mod telemetry;
pub mod trend;
pub mod util;
