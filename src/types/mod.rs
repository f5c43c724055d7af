// ABOUTME: Domain newtypes shared across modules.
// ABOUTME: Validation happens at construction so invalid values cannot circulate.

mod service_name;

pub use service_name::{ServiceName, ServiceNameError};
