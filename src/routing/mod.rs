mod orchestrator;
mod summary;

pub use orchestrator::{route_padding, RouteInfo, RouteOrchestrator, RouteRequest};
pub use summary::{RouteSummary, StepSummary};
