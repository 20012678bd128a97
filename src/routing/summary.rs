use serde::Serialize;

use crate::{
    format::{format_distance, format_duration},
    routing::RouteInfo,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepSummary {
    pub instruction: String,
    pub distance: String,
}

/// The directions panel's view of the selected route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSummary {
    pub mode: String,
    pub distance: String,
    pub duration: String,
    /// `"Route options (2/3)"`, only when there is more than one option.
    pub options: Option<String>,
    pub steps: Vec<StepSummary>,
}

impl From<&RouteInfo> for RouteSummary {
    fn from(info: &RouteInfo) -> Self {
        let options = (info.total_options > 1).then(|| {
            format!(
                "Route options ({}/{})",
                info.current_index + 1,
                info.total_options
            )
        });

        Self {
            mode: info.mode.label().into(),
            distance: format_distance(info.distance),
            duration: format_duration(info.duration),
            options,
            steps: info
                .steps
                .iter()
                .map(|step| StepSummary {
                    instruction: step.instruction.clone(),
                    distance: format_distance(step.distance),
                })
                .collect(),
        }
    }
}
