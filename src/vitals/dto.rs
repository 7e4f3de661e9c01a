use serde::{Deserialize, Serialize};

use crate::goals::dto::GoalProfileResponse;
use crate::vitals::repo::VitalsReading;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVitalsRequest {
    pub sugar_reading: f64,
    pub weight_reading: f64,
}

/// The new reading plus the goal profile refreshed with the new weight.
#[derive(Debug, Serialize)]
pub struct AddVitalsResponse {
    pub vitals: VitalsReading,
    pub goal_profile: GoalProfileResponse,
}

#[derive(Debug, Serialize)]
pub struct VitalsHistoryResponse {
    pub vitals: Vec<VitalsReading>,
    pub latest: Option<VitalsReading>,
}
