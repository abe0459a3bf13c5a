use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct SeasonRequest {
    /// Season number; the next free number when omitted.
    pub number: Option<i32>,
    /// Episode links in playback order.
    #[serde(default)]
    pub videos: Vec<String>,
}
