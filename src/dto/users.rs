use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub mobile_phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ChangePasswordRequest {
    pub password: String,
    pub password_repeat: String,
}
