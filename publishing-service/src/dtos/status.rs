use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct StatusCheckCreate {
    #[validate(length(min = 1, message = "client_name must not be empty"))]
    pub client_name: String,
}
