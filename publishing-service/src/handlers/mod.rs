pub mod health;
pub mod status;
pub mod upload;

pub use health::{health_check, root};
pub use status::{create_status_check, list_status_checks};
pub use upload::upload_document;
