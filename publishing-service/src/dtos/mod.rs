pub mod status;
pub mod upload;

pub use status::StatusCheckCreate;
pub use upload::UploadResponse;
