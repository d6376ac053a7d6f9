pub mod document;
pub mod status;

pub use document::{token_fragment, DocType, UploadedDocument};
pub use status::StatusCheck;
