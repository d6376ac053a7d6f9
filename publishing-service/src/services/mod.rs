pub mod database;
pub mod store;

pub use database::MongoStore;
pub use store::{DocumentStore, STATUS_LIST_LIMIT};
