mod log_store;

pub use log_store::{log_session, SessionLogStore};
