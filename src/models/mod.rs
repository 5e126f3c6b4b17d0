mod session_log;
mod subject;

pub use session_log::SessionLogEntry;
pub use subject::{Chapters, Difficulty, Subject};
