mod cli;
mod parsers;
mod types;


pub use cli::FuzzerArgs;
pub use types::{DEFAULT_USER_AGENT, HttpMethod};
