mod args;
mod config;
mod engine;
mod entry;
mod error;
mod http;
mod logger;
mod payload;
mod report;
mod request;
mod shutdown;
mod shutdown_handlers;
mod source;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
