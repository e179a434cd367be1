use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

use clap::Parser;

use super::parsers::parse_duration_arg;
use super::types::HttpMethod;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Black-box HTTP API fuzzer - random payload generation, GET/POST injection, endpoint lists, and transport-level outcome reporting."
)]
pub struct FuzzerArgs {
    /// Endpoint list file, one `url,method` record per line
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Single target URL to fuzz (alternative to --file)
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// HTTP method for --url mode (defaults to get)
    #[arg(short = 'm', long = "method", value_enum)]
    pub method: Option<HttpMethod>,

    /// Number of fuzzing attempts per target (defaults to 25)
    #[arg(short = 'n', long = "attempts")]
    pub attempts: Option<NonZeroU32>,

    /// Log the outgoing URL and payload for every attempt
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Max in-flight attempts per target (1 = strictly sequential)
    #[arg(long = "concurrency")]
    pub concurrency: Option<NonZeroUsize>,

    /// Abort the run when an endpoint record carries an unsupported method
    #[arg(long = "strict-methods")]
    pub strict_methods: bool,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "request-timeout", value_parser = parse_duration_arg, default_value = "10s")]
    pub request_timeout: Duration,

    /// Connection timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg, default_value = "5s")]
    pub connect_timeout: Duration,

    /// Config file path (.toml or .json)
    #[arg(long = "config", env = "APIFUZZ_CONFIG")]
    pub config: Option<String>,
}
