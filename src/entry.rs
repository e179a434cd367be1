use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use tracing::info;

use crate::args::{FuzzerArgs, HttpMethod};
use crate::config;
use crate::engine::{FuzzConfig, FuzzEngine};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{ClientOptions, HttpClient, ReqwestClient};
use crate::report::{LogReporter, Reporter};
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};
use crate::source::EndpointSource;

enum RunPlan {
    File { path: String },
    Single { url: String, method: HttpMethod },
}

pub(crate) fn run() -> AppResult<()> {
    let mut args = match parse_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    if let Some(config_file) = config::load_config(args.config.as_deref())? {
        config::apply_config(&mut args, &config_file)?;
    }

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<FuzzerArgs>> {
    let mut cmd = FuzzerArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = FuzzerArgs::from_arg_matches(&matches)?;

    Ok(Some(args))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    config::DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

fn build_plan(args: &FuzzerArgs) -> AppResult<RunPlan> {
    if args.file.is_some() && args.url.is_some() {
        return Err(AppError::validation(ValidationError::FileConflictsWithUrl));
    }
    if args.method.is_some() && args.url.is_none() {
        return Err(AppError::validation(ValidationError::MethodRequiresUrl));
    }

    if let Some(path) = args.file.clone() {
        return Ok(RunPlan::File { path });
    }
    match args.url.clone() {
        Some(url) => Ok(RunPlan::Single {
            url,
            method: args.method.unwrap_or(HttpMethod::Get),
        }),
        None => Err(AppError::validation(ValidationError::NoSourceSpecified)),
    }
}

async fn run_async(args: FuzzerArgs) -> AppResult<()> {
    let plan = build_plan(&args)?;

    let source = match &plan {
        RunPlan::File { path } => EndpointSource::from_file(Path::new(path), args.strict_methods)?,
        RunPlan::Single { url, method } => EndpointSource::single(url, *method)?,
    };

    let mut config = FuzzConfig::default();
    if let Some(attempts) = args.attempts {
        config.attempts = attempts;
    }
    config.concurrency = args.concurrency.unwrap_or(NonZeroUsize::MIN);

    info!(
        "apifuzz starting: {} target(s), {} attempt(s) each, concurrency {}, verbose {}",
        source.targets().len(),
        config.attempts,
        config.concurrency,
        if args.verbose { "ON" } else { "OFF" },
    );

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(&ClientOptions {
        request_timeout: args.request_timeout,
        connect_timeout: args.connect_timeout,
    })?);
    let reporter: Arc<dyn Reporter> = Arc::new(LogReporter::new(args.verbose));

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let mut engine = FuzzEngine::new(config);
    let summary = engine
        .run(source.targets(), &client, &reporter, &mut shutdown_rx)
        .await?;

    drop(shutdown_tx.send(()));
    drop(signal_handle);

    info!(
        "Run complete: {} attempt(s) dispatched, {} transport error(s).",
        summary.attempts_dispatched, summary.transport_errors
    );
    Ok(())
}
