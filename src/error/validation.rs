use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing target: set --url or --file (or provide one in config).")]
    NoSourceSpecified,
    #[error("--file and --url are mutually exclusive.")]
    FileConflictsWithUrl,
    #[error("--method requires --url.")]
    MethodRequiresUrl,
    #[error("Unsupported HTTP method '{value}'. Use GET or POST.")]
    UnsupportedMethod { value: String },
    #[error("No targets to fuzz.")]
    NoTargets,
}
