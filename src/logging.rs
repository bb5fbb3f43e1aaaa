use flexi_logger::{
    colored_default_format, detailed_format, Cleanup, Criterion, Duplicate, FileSpec,
    FlexiLoggerError, Logger, LoggerHandle, Naming,
};
use std::path::Path;

/// Log files rotate once they reach this size.
const ROTATE_BYTES: u64 = 10 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 3;

/// Starts the global logger from `RUST_LOG`, falling back to `spec`.
///
/// Without `log_dir` everything goes to stderr in color. With it, logs are written to
/// rotating numbered files in `log_dir` and `info` and above is duplicated to stderr.
/// The returned handle must be kept alive for as long as logging is needed.
pub fn setup_logging(spec: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(spec)?;
    match log_dir {
        None => logger.format(colored_default_format).start(),
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("nogo_mcts"))
            .format_for_files(detailed_format)
            .format_for_stderr(colored_default_format)
            .duplicate_to_stderr(Duplicate::Info)
            .rotate(
                Criterion::Size(ROTATE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEPT_LOG_FILES),
            )
            .start(),
    }
}
