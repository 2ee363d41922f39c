//! Logging setup for the vitals binary.

use eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::LogArgs;

/// Initialize logging based on command line arguments.
///
/// The filter is built with the following precedence:
/// 1. If `--quiet` is set, only errors are shown
/// 2. Otherwise, start with `RUST_LOG` if set, or a level from `-v` flags
/// 3. Apply any directives from `--log.filter`
///
/// Logs go to stderr so the JSON report on stdout stays clean.
pub(crate) fn init_logging(args: &LogArgs) -> Result<()> {
    let filter = build_filter(args);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if args.json {
        builder.json().try_init()
    } else {
        builder.without_time().try_init()
    }
    .map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))
}

fn build_filter(args: &LogArgs) -> EnvFilter {
    if args.quiet {
        return EnvFilter::new("error");
    }

    let base_level = match args.verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base_level));

    if let Some(custom_filter) = &args.filter {
        for directive in custom_filter.split(',') {
            if let Ok(d) = directive.trim().parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_verbosity() {
        let args = LogArgs {
            quiet: true,
            verbosity: 3,
            ..Default::default()
        };
        assert_eq!(build_filter(&args).to_string(), "error");
    }

    #[test]
    fn test_custom_directives_added() {
        let args = LogArgs {
            filter: Some("vitals_fleet=trace, not a directive ,vitals_rank=debug".to_owned()),
            ..Default::default()
        };
        let filter = build_filter(&args).to_string();
        assert!(filter.contains("vitals_fleet=trace"));
        assert!(filter.contains("vitals_rank=debug"));
    }
}
