use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the workspace crates; everything else is filtered out
/// of [`layer`].
pub const WORKSPACE_TARGETS: &[&str] = &[
    "doc_qa_backend",
    "api",
    "rag_gate",
    "chunk_store",
    "ai_llm_service",
    "ask",
    "ingest_text",
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Formatting layer that renders only events emitted by workspace crates.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line`
/// - Span close events (durations of instrumented functions)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    let only_workspace = filter::filter_fn(|meta| is_workspace_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_workspace)
}

fn is_workspace_target(target: &str) -> bool {
    WORKSPACE_TARGETS.iter().any(|p| {
        target == *p
            || target
                .strip_prefix(p)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}

/// Level directive for one crate target, e.g. `rag_gate=debug`.
///
/// # Errors
/// Returns the parse error if `target` is not a valid directive target.
pub fn level_directive(target: &str, level: Level) -> Result<Directive, ParseError> {
    Directive::from_str(&format!("{target}={}", level.as_str().to_lowercase()))
}

/// `EnvFilter` from `RUST_LOG` when set; otherwise `default` plus `level`
/// for every workspace crate.
///
/// With `default = "warn"` and `level = Level::INFO` third-party crates log at
/// WARN while the backend logs at INFO.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return from_env;
    }
    WORKSPACE_TARGETS
        .iter()
        .filter_map(|t| level_directive(t, level).ok())
        .fold(EnvFilter::new(default), EnvFilter::add_directive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_target_matching_respects_module_boundaries() {
        assert!(is_workspace_target("rag_gate"));
        assert!(is_workspace_target("rag_gate::orchestrator"));
        assert!(is_workspace_target("api::routes::ask"));
        assert!(!is_workspace_target("apixyz"));
        assert!(!is_workspace_target("hyper::client"));
    }

    #[test]
    fn helper_binaries_are_workspace_targets() {
        assert!(is_workspace_target("ingest_text"));
        assert!(is_workspace_target("ask"));
        assert!(!is_workspace_target("asking"));
    }

    #[test]
    fn directive_formats_lowercase_level() {
        let d = level_directive("chunk_store", Level::DEBUG).unwrap();
        assert_eq!(d.to_string().to_lowercase(), "chunk_store=debug");
    }
}
