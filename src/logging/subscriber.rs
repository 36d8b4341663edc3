//! Tracing subscriber setup: compact console formatter and level filter.
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the console filter, in `EnvFilter` syntax.
pub const LOG_ENV_VAR: &str = "EXTENSION_TIPS_LOG";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Render one console line for an event at `level`.
fn format_line(level: tracing::Level, msg: &str) -> String {
    match level {
        tracing::Level::ERROR => format!("\x1b[31mERROR\x1b[0m {msg}"),
        tracing::Level::WARN => format!("\x1b[33mWARN\x1b[0m  {msg}"),
        tracing::Level::INFO => format!("\x1b[1;34mtips\x1b[0m  {msg}"),
        _ => format!("  \x1b[2m{msg}\x1b[0m"),
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] producing one short line per
/// event.
struct TipsFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for TipsFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        writeln!(
            writer,
            "{}",
            format_line(*event.metadata().level(), &extractor.message)
        )
    }
}

/// Console filter: `override_directives` when valid, else `debug` or `info`.
#[must_use]
pub fn build_filter(verbose: bool, override_directives: Option<&str>) -> EnvFilter {
    override_directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Initialise the global [`tracing`] subscriber.
///
/// Writes compact lines to stderr, filtered by [`LOG_ENV_VAR`] when set and
/// by `verbose` otherwise. Calling this after a subscriber is already
/// installed leaves the existing one in place.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let directives = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(verbose, directives.as_deref());

    let console_layer = fmt::layer()
        .event_format(TipsFormatter)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    if let Some(directives) = directives.as_deref()
        && EnvFilter::try_new(directives).is_err()
    {
        tracing::warn!("ignoring invalid {LOG_ENV_VAR} value '{directives}'");
    }
    let version = option_env!("EXTENSION_TIPS_VERSION")
        .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
    tracing::debug!("extension-tips {version} logging initialised");
}
