//! Tracing setup for the relay binary.
//!
//! Library code never installs a subscriber; a client logs through the dispatcher it was built with.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{DefaultFields, FmtSpan, Format, Full, Writer},
    fmt::time::FormatTime,
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    util::SubscriberInitExt,
    EnvFilter,
};

/// Directives used when `RUST_LOG` is unset or unparsable. teloxide and its HTTP stack stay at warn.
pub const DEFAULT_LOG_FILTER: &str = "info,teloxide=warn,reqwest=warn,hyper=warn";

/// Local time as `YYYY-MM-DD HH:MM:SS`.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

type RelaySubscriber =
    tracing_subscriber::fmt::Subscriber<DefaultFields, Format<Full, LocalTime>, EnvFilter, BoxMakeWriter>;

/// `RUST_LOG` if it parses, otherwise [`DEFAULT_LOG_FILTER`].
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// stdout, teed into `log_file` when given. The file is appended to; missing parent directories are created.
pub fn log_writer(log_file: Option<&Path>) -> io::Result<BoxMakeWriter> {
    let Some(path) = log_file else {
        return Ok(BoxMakeWriter::new(io::stdout));
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BoxMakeWriter::new(io::stdout.and(Arc::new(file))))
}

/// Lines look like `2024-05-01 12:00:00  INFO relay_telegram::client: message key=value`, without ANSI.
fn relay_subscriber(filter: EnvFilter, writer: BoxMakeWriter) -> RelaySubscriber {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_timer(LocalTime)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false)
        .finish()
}

/// Installs the global subscriber (and the `log` bridge teloxide needs). Load `.env` first so
/// `RUST_LOG` is visible.
pub fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    relay_subscriber(log_filter(), log_writer(log_file)?)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(filter: EnvFilter) -> (Captured, RelaySubscriber) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = relay_subscriber(filter, BoxMakeWriter::new(move || writer.clone()));
        (captured, subscriber)
    }

    #[test]
    fn test_line_has_local_timestamp_level_and_target() {
        let (captured, subscriber) = capture(EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "relay_telegram::client", chat_id = -100, "Relaying Telegram message");
        });

        let line = captured.text();
        let (stamp, rest) = line.split_at(19);
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
        assert!(rest.trim_start().starts_with("INFO relay_telegram::client: "));
        assert!(rest.contains("Relaying Telegram message"));
        assert!(rest.contains("chat_id=-100"));
        assert!(!line.contains('\x1b'));
    }

    #[test]
    #[serial]
    fn test_default_filter_quiets_teloxide() {
        std::env::remove_var("RUST_LOG");
        let (captured, subscriber) = capture(log_filter());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "teloxide::net", "poll noise");
            tracing::warn!(target: "teloxide::net", "poll trouble");
            tracing::info!(target: "relay_telegram::client", "bridge event");
            tracing::debug!(target: "relay_telegram::client", "bridge detail");
        });

        let text = captured.text();
        assert!(!text.contains("poll noise"));
        assert!(text.contains("poll trouble"));
        assert!(text.contains("bridge event"));
        assert!(!text.contains("bridge detail"));
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_default_filter() {
        std::env::set_var("RUST_LOG", "relay_telegram=debug");
        let (captured, subscriber) = capture(log_filter());
        std::env::remove_var("RUST_LOG");
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "relay_telegram::client", "bridge detail");
            tracing::info!(target: "relay_cli::supervisor", "outside the directive");
        });

        let text = captured.text();
        assert!(text.contains("bridge detail"));
        assert!(!text.contains("outside the directive"));
    }

    #[test]
    fn test_log_writer_creates_parent_directory() {
        let root = std::env::temp_dir().join(format!("relay-core-logger-{}", std::process::id()));
        let path = root.join("nested").join("tgrelay.log");

        assert!(log_writer(Some(&path)).is_ok());
        assert!(path.exists());

        let _ = fs::remove_dir_all(&root);
    }
}
