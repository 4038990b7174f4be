use crate::env::{get_env_var, ENV_CONFIG};
use tracing::Subscriber;
use tracing_subscriber::{fmt::MakeWriter, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Read straight from the environment, `ENV_CONFIG` may only be loaded once
/// a subscriber is installed.
fn log_json(get_var: impl Fn(&str) -> Option<String>) -> bool {
    get_var("LOG_JSON").map_or(false, |value| value == "true")
}

fn subscriber<W>(json: bool, make_writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(make_writer);
    if json {
        Box::new(builder.json().finish())
    } else {
        Box::new(builder.finish())
    }
}

/// Installs the global tracing subscriber. Logs JSON lines when `LOG_JSON=true`.
pub fn init_with_env() {
    subscriber(log_json(get_env_var), std::io::stdout).init();
    // config fallbacks warn while loading
    lazy_static::initialize(&ENV_CONFIG);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvConfig;
    use std::{
        io::Write,
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn load_config_with_logs(json: bool, vars: &[(&str, &str)]) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<Vec<_>>();

        tracing::subscriber::with_default(subscriber(json, move || writer.clone()), || {
            EnvConfig::from_lookup(|key: &str| {
                vars.iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| value.clone())
            })
        });

        logs.text()
    }

    #[test]
    fn log_json_test() {
        assert!(log_json(|_| Some("true".to_string())));
        assert!(!log_json(|_| Some("1".to_string())));
        assert!(!log_json(|_| None));
    }

    #[test]
    fn config_fallback_warnings_are_logged_test() {
        let logs = load_config_with_logs(
            false,
            &[("BEACON_TIMEOUT_SECS", "soon"), ("ENV", "qa")],
        );
        assert!(logs.contains("BEACON_TIMEOUT_SECS is not a whole number"), "{logs}");
        assert!(logs.contains("falling back to dev env"), "{logs}");
    }

    #[test]
    fn config_fallback_warnings_are_logged_as_json_test() {
        let logs = load_config_with_logs(true, &[("BEACON_TIMEOUT_SECS", "soon")]);
        let line = logs.lines().next().expect("expect a log line");
        let entry: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(entry["level"], "WARN");
        assert_eq!(entry["fields"]["secs"], "soon");
    }
}
