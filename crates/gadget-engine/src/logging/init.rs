use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax (e.g. "debug" or
/// "gadget_app=debug,wgpu=warn") and wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// `debug` for the gadget crates, with the GPU stack kept at `warn`.
    pub fn debug() -> Self {
        Self {
            env_filter: Some(DEBUG_FILTER.to_string()),
            ..Self::default()
        }
    }
}

const DEFAULT_LEVEL: &str = "info";
const DEBUG_FILTER: &str = "debug,wgpu_core=warn,wgpu_hal=warn,naga=warn";

static INIT: Once = Once::new();

/// Initializes the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized with filter {filter:?}");
    });
}

fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_env() {
        assert_eq!(resolve_filter(Some("debug".into()), Some("warn".into())), "debug");
    }

    #[test]
    fn env_used_when_no_explicit_filter() {
        assert_eq!(resolve_filter(None, Some("warn".into())), "warn");
    }

    #[test]
    fn falls_back_to_info() {
        assert_eq!(resolve_filter(None, None), "info");
        assert_eq!(resolve_filter(None, Some("  ".into())), "info");
    }

    #[test]
    fn debug_config_sets_filter() {
        assert!(LoggingConfig::debug().env_filter.unwrap().starts_with("debug"));
    }
}
