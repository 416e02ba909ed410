//! Logging setup utilities for the Randomly binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Workspace crates whose logs are enabled at the default level.
const WORKSPACE_CRATES: [&str; 3] = ["randomly_shared", "randomly_server", "randomly_client"];

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Every workspace crate, the binary itself and `tower_http` (HTTP request
/// traces) log at `default_log_level`.
pub fn default_filter_directive(binary_name: &str, default_log_level: &str) -> String {
    let mut targets: Vec<String> = WORKSPACE_CRATES
        .iter()
        .map(|name| name.to_string())
        .collect();
    let binary_target = binary_name.replace('-', "_");
    if !targets.contains(&binary_target) {
        targets.push(binary_target);
    }
    targets.push("tower_http".to_string());

    targets
        .into_iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "randomly-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use randomly_shared::logger::setup_logger;
///
/// setup_logger("randomly-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter_directive(binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_directive_contains_binary_and_crates() {
        // テスト項目: バイナリ名とワークスペースのクレートが既定のフィルタに含まれる
        // given (前提条件):
        let binary_name = "randomly-client";

        // when (操作):
        let directive = default_filter_directive(binary_name, "info");

        // then (期待する結果):
        assert!(directive.contains("randomly_client=info"));
        assert!(directive.contains("randomly_server=info"));
        assert!(directive.contains("randomly_shared=info"));
        assert!(directive.contains("tower_http=info"));
        assert!(!directive.contains('-'));
    }

    #[test]
    fn test_default_filter_directive_is_valid_env_filter() {
        // テスト項目: 生成されたディレクティブが EnvFilter として解釈できる
        // given (前提条件):
        let directive = default_filter_directive("randomly-server", "debug");

        // when (操作):
        let result = tracing_subscriber::EnvFilter::try_new(&directive);

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
