use config::{Config, ConfigError, Environment, File, Map};
use stockwatch_core::config::AppConfig;

/// 默认配置文件名 (不含扩展名，支持 stockwatch.toml 等格式)
pub const CONFIG_FILE: &str = "stockwatch";
/// 环境变量前缀，例如 STOCKWATCH__SERVER__PORT=9000
pub const ENV_PREFIX: &str = "STOCKWATCH";
/// 兼容的 API Key 环境变量
pub const FINNHUB_KEY_ENV: &str = "FINNHUB_API_KEY";

/// # Summary
/// 从进程环境加载配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 为底。
/// 2. 叠加可选的配置文件。
/// 3. 叠加 `STOCKWATCH__SECTION__KEY` 环境变量。
/// 4. 若仍无 API Key，读取 `FINNHUB_API_KEY`。
pub fn load(file: &str) -> Result<AppConfig, ConfigError> {
    let config = build(file, None)?;
    Ok(with_key_fallback(config, std::env::var(FINNHUB_KEY_ENV).ok()))
}

/// # Summary
/// 按层叠顺序构建配置。
///
/// # Arguments
/// * `file`: 配置文件路径 (可不存在)。
/// * `env`: 指定时替代进程环境变量，供测试注入。
pub fn build(file: &str, env: Option<Map<String, String>>) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize()
}

/// 配置中没有可用 API Key 时使用回退值
pub fn with_key_fallback(mut config: AppConfig, fallback: Option<String>) -> AppConfig {
    if config.provider.api_key().is_none() {
        config.provider.finnhub_api_key = fallback.filter(|k| !k.trim().is_empty());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = build("does-not-exist/stockwatch", env(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.browser.page_size, 21);
        assert!(config.provider.api_key().is_none());
    }

    #[test]
    fn test_file_then_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockwatch.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\n\n[browser]\npage_size = 30\n\n[provider]\nfinnhub_api_key = \"from-file\""
        )
        .unwrap();

        let config = build(
            path.to_str().unwrap(),
            env(&[("STOCKWATCH__SERVER__PORT", "9100")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.browser.page_size, 30);
        assert_eq!(config.provider.api_key(), Some("from-file"));
    }

    #[test]
    fn test_key_fallback_only_when_missing() {
        let config = with_key_fallback(AppConfig::default(), Some("env-key".into()));
        assert_eq!(config.provider.api_key(), Some("env-key"));

        let config = with_key_fallback(config, Some("other".into()));
        assert_eq!(config.provider.api_key(), Some("env-key"));

        let config = with_key_fallback(AppConfig::default(), Some("  ".into()));
        assert!(config.provider.api_key().is_none());
    }
}
