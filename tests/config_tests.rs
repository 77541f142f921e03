//! Settings file loading and validation.

use std::fs;
use std::path::PathBuf;

use thesis_lab::error::{ConfigError, Error};
use thesis_lab::infrastructure::config::provider::AuthoritativeProvider;
use thesis_lab::infrastructure::config::settings::Config;

const SHIPPED_CONFIG: &str = include_str!("../config/thesis-lab.toml");

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("thesis-lab.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn shipped_config_matches_defaults() {
    let shipped = Config::parse_toml(SHIPPED_CONFIG).unwrap();
    let defaults = Config::parse_toml("").unwrap();

    assert_eq!(shipped.token.address, defaults.token.address);
    assert_eq!(shipped.token.coingecko_id, defaults.token.coingecko_id);
    assert_eq!(shipped.network.solscan_url, defaults.network.solscan_url);
    assert_eq!(shipped.retry.max_attempts, defaults.retry.max_attempts);
    assert_eq!(shipped.retry.base_delay_ms, defaults.retry.base_delay_ms);
    assert_eq!(shipped.resolver.authoritative, defaults.resolver.authoritative);
    assert_eq!(shipped.paths.snapshot_dir, defaults.paths.snapshot_dir);
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[token]
symbol = "WIF"
address = "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm"
coingecko_id = "dogwifcoin"

[resolver]
authoritative = ["birdeye", "solscan"]
trend_proxy = false

[paths]
snapshot_dir = "out/snapshots"
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.token.symbol, "WIF");
    assert_eq!(
        config.resolver.authoritative,
        vec![AuthoritativeProvider::Birdeye, AuthoritativeProvider::Solscan]
    );
    assert!(!config.resolver.trend_proxy);
    assert_eq!(config.paths.snapshot_dir, PathBuf::from("out/snapshots"));
}

#[test]
fn load_or_default_without_path_uses_defaults() {
    let config = Config::load_or_default(None).unwrap();
    assert_eq!(config.token.symbol, "TRUMP");
    assert!(config.bitget.enabled);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = Config::parse_toml("[retry\nmax_attempts = 3");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn unparseable_url_is_rejected() {
    let result = Config::parse_toml("[network]\nbirdeye_url = \"not a url\"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "birdeye_url",
            ..
        }))
    ));
}

#[test]
fn zero_deadline_is_rejected() {
    let result = Config::parse_toml("[resolver]\ndeadline_secs = 0\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "deadline_secs",
            ..
        }))
    ));
}

#[test]
fn disabled_tool_ignores_its_timeout() {
    let config = Config::parse_toml("[bitget]\nenabled = false\ntimeout_secs = 0\n").unwrap();
    assert!(!config.bitget.enabled);
}

#[test]
fn unknown_provider_name_is_a_parse_error() {
    let result = Config::parse_toml("[resolver]\nauthoritative = [\"etherscan\"]\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn credentials_never_appear_in_debug_output() {
    let mut config = Config::parse_toml("").unwrap();
    config.credentials.solscan = Some("super-secret-solscan-key".into());

    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret-solscan-key"));
    assert!(rendered.contains("supe***-key"));
}
