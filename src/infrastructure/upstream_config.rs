// 上流API接続設定
//
// 環境変数から上流エンドポイントとタイムアウトを読み込む。
// URLは固定値をデフォルトとし、テストではモックサーバーに差し替える。

use std::time::Duration;

use thiserror::Error;
use tracing::warn;
use url::Url;

/// デフォルトの上流エンドポイント
pub const DEFAULT_UPSTREAM_URL: &str = "https://moe-map.com/api/servers.php";

/// デフォルトのリクエストタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// デフォルトの接続タイムアウト（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

const ENV_UPSTREAM_URL: &str = "UPSTREAM_URL";
const ENV_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";
const ENV_CONNECT_TIMEOUT_SECS: &str = "UPSTREAM_CONNECT_TIMEOUT_SECS";

/// 上流設定エラー
#[derive(Debug, Error)]
pub enum UpstreamConfigError {
    /// URLとして解析できない
    #[error("上流URLが不正です: {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// http/https以外のスキーム
    #[error("上流URLのスキームが未対応です: {0}")]
    UnsupportedScheme(String),
}

/// 上流API接続設定
///
/// # フィールド
/// - `url`: 上流エンドポイント（絶対URL、http/https）
/// - `timeout`: リクエスト全体のタイムアウト
/// - `connect_timeout`: 接続確立のタイムアウト
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    url: Url,
    timeout: Duration,
    connect_timeout: Duration,
}

impl UpstreamConfig {
    /// 明示的な値で作成
    ///
    /// # 引数
    /// - `url`: 上流エンドポイント
    /// - `timeout`: リクエストタイムアウト
    /// - `connect_timeout`: 接続タイムアウト
    pub fn new(
        url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, UpstreamConfigError> {
        Ok(Self {
            url: parse_upstream_url(url)?,
            timeout,
            connect_timeout,
        })
    }

    /// 指定URLとデフォルトのタイムアウトで作成
    pub fn with_url(url: &str) -> Result<Self, UpstreamConfigError> {
        Self::new(
            url,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `UPSTREAM_URL`: 上流エンドポイント（デフォルト: moe-mapのサーバー一覧API）
    /// - `UPSTREAM_TIMEOUT_SECS`: リクエストタイムアウト秒（デフォルト: 10）
    /// - `UPSTREAM_CONNECT_TIMEOUT_SECS`: 接続タイムアウト秒（デフォルト: 5）
    ///
    /// 空文字は未設定扱い。数値が不正または0の場合は警告を出してデフォルト値を使う。
    ///
    /// # 戻り値
    /// - `Ok(UpstreamConfig)`: 設定が正常に読み込まれた
    /// - `Err(UpstreamConfigError)`: `UPSTREAM_URL`が不正
    pub fn from_env() -> Result<Self, UpstreamConfigError> {
        let url = get_optional_string(ENV_UPSTREAM_URL)
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        Self::new(
            &url,
            read_secs(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS),
            read_secs(ENV_CONNECT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    /// 上流エンドポイントURL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// リクエストタイムアウト
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 接続タイムアウト
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// 空文字をNone扱いで環境変数を読む
fn get_optional_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 秒数の環境変数を読む（不正値・0はデフォルト）
fn read_secs(key: &str, default: u64) -> Duration {
    let secs = match get_optional_string(key) {
        None => default,
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(key = key, value = %raw, default = default, "タイムアウト値が不正なためデフォルトを使用");
                default
            }
        },
    };

    Duration::from_secs(secs)
}

/// 上流URLを検証付きで解析
fn parse_upstream_url(raw: &str) -> Result<Url, UpstreamConfigError> {
    let url = Url::parse(raw).map_err(|e| UpstreamConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UpstreamConfigError::UnsupportedScheme(other.to_string())),
    }
}
