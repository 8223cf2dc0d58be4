// UpstreamClient - 上流サーバー一覧APIクライアント
//
// 設定された上流URLにGETリクエストを1回だけ発行し、
// レスポンスボディをJSONとしてパースして返す。
// 再試行は行わない（失敗はそのまま呼び出し元へ返す）。

use super::upstream_config::UpstreamConfig;
use crate::domain::ServerListDocument;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use url::Url;

/// 上流API取得エラー
///
/// # エラー種別
/// - `Network`: 接続失敗などのネットワークエラー
/// - `Timeout`: タイムアウト
/// - `HttpStatus`: 2xx以外のステータス
/// - `InvalidJson`: ボディがJSONとして不正
/// - `ClientBuild`: HTTPクライアントの構築失敗
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// ネットワークエラー
    #[error("上流APIへの接続に失敗: {0}")]
    Network(String),

    /// タイムアウト
    #[error("上流APIがタイムアウト: {0}")]
    Timeout(String),

    /// 非成功ステータス
    #[error("上流APIが非成功ステータスを返却: status={status}")]
    HttpStatus {
        /// HTTPステータスコード
        status: u16,
    },

    /// 不正なJSON
    #[error("上流APIのレスポンスがJSONとして不正: {0}")]
    InvalidJson(String),

    /// クライアント構築エラー
    #[error("HTTPクライアントの構築に失敗: {0}")]
    ClientBuild(String),
}

impl UpstreamError {
    /// reqwestのエラーを分類
    fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// 上流API取得トレイト
///
/// 抽象化によりテスト時にモック実装を注入可能にする
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// サーバー一覧を取得
    ///
    /// # 戻り値
    /// * `Ok(ServerListDocument)` - 2xxかつ有効なJSON
    /// * `Err(UpstreamError)` - 取得またはパースに失敗
    async fn fetch_server_list(&self) -> Result<ServerListDocument, UpstreamError>;
}

/// reqwestを使用した上流APIクライアント
///
/// コールドスタート時に1度だけ作成し、呼び出し間で接続プールを共有する。
#[derive(Clone)]
pub struct HttpUpstreamClient {
    client: Client,
    url: Url,
}

impl std::fmt::Debug for HttpUpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUpstreamClient")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpUpstreamClient {
    /// 設定からクライアントを作成
    ///
    /// # 引数
    /// * `config` - 上流API接続設定
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        info!(url = %config.url(), "HttpUpstreamClientを初期化");

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| UpstreamError::ClientBuild(e.to_string()))?;

        Ok(Self::with_client(client, config.url().clone()))
    }

    /// カスタムクライアントで作成（テスト用）
    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// 上流エンドポイントURL
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    #[instrument(skip(self))]
    async fn fetch_server_list(&self) -> Result<ServerListDocument, UpstreamError> {
        debug!(url = %self.url, "上流APIへリクエスト");

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "上流APIリクエスト失敗");
                UpstreamError::from_reqwest(&e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "上流APIが非成功ステータスを返却");
            return Err(UpstreamError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, "上流APIレスポンスボディの読み込み失敗");
            UpstreamError::from_reqwest(&e)
        })?;

        let document = ServerListDocument::from_slice(&bytes).map_err(|e| {
            error!(error = %e, body_len = bytes.len(), "上流APIレスポンスのJSONパース失敗");
            UpstreamError::InvalidJson(e.to_string())
        })?;

        info!(status = %status, body_len = bytes.len(), "上流APIからサーバー一覧を取得");

        Ok(document)
    }
}
