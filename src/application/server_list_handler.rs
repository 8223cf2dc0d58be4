// サーバー一覧中継ハンドラー
//
// 上流APIからサーバー一覧JSONを取得し、CORSヘッダーと
// エッジキャッシュ指示を付けてそのまま返す。
// 受信リクエストのメソッド・パス・ヘッダー・ボディは処理に影響しない。

use crate::domain::{
    ServerListDocument, ALLOW_ORIGIN_ANY, CONTENT_TYPE_JSON, EDGE_CACHE_CONTROL,
    ERROR_CACHE_CONTROL,
};
use crate::infrastructure::{UpstreamClient, UpstreamError};
use lambda_http::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE,
};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// エラーレスポンスのエラーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// 上流に接続できない
    UpstreamUnreachable,
    /// 上流がタイムアウト
    UpstreamTimeout,
    /// 上流が非成功ステータスを返却
    UpstreamStatus,
    /// 上流のボディがJSONとして不正
    UpstreamInvalidJson,
}

impl ErrorCode {
    /// 上流エラーからエラーコードを決定
    pub fn from_upstream(error: &UpstreamError) -> Self {
        match error {
            UpstreamError::Timeout(_) => Self::UpstreamTimeout,
            UpstreamError::HttpStatus { .. } => Self::UpstreamStatus,
            UpstreamError::InvalidJson(_) => Self::UpstreamInvalidJson,
            UpstreamError::Network(_) | UpstreamError::ClientBuild(_) => Self::UpstreamUnreachable,
        }
    }

    /// レスポンスボディに載せるコード文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpstreamUnreachable => "UPSTREAM_UNREACHABLE",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::UpstreamStatus => "UPSTREAM_STATUS",
            Self::UpstreamInvalidJson => "UPSTREAM_INVALID_JSON",
        }
    }

    /// 返却するHTTPステータス（タイムアウトのみ504、他は502）
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

/// エラーレスポンスボディ
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

/// サーバー一覧中継ハンドラー
///
/// リクエスト1件につき上流APIを1回だけ呼び出す。
/// 呼び出し間で状態を持たない。
pub struct ServerListHandler<C>
where
    C: UpstreamClient,
{
    /// 上流APIクライアント
    upstream: C,
}

impl<C> ServerListHandler<C>
where
    C: UpstreamClient,
{
    /// 新しいハンドラーを作成
    ///
    /// # Arguments
    /// * `upstream` - 上流APIクライアント
    pub fn new(upstream: C) -> Self {
        Self { upstream }
    }

    /// リクエストを処理してレスポンスを生成
    ///
    /// # Returns
    /// - 成功時: 上流JSONをボディとするHTTP 200（CORS・Cache-Control付き）
    /// - 失敗時: 502/504のJSONエラーレスポンス（CORS付き、キャッシュ不可）
    #[instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        match self.upstream.fetch_server_list().await {
            Ok(document) => {
                info!("サーバー一覧を中継");
                Self::success_response(&document)
            }
            Err(e) => {
                let code = ErrorCode::from_upstream(&e);
                warn!(error = %e, code = code.as_str(), "上流API取得失敗のためエラーレスポンスを返却");
                Self::error_response(code, &e)
            }
        }
    }

    /// 成功レスポンスを生成
    pub fn success_response(document: &ServerListDocument) -> Response<Body> {
        let mut response = Response::new(Body::Text(document.to_json_string()));
        *response.status_mut() = StatusCode::OK;
        *response.headers_mut() = Self::build_success_headers();
        response
    }

    /// エラーレスポンスを生成
    ///
    /// ボディ形式: `{"error":{"code":"...","message":"..."}}`
    pub fn error_response(code: ErrorCode, error: &UpstreamError) -> Response<Body> {
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.as_str(),
                message: error.to_string(),
            },
        };
        // 文字列フィールドのみなのでシリアライズは失敗しない
        let json = serde_json::to_string(&body).unwrap_or_default();

        let mut response = Response::new(Body::Text(json));
        *response.status_mut() = code.status();
        *response.headers_mut() = Self::build_error_headers();
        response
    }

    /// 成功レスポンスのヘッダーを生成
    ///
    /// - Access-Control-Allow-Origin: *
    /// - Cache-Control: s-maxage=60, stale-while-revalidate
    /// - Content-Type: application/json
    pub fn build_success_headers() -> HeaderMap {
        let mut headers = Self::build_base_headers();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(EDGE_CACHE_CONTROL));
        headers
    }

    /// エラーレスポンスのヘッダーを生成
    ///
    /// CORSは成功時と同じく付与し、エッジにはキャッシュさせない。
    pub fn build_error_headers() -> HeaderMap {
        let mut headers = Self::build_base_headers();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(ERROR_CACHE_CONTROL));
        headers
    }

    fn build_base_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN_ANY),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

        headers
    }
}
