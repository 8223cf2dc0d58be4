/// サーバー一覧中継HTTP Lambdaエントリポイント
///
/// Lambda Function URL経由のHTTPリクエストを受け、
/// 上流のサーバー一覧JSONをCORS・エッジキャッシュヘッダー付きで返却する。
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use server_list_proxy::application::ServerListHandler;
use server_list_proxy::infrastructure::{
    init_logging, HttpUpstreamClient, UpstreamClient, UpstreamConfig,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 上流設定とHTTPクライアントはコールドスタート時に1度だけ作成する
    let config = UpstreamConfig::from_env()?;
    let client = HttpUpstreamClient::new(&config)?;
    let server_list_handler = ServerListHandler::new(client);

    info!(upstream_url = %config.url(), "サーバー一覧Lambda関数を初期化");

    let server_list_handler = &server_list_handler;
    run(service_fn(move |request: Request| async move {
        handler(server_list_handler, request).await
    }))
    .await
}

/// HTTPリクエストハンドラー
///
/// 上流の失敗もエラーレスポンスとして返すため、常に`Ok`を返す。
async fn handler<C>(
    server_list_handler: &ServerListHandler<C>,
    request: Request,
) -> Result<Response<Body>, Error>
where
    C: UpstreamClient,
{
    Ok(server_list_handler.handle(&request).await)
}
