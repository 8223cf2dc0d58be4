/// レスポンスヘッダーポリシー
///
/// 中継レスポンスに付与するヘッダー値を定義する。
/// 値はリクエスト内容に依存しない固定値。

/// Access-Control-Allow-Origin: 全オリジンからのブラウザアクセスを許可
pub const ALLOW_ORIGIN_ANY: &str = "*";

/// 成功レスポンスのCache-Control
///
/// エッジキャッシュで60秒間フレッシュとして扱い、
/// 期限切れ後はバックグラウンド再検証中に古いコピーを返させる。
pub const EDGE_CACHE_CONTROL: &str = "s-maxage=60, stale-while-revalidate";

/// エラーレスポンスのCache-Control（障害レスポンスはキャッシュさせない）
pub const ERROR_CACHE_CONTROL: &str = "no-store";

/// レスポンスのContent-Type
pub const CONTENT_TYPE_JSON: &str = "application/json";
