// アプリケーション層モジュール
pub mod server_list_handler;

// 再エクスポート
pub use server_list_handler::{ErrorCode, ServerListHandler};
