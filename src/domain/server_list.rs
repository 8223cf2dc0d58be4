// サーバー一覧ドキュメント
//
// 上流APIから取得したJSONをそのまま保持する値オブジェクト。
// 形状の検証や変換は一切行わない。

use serde_json::Value;

/// 上流から取得したサーバー一覧JSON
///
/// 中身の構造（オブジェクト・配列・フィールド構成）には依存しない。
/// リクエスト1件の処理中だけ保持され、レスポンス送信後に破棄される。
#[derive(Debug, Clone, PartialEq)]
pub struct ServerListDocument(Value);

impl ServerListDocument {
    /// JSON値から作成
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// 上流のレスポンスボディをJSONとしてパース
    ///
    /// # Arguments
    /// * `bytes` - 上流レスポンスのボディ
    ///
    /// # Returns
    /// パースに成功した場合はドキュメント、失敗した場合はserde_jsonのエラー
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self)
    }

    /// 保持しているJSON値への参照
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// JSON値を取り出す
    pub fn into_value(self) -> Value {
        self.0
    }

    /// レスポンスボディ用のJSON文字列に変換
    pub fn to_json_string(&self) -> String {
        // Valueのシリアライズは失敗しない（キーは常に文字列）
        self.0.to_string()
    }
}

impl From<Value> for ServerListDocument {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_slice_object() {
        let doc = ServerListDocument::from_slice(br#"{"servers":[{"id":1,"name":"A"}]}"#).unwrap();

        assert_eq!(doc.as_value(), &json!({"servers": [{"id": 1, "name": "A"}]}));
    }

    #[test]
    fn test_from_slice_empty_array() {
        let doc = ServerListDocument::from_slice(b"[]").unwrap();

        assert_eq!(doc.to_json_string(), "[]");
    }

    #[test]
    fn test_from_slice_scalar_is_accepted() {
        // 形状を問わないので、スカラー値もそのまま受け付ける
        let doc = ServerListDocument::from_slice(b"null").unwrap();
        assert!(doc.as_value().is_null());

        let doc = ServerListDocument::from_slice(b"\"maintenance\"").unwrap();
        assert_eq!(doc.as_value(), &json!("maintenance"));
    }

    #[test]
    fn test_from_slice_rejects_malformed_json() {
        assert!(ServerListDocument::from_slice(b"<html>502 Bad Gateway</html>").is_err());
        assert!(ServerListDocument::from_slice(b"").is_err());
        assert!(ServerListDocument::from_slice(br#"{"servers":["#).is_err());
    }

    #[test]
    fn test_key_order_is_preserved() {
        let body = r#"{"zeta":1,"alpha":{"b":2,"a":1},"mid":[3,2,1]}"#;
        let doc = ServerListDocument::from_slice(body.as_bytes()).unwrap();

        assert_eq!(doc.to_json_string(), body);
    }

    #[test]
    fn test_into_value_and_from() {
        let value = json!({"servers": []});
        let doc: ServerListDocument = value.clone().into();

        assert_eq!(doc.into_value(), value);
    }
}
