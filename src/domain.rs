// Domain layer modules
pub mod response_policy;
pub mod server_list;

// Re-exports
pub use response_policy::{
    ALLOW_ORIGIN_ANY, CONTENT_TYPE_JSON, EDGE_CACHE_CONTROL, ERROR_CACHE_CONTROL,
};
pub use server_list::ServerListDocument;
