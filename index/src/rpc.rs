//! JSON-RPC envelopes for the DAS `getAssetsByOwner` method.

use gate_types::OwnedAsset;
use serde::{Deserialize, Serialize};

pub const JSONRPC_VERSION: &str = "2.0";
pub const METHOD_GET_ASSETS_BY_OWNER: &str = "getAssetsByOwner";

/// Page requested from the index. Pagination is not followed.
pub const FIRST_PAGE: u32 = 1;
/// Maximum items per page accepted by the index.
pub const PAGE_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: &'a str,
    pub method: &'static str,
    pub params: AssetsByOwnerParams<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByOwnerParams<'a> {
    pub owner_address: &'a str,
    pub page: u32,
    pub limit: u32,
}

impl<'a> RpcRequest<'a> {
    pub fn assets_by_owner(id: &'a str, owner_address: &'a str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method: METHOD_GET_ASSETS_BY_OWNER,
            params: AssetsByOwnerParams {
                owner_address,
                page: FIRST_PAGE,
                limit: PAGE_LIMIT,
            },
        }
    }
}

/// Either `result` or `error` is present in a well-formed response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<AssetPage>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetPage {
    pub items: Vec<OwnedAsset>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_params() {
        let req = RpcRequest::assets_by_owner("gate", "OwnerAddr");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "getAssetsByOwner");
        assert_eq!(json["params"]["ownerAddress"], "OwnerAddr");
        assert_eq!(json["params"]["page"], 1);
        assert_eq!(json["params"]["limit"], 1000);
    }

    #[test]
    fn parses_result_page() {
        let body = r#"{
            "jsonrpc": "2.0",
            "id": "gate",
            "result": {
                "total": 2, "limit": 1000, "page": 1,
                "items": [
                    {"id": "a", "grouping": [{"group_key": "collection", "group_value": "COL1"}]},
                    {"id": "b", "grouping": []}
                ]
            }
        }"#;
        let resp: RpcResponse = serde_json::from_str(body).unwrap();
        let page = resp.result.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, Some(2));
        assert!(page.items[0].belongs_to("COL1"));
        assert!(resp.error.is_none());
    }

    #[test]
    fn null_tags_do_not_spoil_the_page() {
        let body = r#"{
            "jsonrpc": "2.0",
            "id": "gate",
            "result": {
                "total": 5, "limit": 1000, "page": 1,
                "items": [
                    {"id": "a", "grouping": [{"group_key": "collection", "group_value": "COL1"}]},
                    {"id": "b", "grouping": [{"group_key": "collection", "group_value": "COL1"}]},
                    {"id": "c", "grouping": [{"group_key": "collection", "group_value": "COL1"}]},
                    {"id": "d", "grouping": [{"group_key": "collection", "group_value": null}]},
                    {"id": "e", "grouping": null}
                ]
            }
        }"#;
        let resp: RpcResponse = serde_json::from_str(body).unwrap();
        let page = resp.result.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(gate_types::count_matching(&page.items, "COL1"), 3);
    }

    #[test]
    fn parses_error_object() {
        let body = r#"{"jsonrpc": "2.0", "id": "gate", "error": {"code": -32602, "message": "Invalid owner"}}"#;
        let resp: RpcResponse = serde_json::from_str(body).unwrap();
        let err = resp.error.unwrap();
        assert_eq!(err.code, Some(-32602));
        assert_eq!(err.message, "Invalid owner");
        assert!(resp.result.is_none());
    }

    #[test]
    fn result_without_items_is_rejected() {
        let body = r#"{"result": {"total": 0}}"#;
        assert!(serde_json::from_str::<RpcResponse>(body).is_err());
    }
}
