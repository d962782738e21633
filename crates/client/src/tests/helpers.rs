// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ClientConfig, MemoryStore, ResourceClient, ScriptedTransport};
use serde_json::{Value, json};
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://cmp.test/api/v1";
pub const TEST_TOKEN: &str = "token-abc";

pub fn create_test_config() -> ClientConfig {
    ClientConfig {
        base_url: String::from(TEST_BASE_URL),
        ..ClientConfig::default()
    }
}

/// A client with a stored token, sharing its script with the returned handle.
pub fn create_test_client(transport: &ScriptedTransport) -> ResourceClient {
    let store: MemoryStore = MemoryStore::with_entry("access_token", TEST_TOKEN);
    ResourceClient::new(
        create_test_config(),
        Arc::new(transport.clone()),
        Arc::new(store),
    )
}

pub fn create_asset_page(page: u64, total_pages: u64, names: &[&str]) -> Value {
    let assets: Vec<Value> = names
        .iter()
        .map(|name| json!({"asset_id": format!("id-{name}"), "asset_name": name}))
        .collect();
    json!({
        "current_page": page,
        "data_per_page": 20,
        "total_items": 50,
        "total_pages": total_pages,
        "assets": assets,
    })
}
