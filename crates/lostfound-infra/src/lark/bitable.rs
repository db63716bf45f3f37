//! Bitable record client implementing the `TableService` port.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::{Map, Value};

use lostfound_core::ports::{
    AccessTokenProvider, Record, RecordPage, Table, TableError, TableService,
};

use super::LarkConfig;

const PAGE_SIZE: u32 = 200;

/// Exact-match filter expression. The value is a quoted string in
/// Bitable's formula syntax, so embedded quotes and backslashes must
/// be escaped or they would terminate the literal early.
fn filter_expr(field: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("CurrentValue.[{field}] = \"{escaped}\"")
}

/// Every Bitable response wraps its payload in this envelope; a
/// non-zero `code` is an error regardless of HTTP status.
#[derive(Deserialize)]
struct ApiEnvelope {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<Value>,
}

#[derive(Deserialize)]
struct RecordData {
    record: Record,
}

#[derive(Deserialize, Default)]
struct ListData {
    #[serde(default)]
    items: Vec<Record>,
    #[serde(default)]
    has_more: bool,
    page_token: Option<String>,
}

/// Bitable client over the two configured tables. The token provider
/// is injected rather than owned so its cache is process-wide.
pub struct BitableClient {
    http: reqwest::Client,
    tokens: Arc<dyn AccessTokenProvider>,
    config: LarkConfig,
}

impl BitableClient {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<dyn AccessTokenProvider>,
        config: LarkConfig,
    ) -> Self {
        Self {
            http,
            tokens,
            config,
        }
    }

    fn table_id(&self, table: Table) -> &str {
        match table {
            Table::Postings => &self.config.postings_table,
            Table::Users => &self.config.users_table,
        }
    }

    fn records_url(&self, table: Table) -> Result<Url, TableError> {
        let url = format!(
            "{}/open-apis/bitable/v1/apps/{}/tables/{}/records",
            self.config.host,
            self.config.base_token,
            self.table_id(table)
        );
        Url::parse(&url).map_err(|e| TableError::Http(e.to_string()))
    }

    fn record_url(&self, table: Table, record_id: &str) -> Result<Url, TableError> {
        let mut url = self.records_url(table)?;
        url.path_segments_mut()
            .map_err(|_| TableError::Http("cannot-be-a-base url".to_string()))?
            .push(record_id);
        Ok(url)
    }

    async fn call(
        &self,
        method: Method,
        url: Url,
        payload: Option<Value>,
    ) -> Result<Value, TableError> {
        let token = self.tokens.token().await?;
        let mut request = self.http.request(method.clone(), url.clone()).bearer_auth(token);
        if let Some(payload) = payload {
            request = request.json(&payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TableError::Http(e.to_string()))?;
        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| TableError::Decode(e.to_string()))?;

        if envelope.code != 0 {
            tracing::warn!(
                %method,
                %url,
                code = envelope.code,
                msg = %envelope.msg,
                "bitable call rejected"
            );
            return Err(TableError::Upstream {
                code: envelope.code,
                msg: envelope.msg,
            });
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl TableService for BitableClient {
    async fn add_record(
        &self,
        table: Table,
        fields: Map<String, Value>,
    ) -> Result<Record, TableError> {
        let url = self.records_url(table)?;
        let data = self
            .call(Method::POST, url, Some(serde_json::json!({ "fields": fields })))
            .await?;
        let parsed: RecordData =
            serde_json::from_value(data).map_err(|e| TableError::Decode(e.to_string()))?;
        Ok(parsed.record)
    }

    async fn get_record(&self, table: Table, record_id: &str) -> Result<Record, TableError> {
        let url = self.record_url(table, record_id)?;
        let data = self.call(Method::GET, url, None).await?;
        let parsed: RecordData =
            serde_json::from_value(data).map_err(|e| TableError::Decode(e.to_string()))?;
        Ok(parsed.record)
    }

    async fn list_by_filter(
        &self,
        table: Table,
        field: &str,
        value: &str,
    ) -> Result<Vec<Record>, TableError> {
        let mut url = self.records_url(table)?;
        url.query_pairs_mut()
            .append_pair("filter", &filter_expr(field, value));
        let data = self.call(Method::GET, url, None).await?;
        let parsed: ListData =
            serde_json::from_value(data).map_err(|e| TableError::Decode(e.to_string()))?;
        Ok(parsed.items)
    }

    async fn list_page(
        &self,
        table: Table,
        page_token: Option<&str>,
    ) -> Result<RecordPage, TableError> {
        let mut url = self.records_url(table)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page_size", &PAGE_SIZE.to_string());
            if let Some(token) = page_token {
                pairs.append_pair("page_token", token);
            }
        }
        let data = self.call(Method::GET, url, None).await?;
        let parsed: ListData =
            serde_json::from_value(data).map_err(|e| TableError::Decode(e.to_string()))?;

        // has_more gates the token: a token on the last page is not
        // an invitation to keep going.
        let page_token = if parsed.has_more {
            parsed.page_token.filter(|t| !t.is_empty())
        } else {
            None
        };

        Ok(RecordPage {
            items: parsed.items,
            page_token,
        })
    }

    async fn update_record(
        &self,
        table: Table,
        record_id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), TableError> {
        let url = self.record_url(table, record_id)?;
        self.call(Method::PUT, url, Some(serde_json::json!({ "fields": fields })))
            .await?;
        Ok(())
    }

    async fn delete_record(&self, table: Table, record_id: &str) -> Result<Value, TableError> {
        let url = self.record_url(table, record_id)?;
        self.call(Method::DELETE, url, None).await
    }
}
