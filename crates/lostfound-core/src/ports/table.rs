use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::token::TokenError;

/// The two logical tables this service operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Postings,
    Users,
}

/// One row as returned by the table service. The identifier is opaque
/// and assigned upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub record_id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// String value of a field, if present and a string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// One page of a listing, plus the continuation token when the
/// service reports more rows behind it.
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub items: Vec<Record>,
    pub page_token: Option<String>,
}

/// Table service errors.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("{msg} (code: {code})")]
    Upstream { code: i64, msg: String },

    #[error("auth failed: {0}")]
    Auth(#[from] TokenError),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// CRUD + listing against the external tabular database.
///
/// Every method fails when the upstream reports a non-zero status
/// code; none of them retries.
#[async_trait]
pub trait TableService: Send + Sync {
    /// Create a record and return it as stored.
    async fn add_record(&self, table: Table, fields: Map<String, Value>)
    -> Result<Record, TableError>;

    /// Fetch a single record by its opaque id.
    async fn get_record(&self, table: Table, record_id: &str) -> Result<Record, TableError>;

    /// List records whose `field` equals `value` exactly.
    async fn list_by_filter(
        &self,
        table: Table,
        field: &str,
        value: &str,
    ) -> Result<Vec<Record>, TableError>;

    /// Fetch one page of the full listing.
    async fn list_page(
        &self,
        table: Table,
        page_token: Option<&str>,
    ) -> Result<RecordPage, TableError>;

    /// Overwrite the given fields of an existing record.
    async fn update_record(
        &self,
        table: Table,
        record_id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), TableError>;

    /// Delete a record. Immediate and irreversible at this layer.
    async fn delete_record(&self, table: Table, record_id: &str) -> Result<Value, TableError>;
}

/// Accumulate every page of a listing, in the order received.
///
/// Termination is driven solely by the upstream continuation token;
/// there is no fixed page-count bound.
pub async fn list_all(svc: &dyn TableService, table: Table) -> Result<Vec<Record>, TableError> {
    let mut out = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = svc.list_page(table, token.as_deref()).await?;
        out.extend(page.items);
        match page.page_token {
            Some(next) => token = Some(next),
            None => return Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves a fixed sequence of pages, recording the tokens it saw.
    struct PagedTables {
        pages: Vec<RecordPage>,
        seen_tokens: Mutex<Vec<Option<String>>>,
    }

    fn record(id: &str) -> Record {
        Record {
            record_id: id.to_string(),
            fields: Map::new(),
        }
    }

    #[async_trait]
    impl TableService for PagedTables {
        async fn add_record(&self, _: Table, _: Map<String, Value>) -> Result<Record, TableError> {
            unimplemented!()
        }

        async fn get_record(&self, _: Table, _: &str) -> Result<Record, TableError> {
            unimplemented!()
        }

        async fn list_by_filter(
            &self,
            _: Table,
            _: &str,
            _: &str,
        ) -> Result<Vec<Record>, TableError> {
            unimplemented!()
        }

        async fn list_page(
            &self,
            _: Table,
            page_token: Option<&str>,
        ) -> Result<RecordPage, TableError> {
            let mut seen = self.seen_tokens.lock().unwrap();
            seen.push(page_token.map(String::from));
            Ok(self.pages[seen.len() - 1].clone())
        }

        async fn update_record(
            &self,
            _: Table,
            _: &str,
            _: Map<String, Value>,
        ) -> Result<(), TableError> {
            unimplemented!()
        }

        async fn delete_record(&self, _: Table, _: &str) -> Result<Value, TableError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn list_all_follows_tokens_until_exhausted() {
        let svc = PagedTables {
            pages: vec![
                RecordPage {
                    items: vec![record("a"), record("b")],
                    page_token: Some("t1".to_string()),
                },
                RecordPage {
                    items: vec![record("c")],
                    page_token: Some("t2".to_string()),
                },
                RecordPage {
                    items: vec![record("d")],
                    page_token: None,
                },
            ],
            seen_tokens: Mutex::new(Vec::new()),
        };

        let all = list_all(&svc, Table::Postings).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);

        let seen = svc.seen_tokens.lock().unwrap();
        assert_eq!(
            *seen,
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }

    #[tokio::test]
    async fn list_all_single_page() {
        let svc = PagedTables {
            pages: vec![RecordPage {
                items: vec![record("only")],
                page_token: None,
            }],
            seen_tokens: Mutex::new(Vec::new()),
        };

        let all = list_all(&svc, Table::Postings).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(svc.seen_tokens.lock().unwrap().len(), 1);
    }
}
