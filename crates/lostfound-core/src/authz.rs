//! Caller authorization - the admin check.

use serde_json::Value;

use crate::domain::user_fields;
use crate::ports::{Table, TableService};

/// Whether the caller is an admin.
///
/// Absent or empty email returns `false` without a lookup. Otherwise
/// the users table is queried for an exact email match and the first
/// matching record's admin flag is coerced to bool.
///
/// Fail-closed: a lookup failure is logged and read as non-admin. A
/// broken users table must never escalate privilege, so the error is
/// swallowed here instead of failing the request.
pub async fn is_admin(tables: &dyn TableService, email: Option<&str>) -> bool {
    let Some(email) = email.filter(|e| !e.is_empty()) else {
        return false;
    };

    match tables
        .list_by_filter(Table::Users, user_fields::EMAIL, email)
        .await
    {
        Ok(records) => records
            .first()
            .and_then(|r| r.fields.get(user_fields::IS_ADMIN))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        Err(e) => {
            tracing::warn!(email, error = %e, "admin lookup failed, treating caller as non-admin");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Map, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::ports::{Record, RecordPage, TableError};

    /// Users-table fake: one optional admin record, optionally failing.
    struct UsersTable {
        admin_email: Option<&'static str>,
        is_admin: bool,
        fail: bool,
        lookups: AtomicUsize,
    }

    impl UsersTable {
        fn with_admin(email: &'static str, is_admin: bool) -> Self {
            Self {
                admin_email: Some(email),
                is_admin,
                fail: false,
                lookups: AtomicUsize::new(0),
            }
        }

        fn empty() -> Self {
            Self {
                admin_email: None,
                is_admin: false,
                fail: false,
                lookups: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::empty()
            }
        }
    }

    #[async_trait]
    impl TableService for UsersTable {
        async fn add_record(&self, _: Table, _: Map<String, Value>) -> Result<Record, TableError> {
            unimplemented!()
        }

        async fn get_record(&self, _: Table, _: &str) -> Result<Record, TableError> {
            unimplemented!()
        }

        async fn list_by_filter(
            &self,
            table: Table,
            field: &str,
            value: &str,
        ) -> Result<Vec<Record>, TableError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            assert_eq!(table, Table::Users);
            assert_eq!(field, user_fields::EMAIL);
            if self.fail {
                return Err(TableError::Upstream {
                    code: 99,
                    msg: "users table unavailable".to_string(),
                });
            }
            let mut items = Vec::new();
            if self.admin_email == Some(value) {
                let mut fields = Map::new();
                fields.insert(user_fields::IS_ADMIN.to_string(), json!(self.is_admin));
                items.push(Record {
                    record_id: "usr1".to_string(),
                    fields,
                });
            }
            Ok(items)
        }

        async fn list_page(&self, _: Table, _: Option<&str>) -> Result<RecordPage, TableError> {
            unimplemented!()
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
    async fn no_email_is_not_admin_and_skips_lookup() {
        let users = UsersTable::with_admin("admin@campus.edu", true);
        assert!(!is_admin(&users, None).await);
        assert!(!is_admin(&users, Some("")).await);
        assert_eq!(users.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn matching_admin_record() {
        let users = UsersTable::with_admin("admin@campus.edu", true);
        assert!(is_admin(&users, Some("admin@campus.edu")).await);
    }

    #[tokio::test]
    async fn matching_record_without_flag_is_not_admin() {
        let users = UsersTable::with_admin("plain@campus.edu", false);
        assert!(!is_admin(&users, Some("plain@campus.edu")).await);
    }

    #[tokio::test]
    async fn unknown_email_is_not_admin() {
        let users = UsersTable::empty();
        assert!(!is_admin(&users, Some("nobody@campus.edu")).await);
    }

    #[tokio::test]
    async fn lookup_failure_is_swallowed_as_non_admin() {
        let users = UsersTable::failing();
        assert!(!is_admin(&users, Some("admin@campus.edu")).await);
    }
}
