//! Cursor-based pagination for list endpoints.
//!
//! Cursors are opaque base64 strings wrapping a v7 UUID. Since v7 UUIDs are
//! time-ordered, paging on `id > cursor` gives a stable order without a
//! separate sort column.

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 25;
const MAX_PAGE_SIZE: i64 = 100;

/// Opaque cursor (base64-encoded UUID).
#[derive(Debug, Clone)]
pub struct Cursor(Uuid);

impl Cursor {
    pub fn new(id: Uuid) -> Self {
        Cursor(id)
    }

    /// Encode the cursor as a URL-safe base64 string.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    /// Decode a cursor string back to a Cursor.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .context("Invalid cursor: not valid base64")?;
        let uuid = Uuid::from_slice(&bytes).context("Invalid cursor: not a valid UUID")?;
        Ok(Cursor(uuid))
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

/// Query-string pagination arguments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageArgs {
    /// Requested page size (clamped to [1, 100], default 25).
    pub first: Option<i64>,
    /// Cursor of the last item of the previous page.
    pub after: Option<String>,
}

/// Validated pagination arguments ready for a query.
#[derive(Debug, Clone)]
pub struct ValidatedPage {
    pub limit: i64,
    pub after: Option<Uuid>,
}

impl PageArgs {
    pub fn validate(&self) -> Result<ValidatedPage> {
        let limit = self.first.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let after = match &self.after {
            Some(s) => Some(Cursor::decode(s)?.into_uuid()),
            None => None,
        };
        Ok(ValidatedPage { limit, after })
    }
}

/// One page of results plus the cursor to request the next one.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from `limit + 1` fetched rows: the extra row signals a
    /// further page and is dropped from the output.
    pub fn from_rows(mut rows: Vec<T>, limit: i64, id_of: impl Fn(&T) -> Uuid) -> Self {
        let has_more = rows.len() as i64 > limit;
        if has_more {
            rows.truncate(limit as usize);
        }
        let next_cursor = if has_more {
            rows.last().map(|row| Cursor::new(id_of(row)).encode())
        } else {
            None
        };
        Page {
            items: rows,
            next_cursor,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_roundtrip() {
        let id = Uuid::now_v7();
        let encoded = Cursor::new(id).encode();
        let decoded = Cursor::decode(&encoded).unwrap();
        assert_eq!(decoded.into_uuid(), id);
    }

    #[test]
    fn invalid_cursor_rejected() {
        assert!(Cursor::decode("not-base64!!!").is_err());
        assert!(Cursor::decode("aGVsbG8").is_err()); // valid base64, wrong length
    }

    #[test]
    fn page_size_clamped() {
        let args = PageArgs {
            first: Some(5000),
            after: None,
        };
        assert_eq!(args.validate().unwrap().limit, 100);

        let args = PageArgs {
            first: Some(-3),
            after: None,
        };
        assert_eq!(args.validate().unwrap().limit, 1);

        let args = PageArgs::default();
        assert_eq!(args.validate().unwrap().limit, 25);
    }

    #[test]
    fn from_rows_detects_further_pages() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::now_v7()).collect();
        let page = Page::from_rows(ids.clone(), 3, |id| *id);
        assert_eq!(page.items.len(), 3);
        assert!(page.has_more);
        assert_eq!(
            Cursor::decode(page.next_cursor.as_deref().unwrap())
                .unwrap()
                .into_uuid(),
            ids[2]
        );

        let page = Page::from_rows(ids[..2].to_vec(), 3, |id| *id);
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }
}
