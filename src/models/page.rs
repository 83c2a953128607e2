use serde::Serialize;
use serde_json::Value;

use super::entity::Entity;
use super::kind::EntityKind;

/// One server-returned batch of entities plus its pagination counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<Entity>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl Page {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
        }
    }

    /// Read a list response. A missing list key yields no items, a missing
    /// `total_pages` means a single page, and a missing `current_page` is
    /// taken to be the page that was asked for.
    pub fn from_response(kind: EntityKind, body: &Value, requested_page: u32) -> Self {
        let items = body
            .get(kind.list_key())
            .and_then(Value::as_array)
            .map(|rows| rows.iter().cloned().map(|row| Entity::from_value(kind, row)).collect())
            .unwrap_or_default();

        let counter = |key: &str| {
            body.get(key)
                .and_then(Value::as_u64)
                .filter(|n| *n > 0)
                .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        };

        Self {
            items,
            current_page: counter("current_page").unwrap_or(requested_page.max(1)),
            total_pages: counter("total_pages").unwrap_or(1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_page(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::empty()
    }
}

/// Number of pages needed for `total` records at `page_size` per page
pub fn total_pages_for(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(total_pages_for(25, 10), 3);
        assert_eq!(total_pages_for(30, 10), 3);
        assert_eq!(total_pages_for(31, 10), 4);
        assert_eq!(total_pages_for(1, 10), 1);
        assert_eq!(total_pages_for(0, 10), 0);
        for n in 1..=12u32 {
            for t in 0..=50u64 {
                let pages = u64::from(total_pages_for(t, n));
                assert!(pages * u64::from(n) >= t);
                assert!(pages == 0 || (pages - 1) * u64::from(n) < t);
            }
        }
    }

    #[test]
    fn reads_counters_and_items() {
        let body = json!({
            "users": [{"_id": "1", "name": "A"}, {"_id": "2", "name": "B"}],
            "current_page": 2,
            "total_pages": 3
        });
        let page = Page::from_response(EntityKind::Tenant, &body, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[1].id(), Some("2"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let page = Page::from_response(EntityKind::Property, &json!({"message": "ok"}), 4);
        assert!(page.is_empty());
        assert_eq!(page.current_page, 4);
        assert_eq!(page.total_pages, 1);
        assert!(page.contains_page(1));
        assert!(!page.contains_page(0));
        assert!(!page.contains_page(2));
    }
}
