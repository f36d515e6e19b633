use super::Transport;
use crate::error::{JotterError, Result};
use crate::model::{RecordId, RecordKind};
use serde_json::Value;
use std::cell::Cell;
use std::collections::BTreeMap;

/// In-memory transport for tests and offline development.
///
/// Records are held as raw JSON values, the same shape the HTTP transport
/// delivers after unwrapping envelopes. The builder methods read the `id`
/// field out of the fixture. [`MemTransport::failing`] builds a transport
/// whose every fetch fails, for driving the error route.
#[derive(Default)]
pub struct MemTransport {
    records: BTreeMap<(RecordKind, RecordId), Value>,
    fail_all: bool,
    calls: Cell<usize>,
}

impl MemTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that fails every fetch, like an unreachable API.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_tag(self, value: Value) -> Self {
        self.with_record(RecordKind::Tag, value)
    }

    pub fn with_page(self, value: Value) -> Self {
        self.with_record(RecordKind::Page, value)
    }

    pub fn with_content(self, value: Value) -> Self {
        self.with_record(RecordKind::Content, value)
    }

    pub fn with_record(mut self, kind: RecordKind, value: Value) -> Self {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .expect("fixture record needs an 'id'")
            .to_string();
        self.records.insert((kind, id), value);
        self
    }

    /// How many fetches have been issued. Lets tests pin down cache hits.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn guard(&self, what: &str) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_all {
            return Err(JotterError::Fetch {
                url: format!("mem:{}", what),
                reason: "transport poisoned".to_string(),
            });
        }
        Ok(())
    }
}

impl Transport for MemTransport {
    fn fetch_all(&self, kind: RecordKind) -> Result<Vec<Value>> {
        self.guard(kind.endpoint())?;
        Ok(self
            .records
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn fetch_one(&self, kind: RecordKind, id: &str) -> Result<Value> {
        self.guard(&format!("{}/{}", kind.endpoint(), id))?;
        self.records
            .get(&(kind, id.to_string()))
            .cloned()
            .ok_or_else(|| JotterError::NotFound {
                kind,
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixtures_round_trip() {
        let t = MemTransport::new()
            .with_tag(json!({"id": "a", "title": "A"}))
            .with_tag(json!({"id": "b", "title": "B"}));
        assert_eq!(t.fetch_all(RecordKind::Tag).unwrap().len(), 2);
        assert_eq!(t.fetch_all(RecordKind::Page).unwrap().len(), 0);
        let one = t.fetch_one(RecordKind::Tag, "a").unwrap();
        assert_eq!(one["title"], "A");
    }

    #[test]
    fn test_missing_record() {
        let t = MemTransport::new();
        let err = t.fetch_one(RecordKind::Page, "nope").unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn test_failing_transport() {
        let t = MemTransport::failing().with_tag(json!({"id": "a"}));
        assert!(t.fetch_all(RecordKind::Tag).is_err());
        assert!(t.fetch_one(RecordKind::Tag, "a").is_err());
    }

    #[test]
    fn test_call_counter() {
        let t = MemTransport::new().with_tag(json!({"id": "a"}));
        t.fetch_all(RecordKind::Tag).unwrap();
        let _ = t.fetch_one(RecordKind::Tag, "a");
        assert_eq!(t.calls(), 2);
    }
}
