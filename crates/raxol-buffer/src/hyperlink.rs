//! OSC 8 hyperlink table: maps a per-cell [`HyperlinkId`] to its URL/params.

use std::collections::HashMap;

use crate::cell::HyperlinkId;

/// The `id` and `uri` parsed from an `OSC 8 ; params ; uri ST` command.
///
/// `params` carries any `key=value` pairs from the first OSC field (e.g.
/// `id=...`); only `uri` is required to reconstitute the link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperlink {
    pub uri: String,
    pub params: String,
}

/// Interns [`Hyperlink`]s so cells can carry a cheap `Copy` id instead of a
/// `String`. Entries are never removed individually; the whole table is
/// dropped with its buffer (an active hyperlink can still be referenced by
/// cells long after it stops being "current").
#[derive(Debug, Clone, Default)]
pub struct HyperlinkTable {
    links: Vec<Hyperlink>,
    by_value: HashMap<Hyperlink, HyperlinkId>,
}

impl HyperlinkTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `link`, reusing an existing entry if one with the
    /// same uri/params already exists.
    pub fn intern(&mut self, link: Hyperlink) -> HyperlinkId {
        if let Some(id) = self.by_value.get(&link) {
            return *id;
        }
        let id = HyperlinkId(u32::try_from(self.links.len()).unwrap_or(u32::MAX));
        self.links.push(link.clone());
        self.by_value.insert(link, id);
        id
    }

    #[must_use]
    pub fn get(&self, id: HyperlinkId) -> Option<&Hyperlink> {
        self.links.get(id.0 as usize)
    }
}

impl std::hash::Hash for Hyperlink {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
        self.params.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_link_reuses_id() {
        let mut table = HyperlinkTable::new();
        let a = table.intern(Hyperlink {
            uri: "https://example.com".into(),
            params: String::new(),
        });
        let b = table.intern(Hyperlink {
            uri: "https://example.com".into(),
            params: String::new(),
        });
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_links_get_distinct_ids() {
        let mut table = HyperlinkTable::new();
        let a = table.intern(Hyperlink {
            uri: "https://a".into(),
            params: String::new(),
        });
        let b = table.intern(Hyperlink {
            uri: "https://b".into(),
            params: String::new(),
        });
        assert_ne!(a, b);
        assert_eq!(table.get(a).unwrap().uri, "https://a");
    }
}
