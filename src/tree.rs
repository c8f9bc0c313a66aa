//! # Tree Patch Primitives
//!
//! Identity-keyed upsert/remove over ordered, tagged element trees, the
//! shape shared by the Android manifest and resource snapshots the host
//! hands in. A record's identity is always a designated attribute (the
//! metadata name, the resource name), never its position.
//!
//! Mutation is in place, uniformly: calling a primitive twice with equal
//! arguments leaves the tree unchanged after the first call.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A tagged node in a manifest or resource tree.
///
/// The node's own tag is the key under which it sits in its parent's
/// `children` map, so it is not repeated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    /// Attribute map. Keys are unique; insertion order is preserved.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    /// Text content, when the element carries any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child elements grouped by tag, in document order within each tag.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, Vec<Element>>,
}

impl Element {
    /// Creates an empty element.
    pub fn new() -> Self {
        Element::default()
    }

    /// Builder: sets an attribute.
    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Builder: sets the text content.
    pub fn text(mut self, value: &str) -> Self {
        self.text = Some(value.to_string());
        self
    }

    /// Builder: appends a child under the given tag.
    pub fn child(mut self, tag: &str, child: Element) -> Self {
        self.children.entry(tag.to_string()).or_default().push(child);
        self
    }

    /// The children under a tag, or an empty slice when the tag is absent.
    pub fn children_of(&self, tag: &str) -> &[Element] {
        self.children.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds a child by tag and identity attribute.
    pub fn find_child(&self, tag: &str, identity_attr: &str, identity: &str) -> Option<&Element> {
        self.children_of(tag)
            .iter()
            .find(|e| e.attributes.get(identity_attr).map(String::as_str) == Some(identity))
    }
}

/// Ensures exactly one record in `list` carries `identity_attr == identity`.
///
/// If one already does, `record`'s attributes are merged over it (unrelated
/// attributes kept), its text replaces the existing text when set, and its
/// children replace the existing children when non-empty; the record's
/// position is preserved. Otherwise `record` is appended with the identity
/// attribute set. Total: no error conditions.
pub fn upsert(list: &mut Vec<Element>, identity_attr: &str, identity: &str, record: Element) {
    let existing = list
        .iter_mut()
        .find(|e| e.attributes.get(identity_attr).map(String::as_str) == Some(identity));

    match existing {
        Some(current) => {
            for (key, value) in record.attributes {
                current.attributes.insert(key, value);
            }
            if record.text.is_some() {
                current.text = record.text;
            }
            if !record.children.is_empty() {
                current.children = record.children;
            }
        }
        None => {
            let mut record = record;
            record
                .attributes
                .entry(identity_attr.to_string())
                .or_insert_with(|| identity.to_string());
            list.push(record);
        }
    }
}

/// Deletes at most one record carrying `identity_attr == identity`.
/// Absence is a no-op, not an error.
pub fn remove(list: &mut Vec<Element>, identity_attr: &str, identity: &str) {
    let position = list
        .iter()
        .position(|e| e.attributes.get(identity_attr).map(String::as_str) == Some(identity));
    if let Some(position) = position {
        list.remove(position);
    }
}

/// [`upsert`] against `parent`'s children under `tag`, creating the tag
/// entry when absent.
pub fn upsert_child(
    parent: &mut Element,
    tag: &str,
    identity_attr: &str,
    identity: &str,
    record: Element,
) {
    let list = parent.children.entry(tag.to_string()).or_default();
    upsert(list, identity_attr, identity, record);
}

/// [`remove`] against `parent`'s children under `tag`. An emptied tag entry
/// is dropped, restoring the pre-insert shape.
pub fn remove_child(parent: &mut Element, tag: &str, identity_attr: &str, identity: &str) {
    if let Some(list) = parent.children.get_mut(tag) {
        remove(list, identity_attr, identity);
        if list.is_empty() {
            parent.children.shift_remove(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(name: &str, value: &str) -> Element {
        Element::new().attr("android:name", name).attr("android:value", value)
    }

    #[test]
    fn test_upsert_appends_when_absent() {
        let mut list = vec![meta("other", "x")];
        upsert(&mut list, "android:name", "mine", meta("mine", "1"));

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].attributes["android:name"], "mine");
        assert_eq!(list[1].attributes["android:value"], "1");
    }

    #[test]
    fn test_upsert_updates_in_place() {
        let mut list = vec![meta("mine", "1"), meta("other", "x")];
        upsert(&mut list, "android:name", "mine", meta("mine", "2"));

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].attributes["android:value"], "2");
        assert_eq!(list[1].attributes["android:name"], "other");
    }

    #[test]
    fn test_upsert_keeps_unrelated_attributes() {
        let mut list = vec![meta("mine", "1").attr("tools:node", "merge")];
        upsert(&mut list, "android:name", "mine", meta("mine", "2"));

        assert_eq!(list[0].attributes["tools:node"], "merge");
        assert_eq!(list[0].attributes["android:value"], "2");
    }

    #[test]
    fn test_upsert_sets_identity_on_append() {
        let mut list = Vec::new();
        upsert(
            &mut list,
            "android:name",
            "mine",
            Element::new().attr("android:value", "1"),
        );

        assert_eq!(list[0].attributes["android:name"], "mine");
    }

    #[test]
    fn test_upsert_idempotent() {
        let mut once = vec![meta("other", "x")];
        upsert(&mut once, "android:name", "mine", meta("mine", "1"));
        let mut twice = once.clone();
        upsert(&mut twice, "android:name", "mine", meta("mine", "1"));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut list = vec![meta("other", "x")];
        remove(&mut list, "android:name", "mine");

        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_child_drops_empty_tag() {
        let mut parent = Element::new().child("meta-data", meta("mine", "1"));
        remove_child(&mut parent, "meta-data", "android:name", "mine");

        assert_eq!(parent, Element::new());
    }

    #[test]
    fn test_toggle_restores_baseline() {
        let baseline = Element::new().child("meta-data", meta("other", "x"));
        let mut tree = baseline.clone();

        upsert_child(&mut tree, "meta-data", "android:name", "mine", meta("mine", "1"));
        remove_child(&mut tree, "meta-data", "android:name", "mine");

        assert_eq!(tree, baseline);
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let tree = Element::new()
            .attr("package", "com.test.app")
            .child("application", Element::new().attr("android:name", ".MainApplication"));

        let json = serde_json::to_string(&tree).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
    }
}
