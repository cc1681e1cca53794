//! Findings and validated finding snapshots.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::conformance::ConformanceStatus;
use crate::error::{TypeError, TypeResult};
use crate::item::ItemId;

/// One evaluation of one checklist item within one audit.
///
/// Findings are immutable snapshots handed to the engines by the host
/// application. The engines clone them into their outputs and never edit
/// them in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub item_id: ItemId,
    /// Ordinal tier of the item (e.g. `"A"`, `"AA"`). Informational only.
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub conformance: ConformanceStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tested_by: String,
    #[serde(default)]
    pub tested_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_tools")]
    pub tools_used: Vec<String>,
    #[serde(default)]
    pub custom_field_values: BTreeMap<String, String>,
    /// Id of the [`TeamMember`](crate::TeamMember) responsible for the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub attachment_refs: Vec<String>,
}

impl Finding {
    /// A finding with the given status and every other field empty.
    pub fn new(item_id: ItemId, conformance: ConformanceStatus) -> Self {
        Self {
            item_id,
            level: String::new(),
            conformance,
            notes: String::new(),
            tested_by: String::new(),
            tested_date: None,
            tools_used: Vec::new(),
            custom_field_values: BTreeMap::new(),
            assigned_to: None,
            attachment_refs: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_tested_by(mut self, tested_by: impl Into<String>) -> Self {
        self.tested_by = tested_by.into();
        self
    }

    pub fn with_tested_date(mut self, date: DateTime<Utc>) -> Self {
        self.tested_date = Some(date);
        self
    }

    /// Returns `true` if the notes contain anything besides whitespace.
    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }

    /// `tested_date` as milliseconds since the UNIX epoch.
    pub fn tested_millis(&self) -> Option<i64> {
        self.tested_date.map(|d| d.timestamp_millis())
    }
}

/// Accepts either a list of tool names or one free-text string, which is
/// split on commas.
fn deserialize_tools<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tools {
        List(Vec<String>),
        Text(String),
    }

    let tools = match Option::<Tools>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Tools::List(list)) => list,
        Some(Tools::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    };
    Ok(tools)
}

/// A validated audit snapshot: findings keyed by unique [`ItemId`].
///
/// Input order is preserved so that everything derived from a set is
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindingSet {
    findings: Vec<Finding>,
    index: HashMap<ItemId, usize>,
}

impl FindingSet {
    /// Validate a list of findings.
    ///
    /// Fails on the first blank or duplicate item id; nothing is dropped.
    pub fn from_findings(findings: Vec<Finding>) -> TypeResult<Self> {
        let mut index = HashMap::with_capacity(findings.len());
        for (pos, finding) in findings.iter().enumerate() {
            if finding.item_id.is_blank() {
                return Err(TypeError::EmptyItemId);
            }
            if index.insert(finding.item_id.clone(), pos).is_some() {
                return Err(TypeError::DuplicateItem(finding.item_id.clone()));
            }
        }
        Ok(Self { findings, index })
    }

    pub fn get(&self, id: &ItemId) -> Option<&Finding> {
        self.index.get(id).map(|&pos| &self.findings[pos])
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.findings.iter()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.findings
    }
}

impl<'a> IntoIterator for &'a FindingSet {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn finding(id: &str, status: ConformanceStatus) -> Finding {
        Finding::new(ItemId::new(id).unwrap(), status)
    }

    #[test]
    fn deserializes_camel_case_export() {
        let value = json!({
            "itemId": "1.1.1",
            "level": "A",
            "conformance": "Partially Supports",
            "notes": "alt text missing on two images",
            "testedBy": "dana",
            "testedDate": "2024-03-01T10:00:00Z",
            "toolsUsed": "axe, NVDA , ",
            "customFieldValues": {"ticket": "A11Y-12"},
            "assignedTo": "m-1",
            "attachmentRefs": ["shot-1"]
        });
        let f: Finding = serde_json::from_value(value).unwrap();
        assert_eq!(f.item_id.as_str(), "1.1.1");
        assert_eq!(f.conformance, ConformanceStatus::PartiallySupports);
        assert_eq!(f.tools_used, vec!["axe".to_string(), "NVDA".to_string()]);
        assert_eq!(f.custom_field_values.get("ticket").map(String::as_str), Some("A11Y-12"));
        assert_eq!(f.assigned_to.as_deref(), Some("m-1"));
        assert!(f.tested_millis().is_some());
    }

    #[test]
    fn optional_fields_default() {
        let f: Finding = serde_json::from_value(json!({"itemId": "2.4.4"})).unwrap();
        assert_eq!(f.conformance, ConformanceStatus::NotTested);
        assert!(f.tested_date.is_none());
        assert!(f.tools_used.is_empty());
        assert!(!f.has_notes());
    }

    #[test]
    fn tools_list_and_null_accepted() {
        let f: Finding =
            serde_json::from_value(json!({"itemId": "1", "toolsUsed": ["JAWS"]})).unwrap();
        assert_eq!(f.tools_used, vec!["JAWS".to_string()]);
        let f: Finding =
            serde_json::from_value(json!({"itemId": "1", "toolsUsed": null})).unwrap();
        assert!(f.tools_used.is_empty());
    }

    #[test]
    fn blank_notes_are_not_notes() {
        let f = finding("1.1.1", ConformanceStatus::Supports).with_notes("  \n ");
        assert!(!f.has_notes());
    }

    #[test]
    fn set_rejects_duplicates() {
        let err = FindingSet::from_findings(vec![
            finding("1.1.1", ConformanceStatus::Supports),
            finding("1.1.1", ConformanceStatus::DoesNotSupport),
        ])
        .unwrap_err();
        assert_eq!(err, TypeError::DuplicateItem(ItemId::new("1.1.1").unwrap()));
    }

    #[test]
    fn set_rejects_blank_ids_from_serde() {
        let f: Finding = serde_json::from_value(json!({"itemId": ""})).unwrap();
        assert_eq!(FindingSet::from_findings(vec![f]), Err(TypeError::EmptyItemId));
    }

    #[test]
    fn set_lookup_and_order() {
        let set = FindingSet::from_findings(vec![
            finding("2.1.1", ConformanceStatus::Supports),
            finding("1.1.1", ConformanceStatus::DoesNotSupport),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        let id = ItemId::new("1.1.1").unwrap();
        assert!(set.contains(&id));
        assert_eq!(set.get(&id).unwrap().conformance, ConformanceStatus::DoesNotSupport);
        let order: Vec<&str> = set.iter().map(|f| f.item_id.as_str()).collect();
        assert_eq!(order, vec!["2.1.1", "1.1.1"]);
    }
}
