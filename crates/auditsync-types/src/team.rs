use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// A reviewer who can be credited with or assigned to findings.
///
/// Identity is the `id`; the remaining fields are display metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display color, typically a CSS hex string.
    #[serde(default)]
    pub color: String,
}

impl TeamMember {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: String::new(),
            email: None,
            color: String::new(),
        }
    }
}

/// A validated team roster with unique member ids, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    members: Vec<TeamMember>,
}

impl Roster {
    pub fn from_members(members: Vec<TeamMember>) -> TypeResult<Self> {
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if member.id.trim().is_empty() {
                return Err(TypeError::EmptyMemberId);
            }
            if !seen.insert(member.id.as_str()) {
                return Err(TypeError::DuplicateMember(member.id.clone()));
            }
        }
        Ok(Self { members })
    }

    pub fn get(&self, id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TeamMember> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_vec(self) -> Vec<TeamMember> {
        self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_rejects_duplicate_ids() {
        let err = Roster::from_members(vec![
            TeamMember::new("m-1", "Dana"),
            TeamMember::new("m-1", "Dana (laptop)"),
        ])
        .unwrap_err();
        assert_eq!(err, TypeError::DuplicateMember("m-1".into()));
    }

    #[test]
    fn roster_rejects_blank_ids() {
        let err = Roster::from_members(vec![TeamMember::new(" ", "Nobody")]).unwrap_err();
        assert_eq!(err, TypeError::EmptyMemberId);
    }

    #[test]
    fn roster_lookup() {
        let roster = Roster::from_members(vec![
            TeamMember::new("m-1", "Dana"),
            TeamMember::new("m-2", "Sam"),
        ])
        .unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("m-2").map(|m| m.name.as_str()), Some("Sam"));
        assert!(!roster.contains("m-3"));
    }

    #[test]
    fn member_json_shape() {
        let m: TeamMember = serde_json::from_str(
            r##"{"id":"m-1","name":"Dana","role":"lead","color":"#ff8800"}"##,
        )
        .unwrap();
        assert_eq!(m.role, "lead");
        assert!(m.email.is_none());
    }
}
