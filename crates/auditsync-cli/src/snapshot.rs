//! Snapshot files: the JSON shape the host application exports.

use std::path::Path;

use anyhow::Context;
use auditsync_diff::AuditRef;
use auditsync_types::{Finding, TeamMember};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One exported audit: findings plus the team roster.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Full(Snapshot),
    Findings(Vec<Finding>),
}

impl Snapshot {
    /// Read a snapshot; a bare JSON array is taken as the findings list.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let parsed: SnapshotFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        let snapshot = match parsed {
            SnapshotFile::Full(snapshot) => snapshot,
            SnapshotFile::Findings(findings) => Snapshot {
                findings,
                ..Default::default()
            },
        };
        tracing::debug!(
            path = %path.display(),
            findings = snapshot.findings.len(),
            members = snapshot.team_members.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Identity for comparison reports. Falls back to the file stem.
    pub fn audit_ref(&self, path: &Path, name_override: Option<&str>) -> AuditRef {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        AuditRef {
            id: self.id.clone().unwrap_or_else(|| stem.clone()),
            name: name_override
                .map(str::to_string)
                .or_else(|| self.name.clone())
                .unwrap_or(stem),
            date: self.date,
        }
    }
}
