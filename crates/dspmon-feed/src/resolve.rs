//! Heuristic column-role resolution.
//!
//! The feed's column set is not fixed by contract, so roles are matched
//! against keyword sets on the lowercased header names. This module is a
//! pure function from header list to mapping so the renderer never has to
//! second-guess it and tests need no HTTP or filesystem setup.

use serde::Serialize;

/// Semantic role a feed column can play in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Identity,
    Name,
    Company,
    InactivePlatforms,
}

impl ColumnRole {
    fn describe(self) -> &'static str {
        match self {
            ColumnRole::Identity => "store ID",
            ColumnRole::Name => "store name",
            ColumnRole::Company => "company name",
            ColumnRole::InactivePlatforms => "inactive DSP",
        }
    }
}

/// Resolved column indices, one per role; `None` means unresolved.
///
/// Recomputed in full every time the feed schema is loaded — a mapping is
/// never partially merged with a prior one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub identity: Option<usize>,
    pub name: Option<usize>,
    pub company: Option<usize>,
    pub inactive_platforms: Option<usize>,
}

impl ColumnMapping {
    fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Identity => self.identity,
            ColumnRole::Name => self.name,
            ColumnRole::Company => self.company,
            ColumnRole::InactivePlatforms => self.inactive_platforms,
        }
    }

    fn set(&mut self, role: ColumnRole, index: usize) {
        match role {
            ColumnRole::Identity => self.identity = Some(index),
            ColumnRole::Name => self.name = Some(index),
            ColumnRole::Company => self.company = Some(index),
            ColumnRole::InactivePlatforms => self.inactive_platforms = Some(index),
        }
    }
}

/// Non-fatal notice that a role fell back to a positional default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionAdvisory {
    pub role: ColumnRole,
    pub message: String,
}

const KEYWORD_ROLES: [ColumnRole; 4] = [
    ColumnRole::Identity,
    ColumnRole::Name,
    ColumnRole::Company,
    ColumnRole::InactivePlatforms,
];

/// Positional defaults for roles that stay unresolved after keyword
/// matching: 1st column is identity, 2nd is name, 3rd is company. The
/// inactive-platform role has no positional default.
const POSITIONAL_FALLBACKS: [(ColumnRole, usize); 3] = [
    (ColumnRole::Identity, 0),
    (ColumnRole::Name, 1),
    (ColumnRole::Company, 2),
];

/// Resolve header names into a [`ColumnMapping`].
///
/// Matching is case-insensitive, first matching header wins per role (scan
/// order = header order), and no header serves more than one role. Every
/// positional fallback emits one [`ResolutionAdvisory`] for the operator.
/// Deterministic: identical header lists always produce identical output.
#[must_use]
pub fn resolve_columns(headers: &[String]) -> (ColumnMapping, Vec<ResolutionAdvisory>) {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    let mut mapping = ColumnMapping::default();
    let mut claimed = vec![false; headers.len()];

    for role in KEYWORD_ROLES {
        for (index, header) in lowered.iter().enumerate() {
            if !claimed[index] && matches_role(role, header) {
                mapping.set(role, index);
                claimed[index] = true;
                break;
            }
        }
    }

    // Exact-name fallback for the inactive-platform listing.
    if mapping.inactive_platforms.is_none() {
        for (index, header) in lowered.iter().enumerate() {
            if !claimed[index] && (header == "inactive_dsps" || header == "inactive_dsp") {
                mapping.set(ColumnRole::InactivePlatforms, index);
                claimed[index] = true;
                break;
            }
        }
    }

    let mut advisories = Vec::new();
    for (role, position) in POSITIONAL_FALLBACKS {
        if mapping.get(role).is_none() {
            if let Some(header) = headers.get(position) {
                mapping.set(role, position);
                advisories.push(ResolutionAdvisory {
                    role,
                    message: format!(
                        "could not find a {} column; using \"{header}\" instead",
                        role.describe()
                    ),
                });
            }
        }
    }

    (mapping, advisories)
}

fn matches_role(role: ColumnRole, header: &str) -> bool {
    match role {
        ColumnRole::Identity => {
            header.contains("id") && (header.contains("store") || header.contains("location"))
        }
        ColumnRole::Name => {
            header.contains("name") && (header.contains("store") || header.contains("location"))
        }
        ColumnRole::Company => header.contains("company") || header.contains("business"),
        ColumnRole::InactivePlatforms => {
            header.contains("inactive") && (header.contains("dsp") || header.contains("delivery"))
        }
    }
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
