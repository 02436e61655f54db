use serde::{Deserialize, Serialize};

/// Operator-assigned remediation status for a store.
///
/// Serialized as the exact dropdown labels the dashboard shows; the unset
/// variant serializes as the empty string so a fresh annotation document
/// round-trips without special-casing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "")]
    Unset,
    Dormant,
    Inactive,
    Endorsed,
    Fixed,
}

impl Status {
    /// The five dropdown options, in display order.
    pub const ALL: [Status; 5] = [
        Status::Unset,
        Status::Dormant,
        Status::Inactive,
        Status::Endorsed,
        Status::Fixed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unset => "",
            Status::Dormant => "Dormant",
            Status::Inactive => "Inactive",
            Status::Endorsed => "Endorsed",
            Status::Fixed => "Fixed",
        }
    }

    /// Parse a dropdown label back into a `Status`.
    ///
    /// Returns `None` for anything outside the fixed option set.
    #[must_use]
    pub fn parse(value: &str) -> Option<Status> {
        match value {
            "" => Some(Status::Unset),
            "Dormant" => Some(Status::Dormant),
            "Inactive" => Some(Status::Inactive),
            "Endorsed" => Some(Status::Endorsed),
            "Fixed" => Some(Status::Fixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
