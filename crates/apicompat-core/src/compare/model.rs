//! Comparator output types.

use crate::errors::Result;
use crate::model::Signature;
use crate::registry::{ChangeCode, ChangeInfo, ChangeStatus};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The matched pair a change was found on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChangeSignatures<'a> {
    pub before: &'a Signature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a Signature>,
}

/// One classified difference reported by a single checker for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change<'a> {
    pub info: ChangeInfo,
    pub signatures: ChangeSignatures<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<'a> Change<'a> {
    pub fn new(
        code: ChangeCode,
        before: &'a Signature,
        after: Option<&'a Signature>,
        message: Option<String>,
    ) -> Self {
        Self {
            info: code.info(),
            signatures: ChangeSignatures { before, after },
            message,
        }
    }

    /// Sentinel reported when a checker's rule does not fire.
    pub fn no_change(before: &'a Signature, after: Option<&'a Signature>) -> Self {
        Self::new(ChangeCode::NoChange, before, after, None)
    }

    pub fn code(&self) -> ChangeCode {
        self.info.code
    }

    pub fn is_no_change(&self) -> bool {
        self.info.code.is_sentinel()
    }

    /// Qualified name of the member the change concerns.
    pub fn qualified_name(&self) -> String {
        self.signatures.before.qualified_name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult<'a> {
    pub versions: Versions,
    pub changes: Vec<Change<'a>>,
}

#[derive(Serialize)]
struct DigestRow<'r> {
    code: &'static str,
    member: String,
    message: Option<&'r str>,
}

impl<'a> ComparisonResult<'a> {
    /// SHA-256 hex digest over versions and `(code, member, message)` rows.
    ///
    /// Order-sensitive: two results with the same changes in another order
    /// have different digests.
    pub fn digest(&self) -> Result<String> {
        let rows: Vec<DigestRow<'_>> = self
            .changes
            .iter()
            .map(|change| DigestRow {
                code: change.code().as_str(),
                member: change.qualified_name(),
                message: change.message.as_deref(),
            })
            .collect();
        let canonical = serde_json::to_string(&(&self.versions, rows))?;
        Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
    }

    pub fn breaking(&self) -> impl Iterator<Item = &Change<'a>> {
        self.with_status(ChangeStatus::Breaking)
    }

    /// Compatible changes, excluding `no_change` sentinels.
    pub fn compatible(&self) -> impl Iterator<Item = &Change<'a>> {
        self.with_status(ChangeStatus::Compatible)
    }

    fn with_status(&self, status: ChangeStatus) -> impl Iterator<Item = &Change<'a>> {
        self.changes
            .iter()
            .filter(move |c| !c.is_no_change() && c.info.status == status)
    }
}
