use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of leading characters of the composite key that identify the branch.
pub const BRANCH_CODE_LEN: usize = 4;

/// Composite badge key used by the external ledger: a fixed-width branch code
/// followed by the registration number, e.g. `"0601000343"` is branch `0601`,
/// registration `000343`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(raw: impl Into<String>) -> anyhow::Result<Self> {
        let raw = raw.into();
        if raw.len() <= BRANCH_CODE_LEN {
            anyhow::bail!("employee id '{}' is too short to carry a branch code", raw);
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            anyhow::bail!("employee id '{}' contains non-alphanumeric characters", raw);
        }
        Ok(Self(raw))
    }

    /// Branch code, the ledger's `FILIAL` column.
    pub fn branch(&self) -> &str {
        &self.0[..BRANCH_CODE_LEN]
    }

    /// Registration number, the ledger's `MAT` column.
    pub fn registration(&self) -> &str {
        &self.0[BRANCH_CODE_LEN..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_branch_and_registration() {
        let id = EmployeeId::new("0601000343").unwrap();
        assert_eq!(id.branch(), "0601");
        assert_eq!(id.registration(), "000343");
    }

    #[test]
    fn rejects_short_or_garbled_ids() {
        assert!(EmployeeId::new("0601").is_err());
        assert!(EmployeeId::new("0601 00343").is_err());
    }
}
