use serde::{Deserialize, Serialize};

use crate::error::{PatchError, PatchResult};

/// Options controlling how hunks are grouped and padded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Unchanged lines kept around each change. `0` yields bare hunks.
    pub context_lines: u32,
    /// Extra unchanged lines allowed between two changes before they are
    /// split into separate hunks.
    pub interhunk_lines: u32,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_lines: Self::DEFAULT_CONTEXT_LINES,
            interhunk_lines: 0,
        }
    }
}

impl DiffConfig {
    /// Context width used by `git diff` and `diff -u`.
    pub const DEFAULT_CONTEXT_LINES: u32 = 3;

    /// Build a config from an untrusted, signed context count.
    pub fn with_context_lines(context_lines: i64) -> PatchResult<Self> {
        Ok(Self {
            context_lines: non_negative("context_lines", context_lines)?,
            ..Self::default()
        })
    }

    /// Replace the inter-hunk allowance, rejecting negative counts.
    pub fn with_interhunk_lines(self, interhunk_lines: i64) -> PatchResult<Self> {
        Ok(Self {
            interhunk_lines: non_negative("interhunk_lines", interhunk_lines)?,
            ..self
        })
    }

    /// Largest unchanged run (exclusive) that still joins two changes into
    /// one hunk.
    pub(crate) fn merge_distance(&self) -> usize {
        2 * self.context_lines as usize + self.interhunk_lines as usize
    }
}

fn non_negative(field: &str, value: i64) -> PatchResult<u32> {
    if value < 0 {
        return Err(PatchError::invalid(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    u32::try_from(value)
        .map_err(|_| PatchError::invalid(format!("{field} is too large (got {value})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert_eq!(c.context_lines, 3);
        assert_eq!(c.interhunk_lines, 0);
        assert_eq!(c.merge_distance(), 6);
    }

    #[test]
    fn zero_context_is_valid() {
        let c = DiffConfig::with_context_lines(0).unwrap();
        assert_eq!(c.context_lines, 0);
        assert_eq!(c.merge_distance(), 0);
    }

    #[test]
    fn negative_context_is_rejected() {
        let err = DiffConfig::with_context_lines(-1).unwrap_err();
        assert!(matches!(err, PatchError::InvalidInput(_)));

        let err = DiffConfig::default().with_interhunk_lines(-4).unwrap_err();
        assert!(matches!(err, PatchError::InvalidInput(_)));
    }

    #[test]
    fn oversized_context_is_rejected() {
        let err = DiffConfig::with_context_lines(i64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, PatchError::InvalidInput(_)));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: DiffConfig = serde_json::from_str(r#"{"interhunk_lines": 2}"#).unwrap();
        assert_eq!(c.context_lines, 3);
        assert_eq!(c.interhunk_lines, 2);
    }
}
