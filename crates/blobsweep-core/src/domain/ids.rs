//! Run identifiers.
//!
//! 1 回の `CleanupAgent::run()` ごとに ULID を振り、
//! tracing の span と `RunSummary` で同じ値を使う。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// RunId は cleanup run の識別子
///
/// ULID なので生成順にソートできる。Display は `run-` プレフィックス付き。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Ulid);

impl RunId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_run_prefix() {
        let id = RunId::new();
        assert!(id.to_string().starts_with("run-"));
        assert_eq!(id.to_string().len(), "run-".len() + 26);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }
}
