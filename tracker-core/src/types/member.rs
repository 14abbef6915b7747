//! Chat membership status as reported by the transport.

use serde::{Deserialize, Serialize};

/// Standing of a user in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberStatus {
    /// Creator and administrators may run privileged commands.
    pub fn is_privileged(self) -> bool {
        matches!(self, MemberStatus::Creator | MemberStatus::Administrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_privileged() {
        assert!(MemberStatus::Creator.is_privileged());
        assert!(MemberStatus::Administrator.is_privileged());
        assert!(!MemberStatus::Member.is_privileged());
        assert!(!MemberStatus::Restricted.is_privileged());
        assert!(!MemberStatus::Left.is_privileged());
        assert!(!MemberStatus::Banned.is_privileged());
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&MemberStatus::Administrator).unwrap();
        assert_eq!(json, "\"administrator\"");
    }
}
