use std::fmt;

/// Identifies the active user data partition.
///
/// Exactly one partition is active at a time; switching identity switches
/// the partition wholesale. The anonymous partition holds data recorded
/// before any sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartitionId {
    Anonymous,
    User(String),
}

impl PartitionId {
    /// Key used for the anonymous partition's storage files.
    pub const ANONYMOUS: &'static str = "anonymous";

    /// Creates a user partition id.
    ///
    /// Partition ids become file-name components, so ids that could escape
    /// the data directory (or collide with the anonymous sentinel) are
    /// rejected.
    pub fn user(id: impl Into<String>) -> Result<Self, PartitionIdError> {
        let id = id.into();
        if id.is_empty()
            || id == Self::ANONYMOUS
            || id.contains('/')
            || id.contains('\\')
            || id.contains("..")
            || id.starts_with('.')
        {
            return Err(PartitionIdError::Invalid(id));
        }
        Ok(PartitionId::User(id))
    }

    pub fn as_str(&self) -> &str {
        match self {
            PartitionId::Anonymous => Self::ANONYMOUS,
            PartitionId::User(id) => id,
        }
    }

    /// Storage key for one entity namespace within this partition,
    /// e.g. `exercises-anonymous` or `workouts-u_42`.
    pub fn storage_key(&self, namespace: &str) -> String {
        format!("{}-{}", namespace, self.as_str())
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
pub enum PartitionIdError {
    Invalid(String),
}

impl fmt::Display for PartitionIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionIdError::Invalid(id) => write!(f, "Invalid partition id: '{}'", id),
        }
    }
}

impl std::error::Error for PartitionIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_partition_valid() {
        assert!(PartitionId::user("u_42").is_ok());
        assert!(PartitionId::user("alice").is_ok());
        assert!(PartitionId::user("user-123").is_ok());
    }

    #[test]
    fn test_user_partition_invalid() {
        assert!(PartitionId::user("").is_err());
        assert!(PartitionId::user("../evil").is_err());
        assert!(PartitionId::user("foo/bar").is_err());
        assert!(PartitionId::user("foo\\bar").is_err());
        assert!(PartitionId::user(".hidden").is_err());
        assert!(PartitionId::user("anonymous").is_err());
    }

    #[test]
    fn test_storage_keys() {
        assert_eq!(
            PartitionId::Anonymous.storage_key("exercises"),
            "exercises-anonymous"
        );
        let user = PartitionId::user("u_42").unwrap();
        assert_eq!(user.storage_key("workouts"), "workouts-u_42");
    }

    #[test]
    fn test_display() {
        assert_eq!(PartitionId::Anonymous.to_string(), "anonymous");
        assert_eq!(PartitionId::user("alice").unwrap().to_string(), "alice");
    }
}
