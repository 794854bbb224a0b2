//! Identifier newtypes.

use std::fmt;

/// Opaque, caller-supplied identifier correlating one origination attempt
/// with the call it eventually produces. Unique per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(String);

impl CallId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Destination address for an outgoing call (a tel/sip URI in text form).
///
/// The engine never parses the address; it is carried opaquely to the
/// origination collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user a call is placed on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserHandle(pub u32);

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Identifies the phone account an outgoing call is originated through.
///
/// The admission check and the origination request are both keyed by this
/// handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneAccountHandle {
    /// Connection-service component that owns the account.
    pub component_name: String,
    /// Account identifier within the component.
    pub id: String,
    /// User the account belongs to.
    pub user: UserHandle,
}

impl PhoneAccountHandle {
    pub fn new(component_name: impl Into<String>, id: impl Into<String>, user: UserHandle) -> Self {
        Self {
            component_name: component_name.into(),
            id: id.into(),
            user,
        }
    }
}

impl fmt::Display for PhoneAccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.component_name, self.id, self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_id_roundtrips_verbatim() {
        let id = CallId::new("attempt-7");
        assert_eq!(id.as_str(), "attempt-7");
        assert_eq!(id.to_string(), "attempt-7");
    }

    #[test]
    fn phone_account_handle_display() {
        let handle = PhoneAccountHandle::new("com.example/Svc", "acct0", UserHandle(10));
        assert_eq!(handle.to_string(), "com.example/Svc/acct0@user:10");
    }
}
