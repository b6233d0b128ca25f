//! Instance identity.

use crate::session::collaborators::IdentitySource;
use serde::Serialize;
use uuid::Uuid;

/// [`IdentitySource`] fixed for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceIdentity {
    id: String,
}

impl InstanceIdentity {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }

    /// Use a known identifier, e.g. one read from the host device.
    pub fn fixed(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl Default for InstanceIdentity {
    fn default() -> Self {
        Self::generate()
    }
}

impl IdentitySource for InstanceIdentity {
    fn identity(&self) -> String {
        self.id.clone()
    }
}

#[derive(Serialize)]
struct ProtoFrame<'a> {
    proto: Proto<'a>,
}

#[derive(Serialize)]
struct Proto<'a> {
    identity: &'a str,
    #[serde(rename = "type")]
    client_type: &'a str,
}

/// Encode the identification frame sent after connecting.
///
/// Produces `[{"proto":{"identity":"<identity>","type":"<client_type>"}}]`.
pub fn identity_frame(identity: &str, client_type: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&[ProtoFrame {
        proto: Proto {
            identity,
            client_type,
        },
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_identity_is_stable() {
        let identity = InstanceIdentity::generate();
        assert_eq!(identity.identity(), identity.identity());
        assert!(Uuid::parse_str(identity.as_str()).is_ok());
    }

    #[test]
    fn generated_identities_differ() {
        assert_ne!(InstanceIdentity::generate(), InstanceIdentity::generate());
    }

    #[test]
    fn identity_frame_matches_wire_shape() {
        let frame = identity_frame("device-42", "unity").unwrap();
        assert_eq!(
            frame,
            r#"[{"proto":{"identity":"device-42","type":"unity"}}]"#
        );
    }

    #[test]
    fn identity_frame_escapes_values() {
        let frame = identity_frame("a\"b", "unity").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(parsed[0]["proto"]["identity"], "a\"b");
    }
}
