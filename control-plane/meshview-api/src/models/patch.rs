use bytes::Bytes;
use std::borrow::Cow;

/// Raw merge-patch body. Forwarded untouched to the namespace backend,
/// which owns its interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatchPayload(Bytes);

impl PatchPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload text for logs and audit records. Invalid UTF-8 is replaced.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<Bytes> for PatchPayload {
    fn from(body: Bytes) -> Self {
        Self(body)
    }
}

impl From<&'static str> for PatchPayload {
    fn from(body: &'static str) -> Self {
        Self(Bytes::from_static(body.as_bytes()))
    }
}

impl From<String> for PatchPayload {
    fn from(body: String) -> Self {
        Self(Bytes::from(body))
    }
}

impl std::fmt::Display for PatchPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_text())
    }
}
