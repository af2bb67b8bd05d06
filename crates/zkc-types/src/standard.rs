use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Certificate standard tag.
///
/// The tag names the content layout a certificate carries and becomes the
/// method segment of its DID (`did:<standard>:<leaf hash>`). The set is open:
/// content variants live outside this workspace and bring their own tags.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Standard(Cow<'static, str>);

impl Standard {
    /// Know-your-customer certificates.
    pub const KYC: Self = Self(Cow::Borrowed("gip1"));

    /// Create a standard from an arbitrary tag.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    /// The tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Standard({})", self.0)
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
