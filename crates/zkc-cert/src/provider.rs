use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use zkc_crypto::{Point, PublicKey, Signature};
use zkc_types::FieldElement;

use crate::error::{CertificateError, CertificateResult};

/// The provider's public key and its signature over the certificate.
///
/// On the wire this is five decimal strings: `ax`/`bx` for the public key
/// point and `s`/`r8x`/`r8y` for the signature. Both points must lie on
/// the curve to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderData {
    pub public_key: PublicKey,
    pub signature: Signature,
}

#[derive(Serialize, Deserialize)]
struct WireProviderData {
    ax: String,
    bx: String,
    s: String,
    r8x: String,
    r8y: String,
}

impl ProviderData {
    pub fn new(public_key: PublicKey, signature: Signature) -> Self {
        Self {
            public_key,
            signature,
        }
    }

    fn from_wire(wire: &WireProviderData) -> CertificateResult<Self> {
        let ax = parse(&wire.ax, "invalid x coordinate of public key point")?;
        let ay = parse(&wire.bx, "invalid y coordinate of public key point")?;
        let s = parse(&wire.s, "invalid signature s")?;
        let r8x = parse(&wire.r8x, "invalid x coordinate of signature point r8")?;
        let r8y = parse(&wire.r8y, "invalid y coordinate of signature point r8")?;

        let public_key = Point::try_new(ax, ay)
            .map_err(|e| CertificateError::MalformedEncoding(format!("public key: {e}")))?;
        let r8 = Point::try_new(r8x, r8y)
            .map_err(|e| CertificateError::MalformedEncoding(format!("signature point r8: {e}")))?;

        Ok(Self {
            public_key: PublicKey::new(public_key),
            signature: Signature { r8, s },
        })
    }

    fn to_wire(self) -> WireProviderData {
        WireProviderData {
            ax: self.public_key.x().to_string(),
            bx: self.public_key.y().to_string(),
            s: self.signature.s.to_string(),
            r8x: self.signature.r8.x.to_string(),
            r8y: self.signature.r8.y.to_string(),
        }
    }
}

fn parse(text: &str, context: &str) -> CertificateResult<FieldElement> {
    FieldElement::parse_decimal(text)
        .map_err(|e| CertificateError::MalformedEncoding(format!("{context}: {e}")))
}

impl Serialize for ProviderData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProviderData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireProviderData::deserialize(deserializer)?;
        Self::from_wire(&wire).map_err(de::Error::custom)
    }
}
