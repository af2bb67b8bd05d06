use serde::{Deserialize, Serialize};
use zkc_crypto::{poseidon, HashError};
use zkc_types::{FieldElement, Standard};

/// Certifiable content.
///
/// Implementations decide their own field layout; the protocol only needs a
/// single field element summarising the content and the standard that
/// layout belongs to.
pub trait Content {
    fn hash(&self) -> Result<FieldElement, HashError>;

    fn standard(&self) -> Standard;
}

/// Converts raw input (e.g. a KYC form) into certifiable content.
pub trait FfEncoder<T: Content> {
    type Error;

    fn ff_encode(&self) -> Result<T, Self::Error>;
}

/// Content that is already an ordered list of field elements, hashed with
/// one Poseidon call. Holds between 1 and 12 fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldListContent {
    pub standard: Standard,
    pub fields: Vec<FieldElement>,
}

impl FieldListContent {
    pub fn new(standard: Standard, fields: Vec<FieldElement>) -> Self {
        Self { standard, fields }
    }
}

impl Content for FieldListContent {
    fn hash(&self) -> Result<FieldElement, HashError> {
        poseidon(&self.fields)
    }

    fn standard(&self) -> Standard {
        self.standard.clone()
    }
}
