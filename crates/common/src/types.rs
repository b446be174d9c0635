use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::{Uuid, Variant};

use crate::Either;

/// Reasons an identifier can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum UniqueEntityIdError {
    #[error("identifier is not a valid UUID")]
    NotValidUuid,
}

impl UniqueEntityIdError {
    /// Machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            UniqueEntityIdError::NotValidUuid => "NOT_VALID_UUID",
        }
    }
}

/// Unique identifier of an entity.
///
/// Wraps a hyphenated UUID string (stored lower-cased). Equality is value
/// equality, so an id parsed twice from the same text compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UniqueEntityId(String);

impl UniqueEntityId {
    /// Creates a new random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Resolves an optional id input.
    ///
    /// - nothing: a fresh v4 id
    /// - an existing id: returned unchanged
    /// - text: validated, `NotValidUuid` if it is not a UUID
    pub fn create(
        input: Option<Either<UniqueEntityId, String>>,
    ) -> Result<Self, UniqueEntityIdError> {
        match input {
            None => Ok(Self::new()),
            Some(Either::Left(id)) => Ok(id),
            Some(Either::Right(text)) => Self::parse(&text),
        }
    }

    /// Validates `text` as a UUID.
    ///
    /// Accepts the 36-character hyphenated form with an RFC 4122 variant and
    /// a version between 1 and 8, plus the nil and max UUIDs.
    pub fn parse(text: &str) -> Result<Self, UniqueEntityIdError> {
        if text.len() != 36 {
            return Err(UniqueEntityIdError::NotValidUuid);
        }

        let uuid = Uuid::try_parse(text).map_err(|_| UniqueEntityIdError::NotValidUuid)?;
        let special = uuid.is_nil() || uuid == Uuid::from_u128(u128::MAX);
        let rfc = matches!(uuid.get_version_num(), 1..=8) && uuid.get_variant() == Variant::RFC4122;

        if special || rfc {
            Ok(Self(uuid.hyphenated().to_string()))
        } else {
            Err(UniqueEntityIdError::NotValidUuid)
        }
    }

    /// Creates an id from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        // Only validated text is ever stored.
        Uuid::try_parse(&self.0).unwrap_or_default()
    }
}

impl Default for UniqueEntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UniqueEntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UniqueEntityId {
    type Err = UniqueEntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UniqueEntityId {
    type Error = UniqueEntityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Uuid> for UniqueEntityId {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl From<UniqueEntityId> for String {
    fn from(id: UniqueEntityId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_unique_v4_ids() {
        let id1 = UniqueEntityId::new();
        let id2 = UniqueEntityId::new();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_uuid().get_version_num(), 4);
        assert!(UniqueEntityId::parse(id1.as_str()).is_ok());
    }

    #[test]
    fn create_without_input_mints_valid_id() {
        let id = UniqueEntityId::create(None).unwrap();
        assert_eq!(id.as_uuid().get_version_num(), 4);
        assert_eq!(id.as_uuid().get_variant(), Variant::RFC4122);
    }

    #[test]
    fn create_passes_existing_id_through() {
        let existing = UniqueEntityId::new();
        let id = UniqueEntityId::create(Some(Either::Left(existing.clone()))).unwrap();
        assert_eq!(id, existing);
    }

    #[test]
    fn create_from_text_validates() {
        let text = "3b241101-e2bb-4255-8caf-4136c566a962".to_string();
        let id = UniqueEntityId::create(Some(Either::Right(text.clone()))).unwrap();
        assert_eq!(id.as_str(), text);

        let err = UniqueEntityId::create(Some(Either::Right("not-a-uuid".to_string())));
        assert_eq!(err, Err(UniqueEntityIdError::NotValidUuid));
    }

    #[test]
    fn parse_rejects_non_hyphenated_and_bad_variants() {
        assert!(UniqueEntityId::parse("3b241101e2bb42558caf4136c566a962").is_err());
        // variant nibble 'c' is not RFC 4122
        assert!(UniqueEntityId::parse("3b241101-e2bb-4255-ccaf-4136c566a962").is_err());
        // version nibble 0
        assert!(UniqueEntityId::parse("3b241101-e2bb-0255-8caf-4136c566a962").is_err());
        assert!(UniqueEntityId::parse("").is_err());
    }

    #[test]
    fn parse_accepts_nil_and_max() {
        assert!(UniqueEntityId::parse("00000000-0000-0000-0000-000000000000").is_ok());
        assert!(UniqueEntityId::parse("ffffffff-ffff-ffff-ffff-ffffffffffff").is_ok());
    }

    #[test]
    fn parse_normalizes_case() {
        let upper = UniqueEntityId::parse("3B241101-E2BB-4255-8CAF-4136C566A962").unwrap();
        let lower = UniqueEntityId::parse("3b241101-e2bb-4255-8caf-4136c566a962").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn error_code_is_stable() {
        assert_eq!(UniqueEntityIdError::NotValidUuid.code(), "NOT_VALID_UUID");
    }

    #[test]
    fn serialization_roundtrip() {
        let id = UniqueEntityId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let deserialized: UniqueEntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn deserialization_rejects_invalid_text() {
        let result: Result<UniqueEntityId, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
