#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

const RESULT_DOMAIN: &str = "geoquiz";
const RESULT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded result payload.
pub(crate) const RESULT_HEADER: &str = "geoquiz:v1";
/// Delimiter used to separate the prefix, score and payload.
const FIELD_DELIMITER: char = ':';

/// Shareable record of a finished session's score and answer lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SessionResultCode {
    /// Number of objectives dealt for the session.
    pub total: u32,
    /// Number of objectives answered correctly.
    pub correct: u32,
    /// Milliseconds the score timer accumulated.
    pub elapsed_ms: u64,
    /// Names answered correctly, in answer order.
    pub correct_names: Vec<String>,
    /// Objective names revealed as missed, in reveal order.
    pub missed_targets: Vec<String>,
}

impl SessionResultCode {
    /// Encodes the result into a single-line string suitable for sharing.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializablePayload {
            elapsed_ms: self.elapsed_ms,
            correct_names: self.correct_names.clone(),
            missed_targets: self.missed_targets.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("result code serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{RESULT_HEADER}:{}/{}:{encoded}", self.correct, self.total)
    }

    /// Decodes a result from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, ResultCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ResultCodeError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ResultCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(ResultCodeError::MissingVersion)?;
        let score = parts.next().ok_or(ResultCodeError::MissingScore)?;
        let payload = parts.next().ok_or(ResultCodeError::MissingPayload)?;

        if domain != RESULT_DOMAIN {
            return Err(ResultCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != RESULT_VERSION {
            return Err(ResultCodeError::UnsupportedVersion(version.to_owned()));
        }

        let (correct, total) = parse_score(score)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ResultCodeError::InvalidEncoding)?;
        let decoded: SerializablePayload =
            serde_json::from_slice(&bytes).map_err(ResultCodeError::InvalidPayload)?;

        Ok(Self {
            total,
            correct,
            elapsed_ms: decoded.elapsed_ms,
            correct_names: decoded.correct_names,
            missed_targets: decoded.missed_targets,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializablePayload {
    elapsed_ms: u64,
    correct_names: Vec<String>,
    missed_targets: Vec<String>,
}

/// Errors that can occur while decoding result code strings.
#[derive(Debug)]
pub(crate) enum ResultCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded result.
    MissingPrefix,
    /// The encoded result did not contain a version segment.
    MissingVersion,
    /// The encoded result did not include a score segment.
    MissingScore,
    /// The encoded result did not include the payload segment.
    MissingPayload,
    /// The encoded result used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded result used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The score could not be parsed from the encoded result.
    InvalidScore(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for ResultCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "result code was empty"),
            Self::MissingPrefix => write!(f, "result code is missing the prefix"),
            Self::MissingVersion => write!(f, "result code is missing the version"),
            Self::MissingScore => write!(f, "result code is missing the score"),
            Self::MissingPayload => write!(f, "result code is missing the payload"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "result code prefix '{prefix}' is not supported")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "result code version '{version}' is not supported")
            }
            Self::InvalidScore(score) => write!(f, "could not parse score '{score}'"),
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode result payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse result payload: {error}")
            }
        }
    }
}

impl Error for ResultCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_score(score: &str) -> Result<(u32, u32), ResultCodeError> {
    let (correct, total) = score
        .split_once('/')
        .ok_or_else(|| ResultCodeError::InvalidScore(score.to_owned()))?;

    let correct = correct
        .trim()
        .parse::<u32>()
        .map_err(|_| ResultCodeError::InvalidScore(score.to_owned()))?;
    let total = total
        .trim()
        .parse::<u32>()
        .map_err(|_| ResultCodeError::InvalidScore(score.to_owned()))?;

    if total == 0 || correct > total {
        return Err(ResultCodeError::InvalidScore(score.to_owned()));
    }

    Ok((correct, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_perfect_session() {
        let result = SessionResultCode {
            total: 3,
            correct: 3,
            elapsed_ms: 45_210,
            correct_names: vec![
                "France".to_string(),
                "Germany".to_string(),
                "Spain".to_string(),
            ],
            missed_targets: Vec::new(),
        };

        let encoded = result.encode();
        assert!(encoded.starts_with(&format!("{RESULT_HEADER}:3/3:")));

        let decoded = SessionResultCode::decode(&encoded).expect("result decodes");
        assert_eq!(result, decoded);
    }

    #[test]
    fn round_trip_mixed_session() {
        let result = SessionResultCode {
            total: 4,
            correct: 2,
            elapsed_ms: 91_780,
            correct_names: vec!["Kenya".to_string(), "Ghana".to_string()],
            missed_targets: vec!["Chad".to_string(), "Togo".to_string()],
        };

        let encoded = result.encode();
        assert!(encoded.starts_with(&format!("{RESULT_HEADER}:2/4:")));

        let decoded = SessionResultCode::decode(&encoded).expect("result decodes");
        assert_eq!(result, decoded);
    }

    #[test]
    fn decode_rejects_foreign_prefixes() {
        let error = SessionResultCode::decode("flagquiz:v1:2/4:e30").expect_err("prefix must fail");

        assert!(matches!(error, ResultCodeError::InvalidPrefix(_)));
    }

    #[test]
    fn decode_rejects_impossible_scores() {
        let error = SessionResultCode::decode("geoquiz:v1:5/4:e30").expect_err("score must fail");

        assert!(matches!(error, ResultCodeError::InvalidScore(_)));
    }

    #[test]
    fn decode_rejects_empty_strings() {
        let error = SessionResultCode::decode("   ").expect_err("empty input must fail");

        assert!(matches!(error, ResultCodeError::EmptyPayload));
    }
}
