//! Content hashes identifying evaluation inputs for memoization.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::benchmark::PeerBenchmarkDataset;
use super::engine::EvaluationInput;
use super::settings::ScoringSettings;

/// Hex SHA-256 of a value's canonical JSON encoding.
///
/// All hashed types use ordered maps, so equal values always encode to
/// identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        let bytes = serde_json::to_vec(value)?;
        Ok(Self::of_bytes(&bytes))
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form for logs
        write!(f, "{}", &self.0[..12.min(self.0.len())])
    }
}

/// Identity of one evaluation: a hash per input group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKey {
    /// KPI definitions and stage rules.
    pub rules: ContentHash,
    /// Evaluated entity: context, responses and previous axis scores.
    pub responses: ContentHash,
    /// Peer dataset, or the hash of `null` when none is supplied.
    pub benchmarks: ContentHash,
    pub settings: ContentHash,
}

impl CacheKey {
    pub fn for_evaluation(
        input: &EvaluationInput,
        benchmarks: Option<&PeerBenchmarkDataset>,
        settings: &ScoringSettings,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            rules: ContentHash::of(&(&input.definitions, &input.rules))?,
            responses: ContentHash::of(&(
                &input.context,
                &input.responses,
                &input.previous_axis_scores,
            ))?,
            benchmarks: ContentHash::of(&benchmarks)?,
            settings: ContentHash::of(settings)?,
        })
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rules={} responses={} benchmarks={} settings={}",
            self.rules, self.responses, self.benchmarks, self.settings
        )
    }
}
