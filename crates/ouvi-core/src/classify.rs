//! Sentiment classification.
//!
//! The production deployment will call out to the IZA inference service;
//! until that exists, [`KeywordClassifier`] stands in with fixed keyword
//! lists and a simulated network delay. Callers must treat classification as
//! a blocking call with bounded but nonzero latency.

use std::{collections::BTreeSet, convert::Infallible, future::Future, time::Duration};

use serde::{Deserialize, Serialize};

/// Coarse sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
  Positive,
  Negative,
  Neutral,
}

/// The classifier's verdict on one body of text. Persisted as an opaque JSON
/// blob alongside the submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
  pub service:    String,
  pub sentiment:  Sentiment,
  pub confidence: f64,
  pub topics:     BTreeSet<String>,
}

impl Analysis {
  /// The placeholder substituted when a classifier backend fails. The
  /// submission itself must never be lost to a classification outage.
  pub fn neutral_placeholder(service: &str) -> Self {
    Analysis {
      service:    service.to_owned(),
      sentiment:  Sentiment::Neutral,
      confidence: 0.5,
      topics:     BTreeSet::from(["general".to_owned()]),
    }
  }
}

/// Abstraction over a sentiment backend.
///
/// Fallible by design: the stub never errors, but a remote backend will, and
/// the workflow's degrade-to-neutral policy hangs off this seam.
pub trait Classifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn classify<'a>(
    &'a self,
    text: &'a str,
  ) -> impl Future<Output = Result<Analysis, Self::Error>> + Send + 'a;
}

// ─── Keyword stub ────────────────────────────────────────────────────────────

const SERVICE_TAG: &str = "IZA_AI_V1";

const NEGATIVE_KEYWORDS: &[&str] = &["ruim", "péssimo", "buraco", "demora", "lixo"];
const POSITIVE_KEYWORDS: &[&str] = &["ótimo", "excelente", "parabéns", "bom"];

/// The infrastructure-complaint trigger; its presence widens the topic tags.
const INFRASTRUCTURE_KEYWORD: &str = "buraco";

/// Keyword-matching classifier with simulated inference latency.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
  latency: Duration,
}

impl Default for KeywordClassifier {
  fn default() -> Self {
    Self { latency: Duration::from_millis(500) }
  }
}

impl KeywordClassifier {
  /// Override the simulated latency; tests pass `Duration::ZERO`.
  pub fn with_latency(latency: Duration) -> Self {
    Self { latency }
  }

  fn analyse(text: &str) -> Analysis {
    let lower = text.to_lowercase();

    // Negative keywords are checked first; a text that trips both lists is
    // negative.
    let (sentiment, confidence) =
      if NEGATIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        (Sentiment::Negative, 0.9)
      } else if POSITIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        (Sentiment::Positive, 0.95)
      } else {
        (Sentiment::Neutral, 0.5)
      };

    let topics: BTreeSet<String> = if lower.contains(INFRASTRUCTURE_KEYWORD) {
      ["infrastructure", "service_quality"]
        .map(str::to_owned)
        .into()
    } else {
      BTreeSet::from(["general".to_owned()])
    };

    Analysis {
      service: SERVICE_TAG.to_owned(),
      sentiment,
      confidence,
      topics,
    }
  }
}

impl Classifier for KeywordClassifier {
  type Error = Infallible;

  async fn classify(&self, text: &str) -> Result<Analysis, Infallible> {
    // Stand-in for the round trip to the real inference endpoint. Per-call:
    // concurrent submissions each wait on their own timer, never on a lock.
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
    Ok(Self::analyse(text))
  }
}
