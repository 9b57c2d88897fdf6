//! Deterministic fake collaborators.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use medcot_core::errors::{LookupError, MedCotResult, ServiceError};
use medcot_core::traits::{
    IEmbeddingProvider, IFederatedSource, INliScorer, IReranker, NliDistribution, RemoteEdge,
};

fn normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    v
}

/// Pseudo-random unit vectors derived from a blake3 hash of the text.
pub struct HashEmbedder {
    dims: usize,
    calls: AtomicUsize,
}

impl HashEmbedder {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed` calls served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(32)
    }
}

impl IEmbeddingProvider for HashEmbedder {
    fn embed(&self, text: &str) -> MedCotResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut bytes = vec![0u8; self.dims];
        blake3::Hasher::new()
            .update(text.as_bytes())
            .finalize_xof()
            .fill(&mut bytes);
        Ok(normalize(
            bytes.iter().map(|&b| b as f32 / 127.5 - 1.0).collect(),
        ))
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "hash-embedder"
    }
}

/// Bag-of-keywords embedder: one dimension per keyword, set when the
/// lower-cased text contains it. Texts with no keyword get a constant
/// extra dimension so they are never the zero vector.
pub struct KeywordEmbedder {
    keywords: Vec<String>,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

impl IEmbeddingProvider for KeywordEmbedder {
    fn embed(&self, text: &str) -> MedCotResult<Vec<f32>> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = self
            .keywords
            .iter()
            .map(|k| if lower.contains(k.as_str()) { 1.0 } else { 0.0 })
            .collect();
        v.push(0.1);
        Ok(normalize(v))
    }

    fn dimensions(&self) -> usize {
        self.keywords.len() + 1
    }

    fn name(&self) -> &str {
        "keyword-embedder"
    }
}

/// Embedder that always fails, or fails for texts containing a marker.
pub struct FailingEmbedder {
    marker: Option<String>,
    inner: HashEmbedder,
}

impl FailingEmbedder {
    pub fn always() -> Self {
        Self {
            marker: None,
            inner: HashEmbedder::default(),
        }
    }

    pub fn when_contains(marker: &str) -> Self {
        Self {
            marker: Some(marker.to_string()),
            inner: HashEmbedder::default(),
        }
    }
}

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, text: &str) -> MedCotResult<Vec<f32>> {
        match &self.marker {
            Some(marker) if !text.contains(marker.as_str()) => self.inner.embed(text),
            _ => Err(ServiceError::InferenceFailed {
                service: "failing-embedder".into(),
                reason: format!("refused to embed {text:?}"),
            }
            .into()),
        }
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "failing-embedder"
    }
}

/// Reranker returning a fixed logit, with optional per-passage overrides.
pub struct FixedReranker {
    default_logit: f64,
    overrides: HashMap<String, f64>,
}

impl FixedReranker {
    pub fn new(default_logit: f64) -> Self {
        Self {
            default_logit,
            overrides: HashMap::new(),
        }
    }

    pub fn with_score(mut self, passage: &str, logit: f64) -> Self {
        self.overrides.insert(passage.to_string(), logit);
        self
    }
}

impl IReranker for FixedReranker {
    fn score(&self, _query: &str, passage: &str) -> MedCotResult<f64> {
        Ok(self
            .overrides
            .get(passage)
            .copied()
            .unwrap_or(self.default_logit))
    }

    fn name(&self) -> &str {
        "fixed-reranker"
    }
}

/// Reranker that always fails.
pub struct FailingReranker;

impl IReranker for FailingReranker {
    fn score(&self, _query: &str, _passage: &str) -> MedCotResult<f64> {
        Err(ServiceError::Unavailable {
            service: "failing-reranker".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing-reranker"
    }
}

/// NLI scorer returning a fixed entailment probability, with optional
/// per-hypothesis overrides. The rest of the mass is split evenly.
pub struct FixedNli {
    entailment: f64,
    overrides: HashMap<String, f64>,
}

impl FixedNli {
    pub fn new(entailment: f64) -> Self {
        Self {
            entailment,
            overrides: HashMap::new(),
        }
    }

    pub fn with_entailment(mut self, hypothesis: &str, entailment: f64) -> Self {
        self.overrides.insert(hypothesis.to_string(), entailment);
        self
    }
}

impl INliScorer for FixedNli {
    fn predict(&self, _premise: &str, hypothesis: &str) -> MedCotResult<NliDistribution> {
        let entailment = self
            .overrides
            .get(hypothesis)
            .copied()
            .unwrap_or(self.entailment);
        let rest = (1.0 - entailment) / 2.0;
        Ok(NliDistribution {
            contradiction: rest,
            neutral: rest,
            entailment,
        })
    }

    fn name(&self) -> &str {
        "fixed-nli"
    }
}

/// NLI scorer that always fails.
pub struct FailingNli;

impl INliScorer for FailingNli {
    fn predict(&self, _premise: &str, _hypothesis: &str) -> MedCotResult<NliDistribution> {
        Err(ServiceError::Unavailable {
            service: "failing-nli".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing-nli"
    }
}

/// Federated source replaying scripted responses in call order. Once the
/// script runs out every call returns an empty edge list.
pub struct ScriptedFederatedSource {
    script: Mutex<VecDeque<Result<Vec<RemoteEdge>, LookupError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedFederatedSource {
    pub fn new(script: Vec<Result<Vec<RemoteEdge>, LookupError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(subject, object)` of every call made so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl IFederatedSource for ScriptedFederatedSource {
    fn query_pair(
        &self,
        subject: &str,
        object: &str,
        _max_results: usize,
    ) -> Result<Vec<RemoteEdge>, LookupError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((subject.to_string(), object.to_string()));
        }
        self.script
            .lock()
            .map_err(|_| LookupError::permanent("script lock poisoned"))?
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn name(&self) -> &str {
        "scripted-federated"
    }
}

/// Convenience constructor for a remote edge.
pub fn remote_edge(
    subject: (&str, &str),
    predicate: &str,
    object: (&str, &str),
    primary_source: Option<&str>,
) -> RemoteEdge {
    RemoteEdge {
        subject_id: subject.0.to_string(),
        subject_name: subject.1.to_string(),
        object_id: object.0.to_string(),
        object_name: object.1.to_string(),
        predicate: predicate.to_string(),
        primary_source: primary_source.map(String::from),
    }
}
