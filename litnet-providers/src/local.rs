//! Deterministic local embedding provider.
//!
//! Signed feature hashing over abstract tokens: each token lands in one
//! bucket with a hash-derived sign, weighted by sublinear term frequency,
//! then L2-normalized. Tokenization keeps hyphenated entity names intact,
//! so "IL-13" and "beta-2" survive as single features instead of decaying
//! into numbers and stopword-length fragments. Not semantically rich, but
//! stable across runs and available without a network, which makes it the
//! default for tests and offline use.

use std::collections::HashMap;

use litnet_core::cancel::CancelToken;
use litnet_core::errors::LitNetResult;
use litnet_core::traits::IEmbeddingProvider;

pub struct HashedTfProvider {
    dimensions: usize,
}

impl HashedTfProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// FNV-1a over the token bytes. The low bits pick the bucket, the top
    /// bit picks the sign, so collisions partially cancel instead of
    /// always inflating the same coordinate.
    fn hash_token(token: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in token.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    /// Lowercased tokens; hyphens are kept when they join alphanumerics
    /// (gene, variant, and chemical names are routinely hyphenated).
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .map(|s| s.trim_matches('-'))
            .filter(|s| s.len() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut tf: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            *tf.entry(token).or_default() += 1;
        }

        let mut vec = vec![0.0_f32; self.dimensions];
        for (token, count) in &tf {
            let h = Self::hash_token(token);
            let bucket = (h as usize) % self.dimensions;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            // Sublinear frequency: a token mentioned ten times is not ten
            // times the signal.
            let weight = 1.0 + (*count as f32).ln();
            vec[bucket] += sign * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashedTfProvider {
    // No I/O to abandon, so the token is not consulted.
    fn embed(&self, text: &str, _cancel: &CancelToken) -> LitNetResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn embed_batch(&self, texts: &[String], _cancel: &CancelToken) -> LitNetResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
