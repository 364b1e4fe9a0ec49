//! TF-IDF vectorizer producing L2-normalized sparse vectors.
//!
//! ## Algorithm
//! 1. Lowercase each document and split it into tokens: maximal runs of
//!    word characters (alphanumeric or `_`) at least two characters long
//! 2. Drop English stop words
//! 3. tf = raw term count in the document
//! 4. idf = ln((1 + n) / (1 + df)) + 1, where df is the number of
//!    documents containing the term
//! 5. Each document vector is scaled to unit length
//!
//! Because rows are unit length, cosine similarity is a plain dot product.

use crate::stopwords::ENGLISH_STOP_WORDS;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Sparse vector as (term index, weight) pairs sorted by term index.
pub type SparseVector = Vec<(usize, f64)>;

/// Split a document into lowercase tokens of two or more word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Learns a vocabulary and idf weights from a corpus.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: HashSet<&'static str>,
    /// Term to column index; columns are assigned in alphabetical order
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Vectorizer that removes English stop words.
    pub fn english() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// idf weight of a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    fn terms(&self, document: &str) -> Vec<String> {
        tokenize(document)
            .into_iter()
            .filter(|token| !self.stop_words.contains(token.as_str()))
            .collect()
    }

    /// Learn the vocabulary and idf weights, then vectorize the same documents.
    ///
    /// A document with no surviving terms maps to an empty vector.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<SparseVector> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.terms(doc.as_ref()))
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        self.vocabulary = doc_freq
            .keys()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();
        self.idf = doc_freq
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        tokenized
            .iter()
            .map(|tokens| self.weigh(tokens))
            .collect()
    }

    /// Vectorize a document against the fitted vocabulary; unseen terms are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        self.weigh(&self.terms(document))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        vector.sort_unstable_by_key(|&(idx, _)| idx);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }
}

/// Dot product of two sparse vectors sorted by index.
pub fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
