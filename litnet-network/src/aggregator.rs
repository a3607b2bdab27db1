//! Document-level co-occurrence aggregation.
//!
//! Counting is per document: each unordered term pair is counted once per
//! document no matter how often the mentions repeat, and document
//! frequency rises once per term per document. Tables merge commutatively,
//! so parallel ingestion over any document ordering produces the same
//! table.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use litnet_core::models::{Document, Pmid, TermKey};

use crate::normalizer::normalize;
use crate::relations::normalize_relation_type;

/// An unordered term pair, stored with the lower key first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    pub a: TermKey,
    pub b: TermKey,
}

impl PairKey {
    /// Order the two terms so that `(x, y)` and `(y, x)` map to the same key.
    pub fn new(x: TermKey, y: TermKey) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }
}

/// An externally extracted relation attached to a pair, pass-through with
/// its source confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationLabel {
    pub relation_type: String,
    pub confidence: f64,
    pub evidence: String,
}

impl PartialEq for RelationLabel {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RelationLabel {}

impl PartialOrd for RelationLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RelationLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.relation_type
            .cmp(&other.relation_type)
            .then_with(|| self.confidence.total_cmp(&other.confidence))
            .then_with(|| self.evidence.cmp(&other.evidence))
    }
}

/// Accumulated evidence for one term pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairEntry {
    /// Number of documents mentioning both terms.
    pub count: u32,
    pub pmids: BTreeSet<Pmid>,
    /// Relation labels keyed by the document that asserted them.
    pub relations: BTreeMap<Pmid, BTreeSet<RelationLabel>>,
}

/// Per-term statistics across the corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    /// Number of documents mentioning the term at least once.
    pub doc_frequency: u32,
    pub standardized_id: Option<String>,
    pub pmids: BTreeSet<Pmid>,
}

/// The full co-occurrence table for a document set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoOccurrenceTable {
    pub pairs: BTreeMap<PairKey, PairEntry>,
    pub terms: BTreeMap<TermKey, TermStats>,
    /// Documents that contributed at least one term.
    pub num_documents: u32,
    /// Documents dropped because normalization produced no terms.
    pub skipped_documents: u32,
}

impl CoOccurrenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document into the table.
    ///
    /// Documents whose mentions normalize to nothing are recorded in
    /// `skipped_documents` and do not count towards `num_documents`.
    pub fn add_document(&mut self, document: &Document) {
        let mut doc_terms: BTreeMap<TermKey, Option<String>> = BTreeMap::new();
        for mention in &document.mentions {
            if let Some(key) = normalize(mention) {
                let entry = doc_terms.entry(key).or_insert(None);
                if entry.is_none() {
                    *entry = mention.standardized_id.clone();
                }
            }
        }
        if doc_terms.is_empty() {
            tracing::debug!(pmid = %document.pmid, "document yielded no terms, skipping");
            self.skipped_documents += 1;
            return;
        }
        self.num_documents += 1;

        for (key, standardized_id) in &doc_terms {
            let stats = self.terms.entry(key.clone()).or_default();
            stats.doc_frequency += 1;
            stats.pmids.insert(document.pmid.clone());
            merge_standardized_id(&mut stats.standardized_id, standardized_id.clone());
        }

        let keys: Vec<&TermKey> = doc_terms.keys().collect();
        for (i, x) in keys.iter().enumerate() {
            for y in &keys[i + 1..] {
                let pair = PairKey::new((*x).clone(), (*y).clone());
                let entry = self.pairs.entry(pair).or_default();
                entry.count += 1;
                entry.pmids.insert(document.pmid.clone());
            }
        }

        for relation in &document.relations {
            let subject = normalize(&relation.subject);
            let object = normalize(&relation.object);
            if let (Some(s), Some(o)) = (subject, object) {
                if s == o {
                    continue;
                }
                // Labels annotate pairs this document actually co-mentions,
                // so a relation alone never creates a zero-count entry and
                // the attachment stays independent of ingestion order.
                if !doc_terms.contains_key(&s) || !doc_terms.contains_key(&o) {
                    continue;
                }
                let pair = PairKey::new(s, o);
                if let Some(entry) = self.pairs.get_mut(&pair) {
                    entry
                        .relations
                        .entry(document.pmid.clone())
                        .or_default()
                        .insert(RelationLabel {
                            relation_type: normalize_relation_type(&relation.relation_type),
                            confidence: relation.confidence,
                            evidence: relation.evidence.clone(),
                        });
                }
            }
        }
    }

    /// Combine two tables. Commutative and associative, which is what
    /// makes parallel ingestion order-independent.
    pub fn merge(mut self, other: Self) -> Self {
        self.num_documents += other.num_documents;
        self.skipped_documents += other.skipped_documents;
        for (key, stats) in other.terms {
            let mine = self.terms.entry(key).or_default();
            mine.doc_frequency += stats.doc_frequency;
            mine.pmids.extend(stats.pmids);
            merge_standardized_id(&mut mine.standardized_id, stats.standardized_id);
        }
        for (pair, entry) in other.pairs {
            let mine = self.pairs.entry(pair).or_default();
            mine.count += entry.count;
            mine.pmids.extend(entry.pmids);
            for (pmid, labels) in entry.relations {
                mine.relations.entry(pmid).or_default().extend(labels);
            }
        }
        self
    }

    /// Aggregate a document set in parallel.
    pub fn ingest(documents: &[Document]) -> Self {
        let table = documents
            .par_iter()
            .fold(Self::new, |mut table, document| {
                table.add_document(document);
                table
            })
            .reduce(Self::new, Self::merge);
        tracing::info!(
            documents = table.num_documents,
            skipped = table.skipped_documents,
            terms = table.terms.len(),
            pairs = table.pairs.len(),
            "aggregated co-occurrence table"
        );
        table
    }
}

/// Ties between standardized ids resolve to the lexicographically lowest
/// so merge order cannot change the result.
fn merge_standardized_id(current: &mut Option<String>, incoming: Option<String>) {
    match (current.as_ref(), incoming) {
        (None, Some(id)) => *current = Some(id),
        (Some(existing), Some(id)) if id < *existing => *current = Some(id),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litnet_core::models::{EntityType, Mention};

    fn doc(pmid: &str, mentions: &[(&str, EntityType)]) -> Document {
        let mut d = Document::new(pmid, format!("title {pmid}"));
        for (text, ty) in mentions {
            d.mentions.push(Mention::new(*text, *ty));
        }
        d
    }

    #[test]
    fn pair_key_is_order_insensitive() {
        let x = TermKey::new(EntityType::Gene, "tp53");
        let y = TermKey::new(EntityType::Disease, "asthma");
        assert_eq!(PairKey::new(x.clone(), y.clone()), PairKey::new(y, x));
    }

    #[test]
    fn repeated_mentions_count_once_per_document() {
        let mut table = CoOccurrenceTable::new();
        table.add_document(&doc(
            "1",
            &[
                ("tp53", EntityType::Gene),
                ("asthma", EntityType::Disease),
                ("TP53", EntityType::Gene),
                ("tp53", EntityType::Gene),
            ],
        ));
        let pair = PairKey::new(
            TermKey::new(EntityType::Gene, "tp53"),
            TermKey::new(EntityType::Disease, "asthma"),
        );
        assert_eq!(table.pairs[&pair].count, 1);
        assert_eq!(
            table.terms[&TermKey::new(EntityType::Gene, "tp53")].doc_frequency,
            1
        );
    }

    #[test]
    fn zero_term_document_is_skipped_not_counted() {
        let mut table = CoOccurrenceTable::new();
        table.add_document(&doc("9", &[]));
        assert_eq!(table.num_documents, 0);
        assert_eq!(table.skipped_documents, 1);
    }

    #[test]
    fn count_never_exceeds_min_doc_frequency() {
        let docs = vec![
            doc("1", &[("a", EntityType::Gene), ("b", EntityType::Gene)]),
            doc("2", &[("a", EntityType::Gene), ("b", EntityType::Gene)]),
            doc("3", &[("a", EntityType::Gene)]),
        ];
        let table = CoOccurrenceTable::ingest(&docs);
        for (pair, entry) in &table.pairs {
            let df_a = table.terms[&pair.a].doc_frequency;
            let df_b = table.terms[&pair.b].doc_frequency;
            assert!(entry.count <= df_a.min(df_b));
        }
    }

    #[test]
    fn merge_is_commutative() {
        let mut left = CoOccurrenceTable::new();
        left.add_document(&doc(
            "1",
            &[("a", EntityType::Gene), ("b", EntityType::Disease)],
        ));
        let mut right = CoOccurrenceTable::new();
        right.add_document(&doc(
            "2",
            &[("b", EntityType::Disease), ("c", EntityType::Chemical)],
        ));
        assert_eq!(
            left.clone().merge(right.clone()),
            right.merge(left)
        );
    }

    #[test]
    fn relations_are_recorded_per_document() {
        use litnet_core::models::RelationAnnotation;
        let mut d = doc(
            "5",
            &[("tp53", EntityType::Gene), ("mdm2", EntityType::Gene)],
        );
        d.relations.push(RelationAnnotation {
            subject: Mention::new("mdm2", EntityType::Gene),
            object: Mention::new("tp53", EntityType::Gene),
            relation_type: "inhibits".into(),
            confidence: 0.9,
            evidence: "MDM2 inhibits TP53.".into(),
        });
        let mut table = CoOccurrenceTable::new();
        table.add_document(&d);
        let pair = PairKey::new(
            TermKey::new(EntityType::Gene, "tp53"),
            TermKey::new(EntityType::Gene, "mdm2"),
        );
        let labels = &table.pairs[&pair].relations["5"];
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.iter().next().unwrap().relation_type, "inhibits");
    }

    #[test]
    fn synonym_relation_types_collapse_to_one_label() {
        use litnet_core::models::RelationAnnotation;
        let mut d = doc(
            "7",
            &[("tp53", EntityType::Gene), ("mdm2", EntityType::Gene)],
        );
        for relation_type in ["inhibits", "inhibition", "INHIBITS"] {
            d.relations.push(RelationAnnotation {
                subject: Mention::new("mdm2", EntityType::Gene),
                object: Mention::new("tp53", EntityType::Gene),
                relation_type: relation_type.into(),
                confidence: 0.9,
                evidence: "MDM2 inhibits TP53.".into(),
            });
        }
        let mut table = CoOccurrenceTable::new();
        table.add_document(&d);
        let pair = PairKey::new(
            TermKey::new(EntityType::Gene, "tp53"),
            TermKey::new(EntityType::Gene, "mdm2"),
        );
        let labels = &table.pairs[&pair].relations["7"];
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.iter().next().unwrap().relation_type, "inhibits");
    }

    #[test]
    fn relation_without_co_mention_creates_no_pair() {
        use litnet_core::models::RelationAnnotation;
        // mdm2 is asserted by the annotator but never tagged in the text.
        let mut d = doc("8", &[("tp53", EntityType::Gene)]);
        d.relations.push(RelationAnnotation {
            subject: Mention::new("mdm2", EntityType::Gene),
            object: Mention::new("tp53", EntityType::Gene),
            relation_type: "inhibits".into(),
            confidence: 0.9,
            evidence: "MDM2 inhibits TP53.".into(),
        });
        let mut table = CoOccurrenceTable::new();
        table.add_document(&d);
        assert!(table.pairs.is_empty());
        assert!(table.pairs.values().all(|entry| entry.count > 0));
    }

    #[test]
    fn self_relations_are_dropped() {
        use litnet_core::models::RelationAnnotation;
        let mut d = doc("6", &[("tp53", EntityType::Gene)]);
        d.relations.push(RelationAnnotation {
            subject: Mention::new("tp53", EntityType::Gene),
            object: Mention::new("TP53", EntityType::Gene),
            relation_type: "regulates".into(),
            confidence: 0.8,
            evidence: "autoregulation".into(),
        });
        let mut table = CoOccurrenceTable::new();
        table.add_document(&d);
        assert!(table.pairs.is_empty());
    }
}
