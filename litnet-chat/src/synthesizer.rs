//! Grounded answer synthesis.
//!
//! Gathers vector and graph evidence for a question, abstains with a
//! fixed message when both come back empty, and otherwise asks the
//! generation service with a citation-enforcing prompt. Session history
//! is appended only after generation succeeds.
//!
//! Split into a prepare and a conclude phase so the engine can release
//! the session lock while the blocking generation call is in flight.

use std::collections::BTreeSet;

use litnet_core::cancel::CancelToken;
use litnet_core::config::ChatConfig;
use litnet_core::constants::{INSUFFICIENT_EVIDENCE, MAX_PATH_PAIRS};
use litnet_core::errors::LitNetResult;
use litnet_core::models::{AskOutcome, ChatMessage, ChatTurn, GraphEvidence, Pmid, TextEvidence};
use litnet_core::traits::{IEmbeddingProvider, IGenerationService};
use litnet_retrieval::build_context;

use crate::citations;
use crate::session::ChatSession;

const SYSTEM_PROMPT: &str = "\
You are a biomedical research assistant analyzing scientific literature.

You are given evidence from PubMed abstracts and from a co-occurrence \
knowledge graph, both restricted to a subgraph the user selected. Answer \
questions based ONLY on that evidence.

Guidelines:
1. Base every claim on the provided evidence.
2. Cite the supporting PMIDs for each claim using the format [PMID:12345678].
3. If the evidence does not cover the question, say so clearly.
4. If multiple papers support a claim, cite all of them.
5. Be concise and use scientific terminology appropriately.";

/// Evidence and prompt for one question, detached from the session so
/// generation can run without any session lock held.
pub struct PreparedPrompt {
    pub messages: Vec<ChatMessage>,
    pub text_evidence: Vec<TextEvidence>,
    pub graph_evidence: Vec<GraphEvidence>,
    pub retrieved: BTreeSet<Pmid>,
}

/// Retrieve evidence and assemble the prompt, or decide to abstain.
///
/// Returns `None` when neither vector nor graph retrieval produced
/// anything; the generation service must not be called in that case.
pub fn prepare(
    session: &ChatSession,
    query: &str,
    embedder: &dyn IEmbeddingProvider,
    config: &ChatConfig,
    cancel: &CancelToken,
) -> LitNetResult<Option<PreparedPrompt>> {
    let text_evidence = session.index.query(embedder, query, config.top_k, cancel)?;
    let graph_evidence = gather_graph_evidence(session, query);

    if text_evidence.is_empty() && graph_evidence.is_empty() {
        tracing::info!(session = %session.id, "no evidence retrieved, abstaining");
        return Ok(None);
    }

    let context = build_context(&text_evidence, &graph_evidence, config);
    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
    messages.extend_from_slice(session.recent_history(config.max_history_turns));
    messages.push(ChatMessage::user(format!(
        "Evidence from the selected literature:\n\n{context}\n\n---\n\n\
         Question: {query}\n\nAnswer based on the evidence above."
    )));

    let mut retrieved: BTreeSet<Pmid> =
        text_evidence.iter().map(|hit| hit.pmid.clone()).collect();
    for evidence in &graph_evidence {
        retrieved.extend(evidence.pmids());
    }

    Ok(Some(PreparedPrompt {
        messages,
        text_evidence,
        graph_evidence,
        retrieved,
    }))
}

/// Ground a generated answer against what was retrieved.
pub fn conclude(query: &str, answer_text: String, prompt: PreparedPrompt) -> ChatTurn {
    let cited_pmids = citations::grounded_sources(&answer_text, &prompt.retrieved);
    tracing::info!(
        cited = cited_pmids.len(),
        retrieved = prompt.retrieved.len(),
        "answer generated"
    );
    ChatTurn {
        query: query.to_string(),
        answer: answer_text,
        cited_pmids,
        text_evidence: prompt.text_evidence,
        graph_evidence: prompt.graph_evidence,
    }
}

/// The fixed response for a question with no retrievable evidence.
pub fn abstention() -> AskOutcome {
    AskOutcome::Abstained {
        message: INSUFFICIENT_EVIDENCE.to_string(),
    }
}

/// Answer one question against a session's retrieval context.
///
/// Single-caller convenience over prepare/complete/conclude; the engine
/// runs the phases itself so generation happens outside the session lock.
pub fn answer(
    session: &mut ChatSession,
    query: &str,
    embedder: &dyn IEmbeddingProvider,
    generator: &dyn IGenerationService,
    config: &ChatConfig,
    cancel: &CancelToken,
) -> LitNetResult<AskOutcome> {
    let Some(prompt) = prepare(session, query, embedder, config, cancel)? else {
        return Ok(abstention());
    };
    let answer_text = generator.complete(&prompt.messages, cancel)?;
    let turn = conclude(query, answer_text, prompt);
    session.record_turn(turn.clone());
    Ok(AskOutcome::Answered(turn))
}

/// Link query entities and collect neighbor and path evidence inside the
/// selection. A missing path between two linked entities is simply not
/// evidence; it never aborts the question.
fn gather_graph_evidence(session: &ChatSession, query: &str) -> Vec<GraphEvidence> {
    let entities = session.retriever.link_entities(query);
    let mut evidence = Vec::new();

    for entity in &entities {
        let neighbors = session.retriever.neighbors(entity);
        if !neighbors.is_empty() {
            evidence.push(GraphEvidence::Neighbors {
                entity: entity.clone(),
                neighbors,
            });
        }
    }

    let mut pairs = 0;
    'outer: for (i, from) in entities.iter().enumerate() {
        for to in &entities[i + 1..] {
            if pairs >= MAX_PATH_PAIRS {
                break 'outer;
            }
            pairs += 1;
            if let Some(segments) = session.retriever.shortest_path(from, to) {
                if !segments.is_empty() {
                    evidence.push(GraphEvidence::Path {
                        from: from.clone(),
                        to: to.clone(),
                        segments,
                    });
                }
            }
        }
    }

    evidence
}
