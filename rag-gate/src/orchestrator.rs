//! Gate pipeline: score, then either refuse or retrieve and compose.

use std::sync::Arc;
use std::time::Instant;

use ai_llm_service::ChatCompletions;
use tracing::{debug, info};

use crate::api_types::{AskOptions, Outcome, Query, QueryResult};
use crate::cfg::{GateConfig, MAX_RETRIEVAL_K};
use crate::composer::{AnswerComposer, LlmAnswerComposer};
use crate::error::GateError;
use crate::progress::{NoopProgress, Progress};
use crate::retriever::ChunkRetriever;
use crate::scorer::{LlmRelevanceScorer, RelevanceScorer};

/// Runs one query through `Scoring → {Refused | Retrieving → Composing → Done}`.
///
/// Holds only shared read-only collaborators; wrap in `Arc` and call from as
/// many tasks as needed.
pub struct Orchestrator {
    scorer: Arc<dyn RelevanceScorer>,
    retriever: Arc<dyn ChunkRetriever>,
    composer: Arc<dyn AnswerComposer>,
    cfg: GateConfig,
}

impl Orchestrator {
    pub fn new(
        scorer: Arc<dyn RelevanceScorer>,
        retriever: Arc<dyn ChunkRetriever>,
        composer: Arc<dyn AnswerComposer>,
        cfg: GateConfig,
    ) -> Self {
        Self {
            scorer,
            retriever,
            composer,
            cfg,
        }
    }

    /// Wires the LLM-backed scorer and composer around one chat client.
    pub fn with_llm(
        llm: Arc<dyn ChatCompletions>,
        retriever: Arc<dyn ChunkRetriever>,
        cfg: GateConfig,
    ) -> Self {
        let scorer = Arc::new(LlmRelevanceScorer::new(llm.clone(), &cfg.profile));
        let composer = Arc::new(LlmAnswerComposer::new(llm));
        Self::new(scorer, retriever, composer, cfg)
    }

    pub fn config(&self) -> &GateConfig {
        &self.cfg
    }

    /// Answers `query`, or refuses it when the relevance score is below the threshold.
    ///
    /// # Errors
    /// - `EmptyQuery`, `InvalidRetrievalCount` before any upstream call
    /// - `ScoreParse` / `Service` from scoring; nothing else is attempted
    /// - `CollectionNotFound` / `Service` from retrieval; composing is skipped
    /// - `Service` from composing
    ///
    /// # Example
    /// ```no_run
    /// # use rag_gate::{AskOptions, Orchestrator};
    /// # async fn run(gate: &Orchestrator) -> Result<(), rag_gate::GateError> {
    /// let r = gate.ask("What is Oxford famous for?", &AskOptions::default()).await?;
    /// println!("{:?}: {}", r.outcome, r.answer);
    /// # Ok(()) }
    /// ```
    pub async fn ask(&self, query: &str, opts: &AskOptions) -> Result<QueryResult, GateError> {
        self.ask_with_progress(query, opts, &NoopProgress).await
    }

    /// Same as [`Orchestrator::ask`], reporting each stage to `prog`.
    pub async fn ask_with_progress(
        &self,
        query: &str,
        opts: &AskOptions,
        prog: &dyn Progress,
    ) -> Result<QueryResult, GateError> {
        let query = Query::new(query)?;
        let k = opts.k.unwrap_or(self.cfg.default_k);
        if !(1..=MAX_RETRIEVAL_K).contains(&k) {
            return Err(GateError::InvalidRetrievalCount {
                k,
                max: MAX_RETRIEVAL_K,
            });
        }
        let model = opts.model.as_deref();
        let started = Instant::now();

        prog.set_total(3);
        prog.step("evaluating relevance");
        let score = self.scorer.score(&query, model).await?;

        if !score.passes(self.cfg.threshold) {
            prog.finish("refused");
            info!(
                score = score.value(),
                threshold = self.cfg.threshold,
                latency_ms = started.elapsed().as_millis() as u64,
                "gate: refused"
            );
            return Ok(QueryResult {
                query,
                answer: self.cfg.refusal.clone(),
                chunks: Vec::new(),
                outcome: Outcome::Refused,
                score,
            });
        }

        prog.step("retrieving context");
        let collection = self.cfg.profile.collection.as_str();
        let chunks = self.retriever.retrieve(&query, collection, k).await?;
        debug!(collection, k, chunks = chunks.len(), "gate: retrieved");

        prog.step("composing answer");
        let answer = self.composer.compose(&query, &chunks, model).await?;
        prog.finish("done");

        info!(
            score = score.value(),
            collection,
            k,
            chunks = chunks.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "gate: answered"
        );
        Ok(QueryResult {
            query,
            answer,
            chunks,
            outcome: Outcome::Answered,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::ConfidenceScore;
    use crate::scorer::parse_confidence;
    use ai_llm_service::BoxFuture;
    use chunk_store::ChunkStoreError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OXFORD_REFUSAL: &str =
        "The question is irrelevant to Oxford. Please come back with a relevant question.";

    /// Parses a fixed raw model reply, so scorer tests go through the real parser.
    struct StubScorer {
        raw: &'static str,
        calls: AtomicUsize,
    }

    impl RelevanceScorer for StubScorer {
        fn score<'a>(
            &'a self,
            _query: &'a Query,
            _model: Option<&'a str>,
        ) -> BoxFuture<'a, Result<ConfidenceScore, GateError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { parse_confidence(self.raw) })
        }
    }

    enum Retrieval {
        Chunks(Vec<String>),
        MissingCollection,
    }

    struct StubRetriever {
        reply: Retrieval,
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, u64)>>,
    }

    impl ChunkRetriever for StubRetriever {
        fn retrieve<'a>(
            &'a self,
            _query: &'a Query,
            collection: &'a str,
            k: u64,
        ) -> BoxFuture<'a, Result<Vec<String>, GateError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((collection.to_string(), k));
            Box::pin(async move {
                match &self.reply {
                    Retrieval::Chunks(c) => Ok(c.clone()),
                    Retrieval::MissingCollection => {
                        Err(ChunkStoreError::CollectionNotFound(collection.to_string()).into())
                    }
                }
            })
        }
    }

    /// Answers with the first chunk it was given, and records every chunk list.
    struct EchoComposer {
        calls: AtomicUsize,
        seen: Mutex<Vec<Vec<String>>>,
    }

    impl AnswerComposer for EchoComposer {
        fn compose<'a>(
            &'a self,
            _query: &'a Query,
            chunks: &'a [String],
            _model: Option<&'a str>,
        ) -> BoxFuture<'a, Result<String, GateError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(chunks.to_vec());
            Box::pin(async move {
                Ok(match chunks.first() {
                    Some(first) => format!("According to the guide: {first}"),
                    None => String::new(),
                })
            })
        }
    }

    struct Harness {
        scorer: Arc<StubScorer>,
        retriever: Arc<StubRetriever>,
        composer: Arc<EchoComposer>,
        gate: Orchestrator,
    }

    fn harness(raw_score: &'static str, reply: Retrieval) -> Harness {
        let scorer = Arc::new(StubScorer {
            raw: raw_score,
            calls: AtomicUsize::new(0),
        });
        let retriever = Arc::new(StubRetriever {
            reply,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        });
        let composer = Arc::new(EchoComposer {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        });
        let gate = Orchestrator::new(
            scorer.clone(),
            retriever.clone(),
            composer.clone(),
            GateConfig::default(),
        );
        Harness {
            scorer,
            retriever,
            composer,
            gate,
        }
    }

    fn oxford_chunks() -> Vec<String> {
        vec![
            "Oxford is home to the oldest university in the English-speaking world.".into(),
            "The Bodleian Library holds over 13 million printed items.".into(),
        ]
    }

    impl Harness {
        fn retrievals(&self) -> usize {
            self.retriever.calls.load(Ordering::SeqCst)
        }
        fn compositions(&self) -> usize {
            self.composer.calls.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn low_score_refuses_without_retrieval_or_composition() {
        let h = harness("0.5", Retrieval::Chunks(oxford_chunks()));
        let r = h.gate.ask("What is Oxford famous for?", &AskOptions::default()).await.unwrap();

        assert_eq!(r.outcome, Outcome::Refused);
        assert_eq!(r.answer, OXFORD_REFUSAL);
        assert!(r.chunks.is_empty());
        assert_eq!(h.retrievals(), 0);
        assert_eq!(h.compositions(), 0);
    }

    #[tokio::test]
    async fn composer_receives_exactly_the_retrieved_chunks() {
        let h = harness("0.9", Retrieval::Chunks(oxford_chunks()));
        let r = h.gate.ask("Tell me about Oxford", &AskOptions::default()).await.unwrap();

        assert_eq!(r.outcome, Outcome::Answered);
        assert_eq!(r.chunks, oxford_chunks());
        assert_eq!(*h.composer.seen.lock().unwrap(), vec![oxford_chunks()]);
    }

    #[tokio::test]
    async fn score_equal_to_threshold_passes() {
        let h = harness("0.8", Retrieval::Chunks(oxford_chunks()));
        let r = h.gate.ask("Oxford colleges", &AskOptions::default()).await.unwrap();

        assert_eq!(r.outcome, Outcome::Answered);
        assert_eq!(r.score.value(), 0.8);
        assert_eq!(h.retrievals(), 1);
    }

    #[tokio::test]
    async fn unparseable_score_stops_the_pipeline() {
        let h = harness("high", Retrieval::Chunks(oxford_chunks()));
        let err = h.gate.ask("Oxford?", &AskOptions::default()).await.unwrap_err();

        assert!(matches!(err, GateError::ScoreParse { ref raw } if raw == "high"));
        assert_eq!(h.retrievals(), 0);
        assert_eq!(h.compositions(), 0);
    }

    #[tokio::test]
    async fn same_query_twice_gives_identical_results() {
        let h = harness("0.95", Retrieval::Chunks(oxford_chunks()));
        let a = h.gate.ask("What is Oxford famous for?", &AskOptions::default()).await.unwrap();
        let b = h.gate.ask("What is Oxford famous for?", &AskOptions::default()).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn oxford_question_is_answered_from_context() {
        let h = harness("0.95", Retrieval::Chunks(oxford_chunks()));
        let r = h.gate.ask("What is Oxford famous for?", &AskOptions::default()).await.unwrap();

        assert_eq!(r.score.value(), 0.95);
        assert!(r.answer.contains(&oxford_chunks()[0]));
        assert_eq!(r.chunks.len(), 2);
        assert_eq!(
            *h.retriever.seen.lock().unwrap(),
            vec![("Oxford-Guide-2022".to_string(), 8)]
        );
    }

    #[tokio::test]
    async fn pizza_question_is_refused() {
        let h = harness("0.1", Retrieval::Chunks(oxford_chunks()));
        let r = h.gate.ask("Best pizza recipe?", &AskOptions::default()).await.unwrap();

        assert_eq!(r.answer, OXFORD_REFUSAL);
        assert!(r.chunks.is_empty());
        assert_eq!(r.outcome, Outcome::Refused);
    }

    #[tokio::test]
    async fn missing_collection_propagates_and_skips_composer() {
        let h = harness("0.95", Retrieval::MissingCollection);
        let err = h.gate.ask("What is Oxford famous for?", &AskOptions::default()).await.unwrap_err();

        assert!(
            matches!(err, GateError::CollectionNotFound { ref collection } if collection == "Oxford-Guide-2022")
        );
        assert_eq!(h.compositions(), 0);
    }

    #[tokio::test]
    async fn empty_context_still_composes() {
        let h = harness("0.9", Retrieval::Chunks(Vec::new()));
        let r = h.gate.ask("Oxford trivia", &AskOptions::default()).await.unwrap();

        assert_eq!(r.outcome, Outcome::Answered);
        assert!(r.chunks.is_empty());
        assert_eq!(r.answer, "");
        assert_eq!(h.compositions(), 1);
    }

    #[tokio::test]
    async fn caller_contract_violations_cost_nothing() {
        let h = harness("0.9", Retrieval::Chunks(oxford_chunks()));

        let err = h.gate.ask("   ", &AskOptions::default()).await.unwrap_err();
        assert!(matches!(err, GateError::EmptyQuery));

        for k in [0, 21] {
            let opts = AskOptions {
                k: Some(k),
                model: None,
            };
            let err = h.gate.ask("Oxford", &opts).await.unwrap_err();
            assert!(matches!(err, GateError::InvalidRetrievalCount { max: 20, .. }));
        }
        assert_eq!(h.scorer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn explicit_k_and_trimmed_query_are_used() {
        let h = harness("1", Retrieval::Chunks(oxford_chunks()));
        let opts = AskOptions {
            k: Some(3),
            model: Some("llama-3.1-8b-instant".into()),
        };
        let r = h.gate.ask("  Oxford museums  ", &opts).await.unwrap();

        assert_eq!(r.query.as_str(), "Oxford museums");
        assert_eq!(h.retriever.seen.lock().unwrap()[0].1, 3);
    }

    #[derive(Default)]
    struct RecordingProgress {
        steps: Mutex<Vec<String>>,
        finished: Mutex<Option<String>>,
    }

    impl Progress for RecordingProgress {
        fn step(&self, msg: &str) {
            self.steps.lock().unwrap().push(msg.to_string());
        }
        fn finish(&self, msg: &str) {
            *self.finished.lock().unwrap() = Some(msg.to_string());
        }
    }

    #[tokio::test]
    async fn progress_reports_each_stage() {
        let h = harness("0.9", Retrieval::Chunks(oxford_chunks()));
        let prog = RecordingProgress::default();
        h.gate
            .ask_with_progress("Oxford", &AskOptions::default(), &prog)
            .await
            .unwrap();
        assert_eq!(
            *prog.steps.lock().unwrap(),
            vec!["evaluating relevance", "retrieving context", "composing answer"]
        );
        assert_eq!(prog.finished.lock().unwrap().as_deref(), Some("done"));

        let h = harness("0.2", Retrieval::Chunks(oxford_chunks()));
        let prog = RecordingProgress::default();
        h.gate
            .ask_with_progress("pizza", &AskOptions::default(), &prog)
            .await
            .unwrap();
        assert_eq!(*prog.steps.lock().unwrap(), vec!["evaluating relevance"]);
        assert_eq!(prog.finished.lock().unwrap().as_deref(), Some("refused"));
    }
}
