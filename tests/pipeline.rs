use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use paracom::{
    BackendError, BoundaryDetector, BoundarySet, CandidateLine, ChunkConfig, DetectorConfig,
    LlmBoundaryDetector, ModelBackend, OllamaClient, OllamaConfig, ParagraphError, PipelineConfig,
    Transcript, run_pipeline,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Detector replaying one fixed boundary set per trial and recording its input
struct FixedDetector {
    results: Mutex<VecDeque<BoundarySet>>,
    seen: Mutex<Vec<Vec<CandidateLine>>>,
}

impl FixedDetector {
    fn new(results: Vec<BoundarySet>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl BoundaryDetector for FixedDetector {
    async fn detect(&self, candidates: &[CandidateLine]) -> Result<BoundarySet, BackendError> {
        self.seen.lock().unwrap().push(candidates.to_vec());
        Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Model backend replaying canned replies
struct ScriptedBackend {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedBackend {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        })
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn complete(&self, _prompt: &str) -> Result<String, BackendError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(BackendError::EmptyResponse)
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn transcript(lines: &[&str]) -> Transcript {
    Transcript::new(lines.iter().map(|s| s.to_string()).collect())
}

fn config(trials: usize) -> PipelineConfig {
    PipelineConfig {
        trials,
        ..Default::default()
    }
}

fn one_attempt() -> DetectorConfig {
    DetectorConfig {
        max_attempts: 1,
        ..Default::default()
    }
}

#[tokio::test]
async fn single_trial_boundary_inserts_blank_line() {
    let detector = FixedDetector::new(vec![BoundarySet::from([3])]);

    let output = run_pipeline(&transcript(&["A", "B", "C", "D"]), &detector, &config(1))
        .await
        .unwrap();

    assert_eq!(output.lines, vec!["A", "B", "", "C", "D"]);
    assert_eq!(output.aggregate.boundaries, BoundarySet::from([3]));
}

#[tokio::test]
async fn three_trials_keep_only_majority_boundaries() {
    let detector = FixedDetector::new(vec![
        BoundarySet::from([3]),
        BoundarySet::from([3, 4]),
        BoundarySet::from([2]),
    ]);

    let output = run_pipeline(&transcript(&["A", "B", "C", "D"]), &detector, &config(3))
        .await
        .unwrap();

    let tally: Vec<(usize, usize)> = output.aggregate.tally.iter().collect();
    assert_eq!(tally, vec![(2, 1), (3, 2), (4, 1)]);
    assert_eq!(output.aggregate.boundaries, BoundarySet::from([3]));
    assert_eq!(output.lines, vec!["A", "B", "", "C", "D"]);
    assert_eq!(detector.calls(), 3);
}

#[tokio::test]
async fn skipped_lines_are_never_shown_or_marked() {
    let detector = FixedDetector::new(vec![BoundarySet::from([1, 3])]);
    let config = PipelineConfig {
        skip_line_prefixes: vec!["###".to_string()],
        ..Default::default()
    };

    let output = run_pipeline(&transcript(&["### note", "Hello", "World"]), &detector, &config)
        .await
        .unwrap();

    let seen = detector.seen.lock().unwrap();
    assert_eq!(
        seen[0],
        vec![CandidateLine::new(2, "Hello"), CandidateLine::new(3, "World")]
    );
    assert_eq!(output.candidate_count, 2);
    assert_eq!(output.aggregate.boundaries, BoundarySet::from([3]));
    assert_eq!(output.lines, vec!["### note", "Hello", "", "World"]);
}

#[tokio::test]
async fn malformed_reply_counts_as_empty_trial() {
    let backend = ScriptedBackend::new(&["2, 4", "I could not find any paragraphs.", "4"]);
    let detector = LlmBoundaryDetector::new(backend, one_attempt()).unwrap();

    let output = run_pipeline(&transcript(&["A", "B", "C", "D"]), &detector, &config(3))
        .await
        .unwrap();

    assert_eq!(output.aggregate.trials[1], BoundarySet::new());
    assert_eq!(output.aggregate.boundaries, BoundarySet::from([4]));
    assert_eq!(output.lines, vec!["A", "B", "C", "", "D"]);
}

#[tokio::test]
async fn backend_failure_aborts_the_run() {
    // Second trial finds the backend gone
    let backend = ScriptedBackend::new(&["2"]);
    let detector = LlmBoundaryDetector::new(backend, one_attempt()).unwrap();

    let result = run_pipeline(&transcript(&["A", "B", "C"]), &detector, &config(3)).await;

    assert!(matches!(result, Err(ParagraphError::Backend(_))));
}

#[tokio::test]
async fn empty_transcript_is_rejected_before_detection() {
    let detector = FixedDetector::new(vec![]);

    let result = run_pipeline(&Transcript::default(), &detector, &config(1)).await;

    assert!(matches!(result, Err(ParagraphError::EmptyTranscript)));
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn zero_trials_is_rejected_before_detection() {
    let detector = FixedDetector::new(vec![]);

    let result = run_pipeline(&transcript(&["A"]), &detector, &config(0)).await;

    assert!(matches!(result, Err(ParagraphError::InvalidConfig(_))));
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn output_preserves_every_input_line() {
    let lines: Vec<String> = (1..=50).map(|i| format!("speaker {}: line {}", i % 3, i)).collect();
    let input = Transcript::new(lines.clone());
    let detector = FixedDetector::new(vec![BoundarySet::from([1, 7, 8, 20, 49, 50])]);

    let output = run_pipeline(&input, &detector, &config(1)).await.unwrap();

    let non_blank: Vec<&String> = output.lines.iter().filter(|l| !l.is_empty()).collect();
    assert_eq!(non_blank, lines.iter().collect::<Vec<_>>());
    assert_eq!(output.lines.len(), 55);
}

#[tokio::test]
async fn ollama_backend_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": "3"},
            "done": true
        })))
        .expect(2)
        .mount(&server)
        .await;

    let backend = Arc::new(OllamaClient::new(OllamaConfig {
        base_url: server.uri(),
        ..Default::default()
    }));
    let detector = LlmBoundaryDetector::new(
        backend,
        DetectorConfig {
            chunking: ChunkConfig {
                window_size: 3,
                overlap: 2,
                boundary_margin: 1,
            },
            max_attempts: 1,
            ..Default::default()
        },
    )
    .unwrap();

    // Lines 1-3 and 2-4 are sent; line 3 is only eligible in the second chunk
    let output = run_pipeline(&transcript(&["A", "B", "C", "D"]), &detector, &config(1))
        .await
        .unwrap();

    assert_eq!(output.lines, vec!["A", "B", "", "C", "D"]);
}
