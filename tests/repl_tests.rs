//! Integration tests for the terminal conversation loop.
//!
//! Input is scripted through an in-memory reader; a counting mock model
//! verifies when inference is (and is not) invoked.

use async_trait::async_trait;
use delphi::cli::output::Output;
use delphi::llm::{ChatModel, ModelResponse};
use delphi::session::{ChatLoop, Conversation, TurnProcessor};
use delphi::tools::ToolRegistry;
use delphi::types::{AppError, Message, Result, ToolDefinition};
use rstest::rstest;
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Counts inference calls and replays a script; errors once exhausted.
struct CountingModel {
    responses: Mutex<VecDeque<ModelResponse>>,
    calls: Arc<AtomicUsize>,
}

impl CountingModel {
    fn new(answers: Vec<&str>) -> Self {
        let responses = answers
            .into_iter()
            .map(|text| ModelResponse {
                content: text.to_string(),
                tool_calls: vec![],
                finish_reason: "STOP".to_string(),
            })
            .collect::<VecDeque<_>>();
        Self {
            responses: Mutex::new(responses),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl ChatModel for CountingModel {
    async fn complete(
        &self,
        _system: Option<&str>,
        _messages: &[Message],
        _tools: &[ToolDefinition],
    ) -> Result<ModelResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::Model("network unreachable".to_string()))
    }

    fn model_name(&self) -> &str {
        "counting"
    }
}

async fn run_loop(input: &str, model: CountingModel) -> (Conversation, Arc<AtomicUsize>) {
    let calls = model.call_counter();
    let processor = TurnProcessor::new(Box::new(model), Arc::new(ToolRegistry::new()));
    let output = Output::no_color();
    let mut conversation = Conversation::new();

    ChatLoop::new(&processor, &output)
        .run(Cursor::new(input.to_string()), &mut conversation)
        .await
        .unwrap();

    (conversation, calls)
}

#[rstest]
#[case("exit")]
#[case("quit")]
#[case("EXIT")]
#[case("Quit")]
#[case("  exit  ")]
#[tokio::test]
async fn test_exit_keywords_terminate_without_inference(#[case] keyword: &str) {
    let (conversation, calls) = run_loop(&format!("{}\n", keyword), CountingModel::new(vec![])).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(conversation.is_empty());
}

#[tokio::test]
async fn test_empty_lines_reprompt_without_inference() {
    let (conversation, calls) = run_loop("\n   \n\t\nexit\n", CountingModel::new(vec![])).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(conversation.is_empty());
}

#[tokio::test]
async fn test_eof_terminates_normally() {
    let (conversation, calls) = run_loop("", CountingModel::new(vec![])).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(conversation.is_empty());
}

#[tokio::test]
async fn test_question_is_answered_and_loop_continues() {
    let model = CountingModel::new(vec!["The capital of France is Paris."]);
    let (conversation, calls) = run_loop("what is the capital of France?\nexit\n", model).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation.messages()[1].content, "The capital of France is Paris.");
}

#[tokio::test]
async fn test_failed_turn_is_reported_and_loop_keeps_running() {
    // No scripted responses: every turn fails, but the loop must survive
    // until the exit keyword.
    let model = CountingModel::new(vec![]);
    let (conversation, calls) = run_loop("first\nsecond\nexit\n", model).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    // Failed turns leave no partial state behind.
    assert!(conversation.is_empty());
}

#[tokio::test]
async fn test_history_accumulates_across_turns() {
    let model = CountingModel::new(vec!["one", "two"]);
    let (conversation, calls) = run_loop("first question\nsecond question\nquit\n", model).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(conversation.len(), 4);
    assert_eq!(conversation.messages()[0].content, "first question");
    assert_eq!(conversation.messages()[2].content, "second question");
}
