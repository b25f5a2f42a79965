//! Terminal conversation loop.
//!
//! Reads one line at a time: an exit keyword ends the loop normally, empty
//! input re-prompts without touching the model, anything else becomes a
//! turn. A failed turn is reported and the loop keeps going.

use crate::cli::output::Output;
use crate::session::{Conversation, TurnProcessor};
use crate::types::{AppError, Result};
use std::io::BufRead;

/// Prompt shown before each read.
pub const PROMPT: &str = "Ask me anything: ";

const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

/// The read-eval loop driving a [`TurnProcessor`].
pub struct ChatLoop<'a> {
    processor: &'a TurnProcessor,
    output: &'a Output,
}

impl<'a> ChatLoop<'a> {
    /// Create a loop over the given processor and output helper.
    pub fn new(processor: &'a TurnProcessor, output: &'a Output) -> Self {
        Self { processor, output }
    }

    /// Run until an exit keyword or end of input.
    ///
    /// Terminates normally on `exit`/`quit` (any letter casing) or EOF.
    /// Whitespace-only lines re-prompt without an inference call.
    pub async fn run<R: BufRead>(
        &self,
        mut input: R,
        conversation: &mut Conversation,
    ) -> Result<()> {
        loop {
            self.output.prompt(PROMPT);

            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .map_err(|e| AppError::Io(e.to_string()))?;
            if read == 0 {
                return Ok(());
            }

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if EXIT_KEYWORDS.iter().any(|k| text.eq_ignore_ascii_case(k)) {
                return Ok(());
            }

            self.output.thinking();
            match self.processor.process(conversation, text).await {
                Ok(answer) => self.output.answer(&answer),
                // A failed turn is reported and the loop continues.
                Err(e) => self.output.error(&e.to_string()),
            }
        }
    }
}
