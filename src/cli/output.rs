//! Colored output helpers for the terminal front-end.

use owo_colors::OwoColorize;
use std::io::{self, Write};

const ANSWER_RULE_WIDTH: usize = 40;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the startup banner
    pub fn banner(&self, subtitle: &str) {
        if self.colored {
            println!(
                "\n{} {}",
                "delphi".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
            println!("{}\n", subtitle.dimmed());
        } else {
            println!("\ndelphi v{}", env!("CARGO_PKG_VERSION"));
            println!("{}\n", subtitle);
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print the input prompt without a trailing newline
    pub fn prompt(&self, prompt: &str) {
        if self.colored {
            print!("{}", prompt.bright_white().bold());
        } else {
            print!("{}", prompt);
        }
        io::stdout().flush().ok();
    }

    /// Print the thinking notice shown while a turn resolves
    pub fn thinking(&self) {
        if self.colored {
            println!("{}", "Thinking...".dimmed());
        } else {
            println!("Thinking...");
        }
    }

    /// Print a final answer framed by horizontal rules
    pub fn answer(&self, answer: &str) {
        let rule = "─".repeat(ANSWER_RULE_WIDTH);
        if self.colored {
            println!("\n{}", "Answer:".bright_white().bold());
            println!("{}", rule.dimmed());
            println!("{}", answer);
            println!("{}\n", rule.dimmed());
        } else {
            let rule = "-".repeat(ANSWER_RULE_WIDTH);
            println!("\nAnswer:");
            println!("{}", rule);
            println!("{}", answer);
            println!("{}\n", rule);
        }
    }
}
