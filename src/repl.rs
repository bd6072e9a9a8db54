//! Interactive mode using rustyline
//!
//! Each non-blank line is analyzed as a symptom description.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

use crate::display::render_prediction;
use crate::errors::TriageError;
use crate::pipeline::SymptomChecker;

const PROMPT: &str = "symptoms> ";

/// What the loop should do with one line of input
#[derive(Debug, PartialEq, Eq)]
pub enum LineAction<'a> {
    Skip,
    Exit,
    Help,
    Analyze(&'a str),
}

pub fn classify_line(line: &str) -> LineAction<'_> {
    match line.trim() {
        "" => LineAction::Skip,
        "/exit" | "/quit" => LineAction::Exit,
        "/help" => LineAction::Help,
        text => LineAction::Analyze(text),
    }
}

/// Readline session with optional persistent history
pub struct ReplSession {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl ReplSession {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            history_path: None,
        })
    }

    /// History file: ~/.symptomcheck_history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }
        Ok(Self {
            editor,
            history_path: Some(history_file),
        })
    }

    /// Run until `/exit` or Ctrl-D
    pub fn run(&mut self, checker: &SymptomChecker) -> Result<()> {
        println!(
            "{} ({} conditions). Type /help for commands.",
            "symptomcheck interactive mode".bold(),
            checker.labels().len()
        );
        println!("{}", "Not a diagnosis. Seek care for severe symptoms.".dimmed());

        loop {
            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("Use /exit to quit");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(anyhow::anyhow!("Readline error: {}", err)),
            };

            match classify_line(&line) {
                LineAction::Skip => continue,
                LineAction::Exit => break,
                LineAction::Help => {
                    println!("Describe your symptoms, e.g. 'fever cough sore throat'.");
                    println!("/exit quits.");
                }
                LineAction::Analyze(text) => {
                    let _ = self.editor.add_history_entry(text);
                    match checker.predict(text) {
                        Ok(prediction) => print!("{}", render_prediction(&prediction)),
                        Err(TriageError::InvalidInput(msg)) => println!("{}", msg.yellow()),
                        Err(e) => println!("{}: {}", "Error".red(), e),
                    }
                }
            }
        }

        self.save_history()
    }

    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            self.editor.save_history(path)?;
        }
        Ok(())
    }
}
