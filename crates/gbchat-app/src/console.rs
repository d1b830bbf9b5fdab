//! Terminal input/output for the chat session.
//!
//! [`Console`] is the only way the session talks to the user, so the whole
//! controller can run against [`ScriptedConsole`] in tests.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// What one read from the user produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C at the prompt
    Interrupted,
    /// Ctrl-D or closed stdin
    Eof,
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("line editor error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}

pub trait Console {
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent, ConsoleError>;

    fn print_line(&mut self, text: &str);

    /// Print without a line terminator.
    fn print_inline(&mut self, text: &str);

    /// Print `text` one character at a time, then end the line.
    fn typewrite(&mut self, text: &str);
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent, ConsoleError> {
        (**self).read_line(prompt)
    }

    fn print_line(&mut self, text: &str) {
        (**self).print_line(text)
    }

    fn print_inline(&mut self, text: &str) {
        (**self).print_inline(text)
    }

    fn typewrite(&mut self, text: &str) {
        (**self).typewrite(text)
    }
}

/// Write `text` character by character, flushing and pausing `delay` after
/// each one, then a newline.
pub fn typewrite_to<W: Write>(out: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
        out.flush()?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    writeln!(out)?;
    out.flush()
}

/// rustyline prompt plus stdout with the typewriter effect
pub struct TerminalConsole {
    editor: DefaultEditor,
    typewriter_delay: Duration,
}

impl TerminalConsole {
    pub fn new(typewriter_delay: Duration) -> Result<Self, ConsoleError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            typewriter_delay,
        })
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent, ConsoleError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        warn!(error = %e, "failed to add line to editor history");
                    }
                }
                Ok(InputEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(InputEvent::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn print_line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn print_inline(&mut self, text: &str) {
        print!("{}", text);
        if let Err(e) = io::stdout().flush() {
            warn!(error = %e, "failed to flush stdout");
        }
    }

    fn typewrite(&mut self, text: &str) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = typewrite_to(&mut out, text, self.typewriter_delay) {
            warn!(error = %e, "typewriter output failed");
        }
    }
}

/// One scripted read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    Line(String),
    Interrupt,
    /// The read fails with an I/O error carrying this message
    Fault(String),
}

/// In-memory console: replays queued input, then reports end of input.
/// Everything printed (prompts included) is captured in [`ScriptedConsole::output`].
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<ScriptedInput>,
    prompts: Vec<String>,
    output: String,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut console = Self::new();
        for line in lines {
            console.push_line(line);
        }
        console
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.inputs.push_back(ScriptedInput::Line(line.into()));
        self
    }

    pub fn push_interrupt(&mut self) -> &mut Self {
        self.inputs.push_back(ScriptedInput::Interrupt);
        self
    }

    pub fn push_fault(&mut self, message: impl Into<String>) -> &mut Self {
        self.inputs.push_back(ScriptedInput::Fault(message.into()));
        self
    }

    /// Prompts shown so far, one per read
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Input not consumed yet
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent, ConsoleError> {
        self.prompts.push(prompt.to_string());
        self.output.push_str(prompt);
        match self.inputs.pop_front() {
            Some(ScriptedInput::Line(line)) => {
                self.output.push_str(&line);
                self.output.push('\n');
                Ok(InputEvent::Line(line))
            }
            Some(ScriptedInput::Interrupt) => Ok(InputEvent::Interrupted),
            Some(ScriptedInput::Fault(message)) => {
                Err(io::Error::new(io::ErrorKind::Other, message).into())
            }
            None => Ok(InputEvent::Eof),
        }
    }

    fn print_line(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn print_inline(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn typewrite(&mut self, text: &str) {
        self.print_line(text);
    }
}
