//! Interactive question loop.

use docqa_core::Query;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, warn};

use crate::startup::AppContext;

pub const PROMPT: &str = "Please enter your query (type 'exit' to quit): ";
pub const FAREWELL: &str = "Thank you for using the bot!";
pub const FAILURE_NOTICE: &str = "Some issue occurred, please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Processing,
    Terminated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub answered: usize,
    pub failed: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Exit,
    Blank,
    Query(Query),
}

pub fn classify(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Input::Blank
    } else if trimmed.eq_ignore_ascii_case("exit") {
        Input::Exit
    } else {
        Input::Query(Query::new(trimmed))
    }
}

pub struct Session<'a> {
    ctx: &'a AppContext,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx, state: SessionState::AwaitingInput }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Prompt, read, answer until `exit` or end of input. Query failures and
    /// undecodable lines are reported on `output` and never end the loop;
    /// only I/O errors do.
    pub async fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<SessionReport> {
        let mut report = SessionReport::default();
        while self.state != SessionState::Terminated {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            let mut raw = Vec::new();
            if input.read_until(b'\n', &mut raw)? == 0 {
                writeln!(output)?;
                self.state = SessionState::Terminated;
                break;
            }
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Skipping input that is not valid UTF-8: {e}");
                    writeln!(output, "{FAILURE_NOTICE}")?;
                    report.failed += 1;
                    output.flush()?;
                    continue;
                }
            };

            match classify(&line) {
                Input::Exit => {
                    writeln!(output, "{FAREWELL}")?;
                    self.state = SessionState::Terminated;
                }
                Input::Blank => {}
                Input::Query(query) => {
                    self.state = SessionState::Processing;
                    debug!("Processing query: {}", query.text);
                    match self.ctx.answer_query(&query).await {
                        Ok(answer) => {
                            writeln!(output, "{}", answer.text)?;
                            report.answered += 1;
                        }
                        Err(e) => {
                            error!("Query failed: {e}");
                            writeln!(output, "{FAILURE_NOTICE}")?;
                            report.failed += 1;
                        }
                    }
                    self.state = SessionState::AwaitingInput;
                }
            }
            output.flush()?;
        }
        Ok(report)
    }
}
