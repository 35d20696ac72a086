// Fri Oct 16 2026 - Alex

use crate::config::Config;
use crate::memory::{SharedBuffer, ViewWidth};
use crate::tracker::CandidateTracker;
use crate::ui::display::StatusRenderer;
use anyhow::{anyhow, bail, Context};
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

pub const HELP: &str = "\
commands:
  start <id> [width]      begin narrowing <id> (width 8, 16 or 32)
  observe <id> <value>    scan for <id> currently holding <value>
  step <id> <+N|-N>       observe the last value of <id> shifted by N
  commit <id> <value>     write <value> at the offset <id> converged on
  peek <id>               read the value at the converged offset
  candidates <id>         list offsets still in the running
  status [id]             show where each search stands
  end <id>                drop the session for <id>
  attach <file>           map <file> as the memory buffer
  detach                  release the memory buffer
  help                    show this text
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Start { id: String, width: Option<ViewWidth> },
    Observe { id: String, value: i64 },
    Step { id: String, delta: i64 },
    Commit { id: String, value: i64 },
    Peek { id: String },
    Candidates { id: String },
    Status { id: Option<String> },
    End { id: String },
    Attach { path: PathBuf },
    Detach,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Accepts decimal or `0x` hex, optionally signed.
pub fn parse_value(s: &str) -> anyhow::Result<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => digits.parse::<i64>(),
    }
    .with_context(|| format!("invalid number '{}'", s))?;

    Ok(if negative { -magnitude } else { magnitude })
}

impl ReplCommand {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let arg = |i: usize, name: &str| -> anyhow::Result<String> {
            words
                .get(i)
                .map(|w| w.to_string())
                .ok_or_else(|| anyhow!("'{}' needs <{}>", words[0], name))
        };

        let command = match words[0].to_lowercase().as_str() {
            "start" => ReplCommand::Start {
                id: arg(1, "id")?,
                width: match words.get(2) {
                    Some(w) => Some(w.parse::<ViewWidth>()?),
                    None => None,
                },
            },
            "observe" | "o" => ReplCommand::Observe {
                id: arg(1, "id")?,
                value: parse_value(&arg(2, "value")?)?,
            },
            "step" | "s" => ReplCommand::Step {
                id: arg(1, "id")?,
                delta: parse_value(&arg(2, "delta")?)?,
            },
            "commit" => ReplCommand::Commit {
                id: arg(1, "id")?,
                value: parse_value(&arg(2, "value")?)?,
            },
            "peek" => ReplCommand::Peek { id: arg(1, "id")? },
            "candidates" | "c" => ReplCommand::Candidates { id: arg(1, "id")? },
            "status" => ReplCommand::Status {
                id: words.get(1).map(|w| w.to_string()),
            },
            "end" => ReplCommand::End { id: arg(1, "id")? },
            "attach" => ReplCommand::Attach {
                path: PathBuf::from(arg(1, "file")?),
            },
            "detach" => ReplCommand::Detach,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => bail!("unknown command '{}' (try 'help')", other),
        };
        Ok(Some(command))
    }
}

/// Operator shell over the tracker. Remembers the last expected value per
/// quantity so `step` can derive the next one from a known delta.
pub struct Repl {
    buffer: Arc<SharedBuffer>,
    tracker: CandidateTracker,
    last_expected: HashMap<String, i64>,
    renderer: StatusRenderer,
    config: Config,
}

impl Repl {
    pub fn new(buffer: Arc<SharedBuffer>, config: Config) -> Self {
        let tracker = CandidateTracker::from_source(buffer.clone());
        let renderer = StatusRenderer::new()
            .with_color(config.use_color)
            .with_max_items(config.candidate_preview);
        Self {
            buffer,
            tracker,
            last_expected: HashMap::new(),
            renderer,
            config,
        }
    }

    pub fn tracker(&self) -> &CandidateTracker {
        &self.tracker
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let flow = match ReplCommand::parse(&line) {
                Ok(Some(command)) => match self.execute(command, out) {
                    Ok(flow) => flow,
                    Err(e) => {
                        writeln!(out, "error: {:#}", e)?;
                        Flow::Continue
                    }
                },
                Ok(None) => Flow::Continue,
                Err(e) => {
                    writeln!(out, "error: {:#}", e)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                return Ok(());
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> anyhow::Result<Flow> {
        match command {
            ReplCommand::Start { id, width } => {
                let width = width.unwrap_or_else(|| self.config.width());
                self.tracker.start_session_with(&id, width);
                self.last_expected.remove(&id);
                writeln!(out, "{}: session started at {}", id, width)?;
            }
            ReplCommand::Observe { id, value } => self.observe(&id, value, out)?,
            ReplCommand::Step { id, delta } => {
                let last = *self
                    .last_expected
                    .get(&id)
                    .ok_or_else(|| anyhow!("no earlier value for '{}', use observe first", id))?;
                self.observe(&id, last.saturating_add(delta), out)?;
            }
            ReplCommand::Commit { id, value } => {
                self.tracker.commit(&id, value)?;
                self.buffer.flush()?;
                self.last_expected.insert(id.clone(), value);
                writeln!(out, "{}: wrote {}", id, value)?;
            }
            ReplCommand::Peek { id } => {
                let value = self.tracker.read_converged(&id)?;
                writeln!(out, "{}: {}", id, value)?;
            }
            ReplCommand::Candidates { id } => {
                let width = self.tracker.width(&id)?;
                let candidates = self.tracker.candidates(&id)?;
                writeln!(out, "{}: {} candidates", id, candidates.len())?;
                for line in self.renderer.render_candidates(&candidates, width) {
                    writeln!(out, "{}", line)?;
                }
            }
            ReplCommand::Status { id: Some(id) } => self.print_status(&id, out)?,
            ReplCommand::Status { id: None } => {
                let ids: Vec<String> = self.tracker.sessions().map(|(id, _)| id.to_string()).collect();
                if ids.is_empty() {
                    writeln!(out, "no sessions")?;
                }
                for id in ids {
                    self.print_status(&id, out)?;
                }
            }
            ReplCommand::End { id } => {
                if !self.tracker.end_session(&id) {
                    bail!("no session named '{}'", id);
                }
                self.last_expected.remove(&id);
                writeln!(out, "{}: session ended", id)?;
            }
            ReplCommand::Attach { path } => {
                self.buffer
                    .attach_file(&path)
                    .with_context(|| format!("failed to map {}", path.display()))?;
                writeln!(out, "attached {}", path.display())?;
            }
            ReplCommand::Detach => {
                self.buffer.detach();
                writeln!(out, "detached")?;
            }
            ReplCommand::Help => writeln!(out, "{}", HELP)?,
            ReplCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn observe<W: Write>(&mut self, id: &str, value: i64, out: &mut W) -> anyhow::Result<()> {
        let status = self.tracker.observe(id, value)?;
        self.last_expected.insert(id.to_string(), value);

        let width = self.tracker.width(id)?;
        writeln!(out, "{}", self.renderer.render_status(id, status, width))?;
        Ok(())
    }

    fn print_status<W: Write>(&self, id: &str, out: &mut W) -> anyhow::Result<()> {
        let status = self.tracker.status(id)?;
        let width = self.tracker.width(id)?;
        let observations = self.tracker.observation_count(id)?;
        writeln!(
            out,
            "{} ({} observations, {})",
            self.renderer.render_status(id, status, width),
            observations,
            width
        )?;
        Ok(())
    }
}
