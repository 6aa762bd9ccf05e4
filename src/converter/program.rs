//! Numbered BASIC program assembly

use super::config::{limits, Config, UnevenChannels};
use super::mixer::play_keyword;
use crate::error::{Error, Result};
use std::fmt;
use std::io::Write;
use tracing::warn;

/// One numbered BASIC statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramLine {
    pub number: u32,
    pub text: String,
}

impl fmt::Display for ProgramLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.text)
    }
}

/// A complete BASIC listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub lines: Vec<ProgramLine>,
}

impl Program {
    /// Listing text, one `\n`-terminated statement per line
    pub fn render(&self) -> String {
        self.lines.iter().map(|line| format!("{}\n", line)).collect()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        for line in &self.lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Hands out line numbers
#[derive(Debug, Clone)]
struct LineCounter {
    next: u32,
    step: u32,
}

impl LineCounter {
    fn new(config: &Config) -> Self {
        Self {
            next: config.start_line,
            step: config.step,
        }
    }

    fn take(&mut self) -> Result<u32> {
        let line = self.next;
        if line > limits::MAX_LINE {
            return Err(Error::LineNumberOverflow { line });
        }
        self.next = line.saturating_add(self.step);
        Ok(line)
    }
}

/// Number the preamble and interleave the channels' PLAY strings
///
/// Row `i` of the body holds the `i`-th string of every channel. How
/// channels of different length are handled is set by `config.uneven`.
pub fn assemble(channels: &[Vec<String>], preamble: Vec<String>, config: &Config) -> Result<Program> {
    let mut counter = LineCounter::new(config);
    let mut program = Program::default();

    let mut push = |text: String| -> Result<()> {
        if !text.is_ascii() {
            return Err(Error::NonAscii(text));
        }
        let number = counter.take()?;
        program.lines.push(ProgramLine { number, text });
        Ok(())
    };

    for text in preamble {
        push(text)?;
    }

    let lengths: Vec<usize> = channels.iter().map(Vec::len).collect();
    let shortest = lengths.iter().copied().min().unwrap_or(0);
    let longest = lengths.iter().copied().max().unwrap_or(0);
    let rows = if shortest == longest {
        longest
    } else {
        match config.uneven {
            UnevenChannels::Pad => {
                warn!(?lengths, "padding shorter channels");
                longest
            }
            UnevenChannels::Truncate => {
                warn!(?lengths, "truncating to the shortest channel");
                shortest
            }
            UnevenChannels::Reject => return Err(Error::UnevenChannels { lengths }),
        }
    };

    let play = play_keyword(config);
    for row in 0..rows {
        let voices: Vec<String> = channels
            .iter()
            .map(|lines| format!("\"{}\"", lines.get(row).map(String::as_str).unwrap_or("")))
            .collect();
        push(format!("{}{}", play, voices.join(",")))?;
    }

    Ok(program)
}
