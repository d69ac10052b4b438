//! Line protocol.
//!
//! Requests and responses are single newline-terminated UTF-8 lines;
//! `list` is the only command answered with several lines.
//!
//! | Request       | Response                                  |
//! |---------------|-------------------------------------------|
//! | `list`        | `slide <index> <title>` lines, then `end` |
//! | `current`     | `current <index> <depth> <title>`         |
//! | `next`        | as `current`, after advancing             |
//! | `prev`        | as `current`, after going back            |
//! | `jump <n>`    | as `current`, or `err`                    |
//! | `size`        | `size <cols> <rows>`                      |

use std::fmt;

use crate::canvas::Size;
use crate::player::PositionReport;

/// Token sent for rejected requests.
pub const ERR: &str = "err";

/// Terminator of a `list` response.
pub const END: &str = "end";

/// One parsed request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Current,
    Next,
    Prev,
    Jump(usize),
    Size,
}

/// The commands that move playback and must run on the rendering thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutatingCommand {
    Next,
    Prev,
    Jump(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("jump needs a slide index")]
    MissingIndex,
    #[error("invalid slide index '{0}'")]
    BadIndex(String),
}

impl ProtocolError {
    /// Whether the peer gets an `err` line. Unknown verbs are dropped
    /// silently.
    pub fn answers_err(&self) -> bool {
        !matches!(self, ProtocolError::UnknownVerb(_))
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        match verb {
            "list" => Ok(Command::List),
            "current" => Ok(Command::Current),
            "next" => Ok(Command::Next),
            "prev" => Ok(Command::Prev),
            "size" => Ok(Command::Size),
            "jump" => {
                let arg = words.next().ok_or(ProtocolError::MissingIndex)?;
                arg.parse()
                    .map(Command::Jump)
                    .map_err(|_| ProtocolError::BadIndex(arg.to_string()))
            }
            other => Err(ProtocolError::UnknownVerb(other.to_string())),
        }
    }

    pub fn as_mutating(&self) -> Option<MutatingCommand> {
        match *self {
            Command::Next => Some(MutatingCommand::Next),
            Command::Prev => Some(MutatingCommand::Prev),
            Command::Jump(i) => Some(MutatingCommand::Jump(i)),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::List => f.write_str("list"),
            Command::Current => f.write_str("current"),
            Command::Next => f.write_str("next"),
            Command::Prev => f.write_str("prev"),
            Command::Jump(i) => write!(f, "jump {}", i),
            Command::Size => f.write_str("size"),
        }
    }
}

/// `current <index> <depth> <title>`
pub fn current_line(report: &PositionReport) -> String {
    format!("current {} {} {}", report.wire_index(), report.depth, report.title)
}

pub fn slide_line(index: usize, title: &str) -> String {
    format!("slide {} {}", index, title)
}

pub fn size_line(size: Size) -> String {
    format!("size {} {}", size.cols, size.rows)
}

/// Error for response lines that do not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed response '{0}'")]
pub struct MalformedResponse(pub String);

fn malformed(line: &str) -> MalformedResponse {
    MalformedResponse(line.to_string())
}

/// Parse a `current` line. The title may be empty or contain spaces.
pub fn parse_current(line: &str) -> Result<PositionReport, MalformedResponse> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.splitn(4, ' ');
    if parts.next() != Some("current") {
        return Err(malformed(line));
    }
    let index: i64 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| malformed(line))?;
    let depth = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| malformed(line))?;
    let title = parts.next().unwrap_or_default().to_string();
    Ok(PositionReport {
        index: usize::try_from(index).ok(),
        depth,
        title,
    })
}

/// Parse one `slide <index> <title>` line.
pub fn parse_slide(line: &str) -> Result<(usize, String), MalformedResponse> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.splitn(3, ' ');
    if parts.next() != Some("slide") {
        return Err(malformed(line));
    }
    let index = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| malformed(line))?;
    Ok((index, parts.next().unwrap_or_default().to_string()))
}

pub fn parse_size(line: &str) -> Result<Size, MalformedResponse> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("size") {
        return Err(malformed(line));
    }
    let mut number = || -> Result<usize, MalformedResponse> {
        parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed(line))
    };
    let cols = number()?;
    let rows = number()?;
    Ok(Size::new(cols, rows))
}
