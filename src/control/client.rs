//! Blocking protocol client, used by `termdeck remote` and the console.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use super::protocol::{self, Command, END, ERR};
use crate::canvas::Size;
use crate::player::PositionReport;

/// How long to wait for a response line. Mutating commands wait for a
/// whole transition, so this is generous.
const READ_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Client {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Client {
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host, port))
            .with_context(|| format!("Failed to connect to presenter at {}:{}", host, port))?;
        stream
            .set_read_timeout(Some(READ_TIMEOUT))
            .context("Failed to configure control connection")?;
        let reader = BufReader::new(stream.try_clone().context("Failed to clone control connection")?);
        Ok(Self {
            reader,
            writer: stream,
        })
    }

    fn send(&mut self, command: Command) -> Result<()> {
        writeln!(self.writer, "{}", command).context("Failed to send command")?;
        self.writer.flush().context("Failed to send command")?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read response")?;
        if read == 0 {
            bail!("Presenter closed the connection");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Send `command` and return its raw response lines.
    pub fn request(&mut self, command: Command) -> Result<Vec<String>> {
        self.send(command)?;
        let mut lines = vec![self.read_line()?];
        if command == Command::List {
            while lines.last().map(String::as_str) != Some(END) {
                lines.push(self.read_line()?);
            }
        }
        Ok(lines)
    }

    fn position(&mut self, command: Command) -> Result<PositionReport> {
        self.send(command)?;
        let line = self.read_line()?;
        if line == ERR {
            bail!("Presenter rejected '{}'", command);
        }
        Ok(protocol::parse_current(&line)?)
    }

    /// Slide titles in deck order.
    pub fn list(&mut self) -> Result<Vec<String>> {
        let lines = self.request(Command::List)?;
        lines
            .iter()
            .take_while(|l| l.as_str() != END)
            .map(|l| Ok(protocol::parse_slide(l)?.1))
            .collect()
    }

    pub fn current(&mut self) -> Result<PositionReport> {
        self.position(Command::Current)
    }

    pub fn next(&mut self) -> Result<PositionReport> {
        self.position(Command::Next)
    }

    pub fn prev(&mut self) -> Result<PositionReport> {
        self.position(Command::Prev)
    }

    pub fn jump(&mut self, index: usize) -> Result<PositionReport> {
        self.position(Command::Jump(index))
    }

    pub fn size(&mut self) -> Result<Size> {
        self.send(Command::Size)?;
        let line = self.read_line()?;
        Ok(protocol::parse_size(&line)?)
    }
}
