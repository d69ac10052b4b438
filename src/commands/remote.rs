//! Remote subcommand handler

use anyhow::{bail, Context, Result};

use termdeck::control::protocol::ERR;
use termdeck::control::{Client, Command};
use termdeck::Config;

/// Send one protocol line and print the response lines as received.
#[cfg(not(tarpaulin_include))]
pub fn handle(request: &str, host: Option<String>, port: Option<u16>) -> Result<()> {
    let command = Command::parse(request).with_context(|| format!("Invalid remote command '{}'", request))?;
    let config = Config::load()?;
    let host = host.unwrap_or(config.control.host);
    let port = port.unwrap_or(config.control.port);

    let mut client = Client::connect(&host, port)?;
    let lines = client.request(command)?;
    for line in &lines {
        println!("{}", line);
    }
    if lines.first().map(String::as_str) == Some(ERR) {
        bail!("Presenter rejected '{}'", command);
    }
    Ok(())
}
