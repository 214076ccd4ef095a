//! `skillbridge serve`: newline-delimited JSON host.
//!
//! Each stdin line is one directive. Lines are handled concurrently on
//! tokio's blocking pool, up to `--max-in-flight` at a time, and each
//! response (or error object) is written as one stdout line in input order.

use futures::stream::{FuturesOrdered, StreamExt};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::task::JoinError;

use skillbridge_core::{Bridge, CoreError};

use crate::cli::ServeArgs;
use crate::error::CliError;

pub async fn handle(args: &ServeArgs, bridge: Bridge) -> Result<(), CliError> {
    let limit = usize::from(args.max_in_flight);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut pending = FuturesOrdered::new();
    let mut eof = false;

    tracing::info!(max_in_flight = limit, "serving directives on stdin");

    loop {
        tokio::select! {
            line = lines.next_line(), if !eof && pending.len() < limit => {
                match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => {
                        let bridge = bridge.clone();
                        pending.push_back(tokio::task::spawn_blocking(move || {
                            bridge.handle_json(&line)
                        }));
                    }
                    None => eof = true,
                }
            }
            Some(joined) = pending.next(), if !pending.is_empty() => {
                let mut out = response_line(joined);
                out.push('\n');
                stdout.write_all(out.as_bytes()).await?;
                stdout.flush().await?;
            }
            else => break,
        }
    }

    tracing::info!("stdin closed, serve loop finished");
    Ok(())
}

/// One output line: the compact response, or `{"error":{"kind","message"}}`.
fn response_line(joined: Result<Result<String, CoreError>, JoinError>) -> String {
    let (kind, message) = match joined {
        Ok(Ok(response)) => return response,
        Ok(Err(err)) => {
            tracing::warn!(kind = err.kind(), error = %err, "directive rejected");
            (err.kind(), err.to_string())
        }
        Err(join) => {
            tracing::error!(error = %join, "directive handler panicked");
            ("internal", join.to_string())
        }
    };
    json!({ "error": { "kind": kind, "message": message } }).to_string()
}
