//! Supervisor for one leg: starts the client, feeds stdin lines to `send`, prints relayed text,
//! and exits on the leg's first lifecycle signal or Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use relay_telegram::{Client, ClientState, TeloxideConnector};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, instrument};

use crate::config::BridgeConfig;

/// Runs the Telegram leg until its update stream ends, it fails, or the process is interrupted.
#[instrument(skip(config), fields(chat_id = %config.settings.chat_id))]
pub async fn run_bridge(config: BridgeConfig) -> Result<()> {
    config.validate()?;

    let mut connector = TeloxideConnector::new();
    if let Some(url) = config.api_url()? {
        info!(api_url = %url, "Using custom Bot API server");
        connector = connector.with_api_url(url);
    }
    let client = Arc::new(Client::with_connector(
        config.settings.clone(),
        Arc::new(connector),
    ));

    let (errors_tx, mut errors_rx) = mpsc::unbounded_channel();
    let leg = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .start(errors_tx, |text| println!("{}", text))
                .await
        })
    };
    let pump = tokio::spawn(pump_lines(
        client.clone(),
        BufReader::new(tokio::io::stdin()),
    ));

    let outcome = loop {
        tokio::select! {
            signal = errors_rx.recv() => match signal {
                Some(Ok(())) | None => {
                    info!("Telegram leg finished");
                    break Ok(());
                }
                Some(Err(e)) => {
                    error!(error = %e, "Telegram leg failed");
                    break Err(anyhow::Error::new(e).context("Telegram bridge leg failed"));
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(state = ?client.state(), "Interrupted, shutting down");
                if client.state() != ClientState::Streaming {
                    leg.abort();
                    break Ok(());
                }
                client.close();
            }
        }
    };

    let pump_result = reap_pump(pump).await;
    let leg_result = join_leg(leg).await;
    outcome.and(leg_result).and(pump_result)
}

/// Stops the stdin pump. If it already finished, its result (including a read error) is returned.
async fn reap_pump(pump: JoinHandle<Result<usize>>) -> Result<()> {
    if !pump.is_finished() {
        pump.abort();
        return Ok(());
    }
    match pump.await {
        Ok(Ok(sent)) => {
            debug!(sent, "stdin pump finished");
            Ok(())
        }
        Ok(Err(e)) => {
            error!(error = %e, "stdin pump failed");
            Err(e)
        }
        Err(e) => task_failure("stdin pump", e),
    }
}

/// Waits for the leg task. A panic is an error; cancellation after Ctrl-C is not.
async fn join_leg(leg: JoinHandle<()>) -> Result<()> {
    match leg.await {
        Ok(()) => Ok(()),
        Err(e) => task_failure("Telegram leg", e),
    }
}

fn task_failure(task: &str, e: JoinError) -> Result<()> {
    if e.is_cancelled() {
        debug!(task, "Task cancelled");
        return Ok(());
    }
    error!(task, error = %e, "Task panicked");
    Err(anyhow::anyhow!("{} task panicked: {}", task, e))
}

/// Sends each non-empty line from `reader` through the client. Returns how many lines were sent.
pub async fn pump_lines<R>(client: Arc<Client>, reader: R) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut sent = 0;
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        client.send(line).await;
        sent += 1;
    }
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::TelegramSettings;

    #[tokio::test]
    async fn test_pump_lines_skips_blank_lines() {
        let client = Arc::new(
            Client::new(TelegramSettings::new("token", "-100123"))
                .with_dispatch(tracing::Dispatch::none()),
        );
        let input: &[u8] = b"hello\n\n   \nworld  \n";

        let sent = pump_lines(client.clone(), input).await.unwrap();

        assert_eq!(sent, 2);
        assert_eq!(client.state(), ClientState::Uninitialized);
    }

    async fn wait_finished<T>(handle: &JoinHandle<T>) {
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_join_leg_reports_panic() {
        let leg = tokio::spawn(async { panic!("leg blew up") });

        let err = join_leg(leg).await.unwrap_err();

        assert!(err.to_string().contains("Telegram leg task panicked"));
    }

    #[tokio::test]
    async fn test_join_leg_tolerates_cancellation() {
        let leg = tokio::spawn(std::future::pending::<()>());
        leg.abort();

        assert!(join_leg(leg).await.is_ok());
    }

    #[tokio::test]
    async fn test_reap_pump_returns_stdin_error() {
        let pump = tokio::spawn(async { Err::<usize, _>(anyhow::anyhow!("Failed to read stdin")) });
        wait_finished(&pump).await;

        let err = reap_pump(pump).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to read stdin");
    }

    #[tokio::test]
    async fn test_reap_pump_aborts_running_pump() {
        let pump = tokio::spawn(std::future::pending::<Result<usize>>());

        assert!(reap_pump(pump).await.is_ok());
    }

    #[tokio::test]
    async fn test_reap_pump_after_eof_is_ok() {
        let pump = tokio::spawn(async { Ok::<usize, anyhow::Error>(3) });
        wait_finished(&pump).await;

        assert!(reap_pump(pump).await.is_ok());
    }
}
