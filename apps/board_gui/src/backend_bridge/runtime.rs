//! Backend worker: a dedicated thread owning a tokio runtime and the HTTP
//! client, consuming UI commands and reporting back as UI events.

use std::thread;

use board_client::ActivityClient;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{RequestFailure, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::RosterLoadFailed {
                    reason: format!("backend worker startup failure: {err}"),
                });
                return;
            }
        };

        runtime.block_on(async move {
            let client = match ActivityClient::new(&server_url) {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!(%server_url, "rejected server url: {err}");
                    let _ = ui_tx.try_send(UiEvent::RosterLoadFailed {
                        reason: err.to_string(),
                    });
                    return;
                }
            };

            // Commands are handled one at a time; overlapping submits from
            // the UI serialize here instead of racing.
            while let Ok(cmd) = cmd_rx.recv() {
                let event = run_command(&client, cmd).await;
                if !forward_event(&ui_tx, event) {
                    break;
                }
            }
        });
    });
}

/// Hand an event to the UI thread. A full channel drops the event (the UI
/// reloads the roster on its own cadence and the next command produces a
/// fresh one); only a disconnected receiver stops the worker.
fn forward_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!("ui event channel full; dropping event");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}

async fn run_command(client: &ActivityClient, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadRoster => match client.fetch_activities().await {
            Ok(roster) => UiEvent::RosterLoaded(roster),
            Err(err) => {
                tracing::error!(error = %err, "failed to load activities");
                UiEvent::RosterLoadFailed {
                    reason: err.to_string(),
                }
            }
        },
        BackendCommand::Signup { activity, email } => {
            match client.signup(&activity, &email).await {
                Ok(message) => UiEvent::SignupSucceeded { message },
                Err(err) => {
                    tracing::error!(error = %err, %activity, "signup request failed");
                    UiEvent::SignupFailed(RequestFailure::from_client_error(&err))
                }
            }
        }
        BackendCommand::Unregister { activity, email } => {
            match client.unregister(&activity, &email).await {
                Ok(message) => UiEvent::UnregisterSucceeded { message },
                Err(err) => {
                    tracing::error!(error = %err, %activity, "unregister request failed");
                    UiEvent::UnregisterFailed(RequestFailure::from_client_error(&err))
                }
            }
        }
    }
}
