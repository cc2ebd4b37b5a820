//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::StatusBanner;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    banner: &mut Option<StatusBanner>,
) {
    let cmd_name = match &cmd {
        BackendCommand::LoadRoster => "load_roster",
        BackendCommand::Signup { .. } => "signup",
        BackendCommand::Unregister { .. } => "unregister",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *banner = Some(StatusBanner::error(
                "Too many pending requests; please retry",
            ));
        }
        Err(TrySendError::Disconnected(_)) => {
            *banner = Some(StatusBanner::error(
                "Backend worker disconnected; restart the app",
            ));
        }
    }
}
