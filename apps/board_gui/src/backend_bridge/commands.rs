//! Backend commands queued from UI to the backend worker.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadRoster,
    Signup { activity: String, email: String },
    Unregister { activity: String, email: String },
}
