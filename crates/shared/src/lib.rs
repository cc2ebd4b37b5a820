pub mod domain;
pub mod protocol;

pub use domain::{Activity, Roster};
