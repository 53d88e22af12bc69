//! Domain types for activities and registrations.

pub mod activity;
pub mod email;

pub use activity::{Activity, NewActivity};
pub use email::{Email, EmailParseError};
