//! Domain models for the air quality dashboard

mod air_quality;
mod location;
mod notification;
mod timestamp;
mod user;

pub use air_quality::*;
pub use location::*;
pub use notification::*;
pub use user::*;
