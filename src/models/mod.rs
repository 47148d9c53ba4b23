pub mod event;
pub mod spot;

pub use event::Event;
pub use spot::{Spot, SpotStatus};
