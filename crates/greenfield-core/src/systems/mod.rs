//! Systems: the update operations that mutate the state tree.
//!
//! Player commands validate everything before the first mutation, so a
//! command that returns an error leaves the state untouched. Tick systems
//! are called by the scheduler in a fixed order.

mod audit;
mod finance;
mod global_events;
mod market;
mod progress;
mod projects;
mod staff;
mod tasks;

pub use audit::*;
pub use finance::*;
pub use global_events::*;
pub use market::*;
pub use progress::*;
pub use projects::*;
pub use staff::*;
pub use tasks::*;
