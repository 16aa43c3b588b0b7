//! tkt-cli library - interactive text menu over the ticketing core
//!
//! The menu is generic over its input and output so it can run against a
//! terminal or a scripted session.

pub mod cli;
pub mod error;
pub mod menu;

pub use cli::{Args, DatabaseTarget};
pub use error::{MenuError, MenuResult};
pub use menu::{Menu, MenuChoice};
