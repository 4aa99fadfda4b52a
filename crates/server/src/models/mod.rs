//! Domain models for the server.

pub mod game;
pub mod order;
pub mod user;

pub use game::{Game, NewGame};
pub use order::{CartLine, NewOrder, OrderReportRow};
pub use user::User;
