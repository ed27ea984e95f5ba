pub mod ack;
pub mod class;
pub mod user;

pub use ack::*;
pub use class::*;
pub use user::*;
