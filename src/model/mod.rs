mod common;
mod event;
mod match_detail;
mod team;

pub use common::*;
pub use event::*;
pub use match_detail::*;
pub use team::*;
