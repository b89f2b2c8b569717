pub mod tip;
pub mod user;
pub mod write_result;

pub use tip::*;
pub use user::*;
pub use write_result::*;
