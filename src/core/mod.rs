pub mod board_interface;
pub mod error;
pub mod types;
pub mod zobrist;

pub use self::board_interface::*;
pub use self::error::*;
pub use self::types::*;
pub use self::zobrist::*;
