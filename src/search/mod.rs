pub mod alpha_beta;
pub mod evaluation;
pub mod ordering;
pub mod quiescence;
pub mod time_manager;
pub mod transposition;

pub use self::alpha_beta::*;
pub use self::evaluation::*;
pub use self::ordering::*;
pub use self::quiescence::*;
pub use self::time_manager::*;
pub use self::transposition::*;
