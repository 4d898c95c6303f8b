// Xeque - Motor de busca negamax alpha-beta para xadrez

pub mod core;
pub mod search;

pub use crate::core::*;
