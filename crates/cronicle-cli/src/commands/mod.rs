//! Command implementations.

pub mod rotate;

pub use self::rotate::execute_rotate;
