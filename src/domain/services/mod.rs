pub mod clock;
pub mod expiry;
pub mod key_generator;
