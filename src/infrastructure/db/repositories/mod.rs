pub mod factory;
pub mod license_key_repository;

pub use factory::Repositories;
