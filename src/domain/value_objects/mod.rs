pub mod key_name;
pub mod timestamps;
