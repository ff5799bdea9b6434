pub mod slot;
pub mod validate;
