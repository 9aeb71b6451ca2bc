#[cfg(test)]
pub mod common;

pub mod v2_authentication;
