//! Configuration access port trait.
//!
//! Values come back raw; typed parsing and range checks live in
//! `domain::config_validation` so every source reports errors the same way.

pub trait ConfigPort {
    /// Raw value of `[section] key`, or `None` when absent.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
