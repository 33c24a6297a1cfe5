//! Wire types shared between the shop client and its two backing services.

pub mod domain;
pub mod protocol;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
