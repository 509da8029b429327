//! Test modules

pub mod unit_tests;
