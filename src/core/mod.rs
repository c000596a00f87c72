//! Core library components.
//!
//! This module contains the reusable business logic: key validation,
//! encryption, usage accounting, the flat store, and configuration.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod env;
pub mod manager;
pub mod names;
pub mod policy;
pub mod usage;
pub mod validator;
