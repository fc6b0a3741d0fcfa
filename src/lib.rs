pub mod common;
pub mod config;
pub mod din;
pub mod engine;
pub mod error;
pub mod evse_controller;
pub mod failed_responses;
pub mod iso2;
pub mod iso20;
pub mod response_code;
pub mod security;
pub mod session;
pub mod session_handler;
pub mod timeouts;

#[macro_use]
extern crate lazy_static;
