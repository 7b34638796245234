//! Shared integration-test helpers.

#![allow(dead_code)]

pub mod file_server;
pub mod harness;
pub mod http_client;
