//! Integration tests for the agentspace-registrar CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior. None of
//! them reach the network: every case fails or finishes before a request.

mod config_command;
