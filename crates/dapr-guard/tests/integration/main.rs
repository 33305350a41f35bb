//! End-to-end scenarios, run against the built `dapr-guard` binary via
//! `test_support::{Fixture, DaprGuard}`.

mod boundaries;
mod scenarios;
