//! Shared test harness modules for the rideshare CLI.

use super::*;

mod helpers;
mod resolve_steps;
