//! Test suites for the graphd daemon.

mod bootstrap_behaviour;
mod support;
