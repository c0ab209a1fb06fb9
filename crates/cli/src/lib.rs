// Library half of the `vmca` binary: the reconciliation handler and the exit
// code registry, shared with integration tests.

pub mod exit_codes;
pub mod service;
