#![forbid(unsafe_code)]

//! Glue for running lane-kernel tests across build variants.
//!
//! A logical test is written once and registered under the variant the
//! build was compiled as (see [`Variant::current`]). [`HarnessConfig`]
//! reads the failure policy and seeds from the environment, and
//! [`generate_fixture`] produces the golden text the tests compare against.

pub mod config;
pub mod fixture;
pub mod registry;
pub mod variant;

pub use config::{DEBUG_ENV, HarnessConfig, NONFATAL_ENV, VARIANT_ENV};
pub use fixture::{FixtureRecord, FixtureShape, generate_fixture};
pub use registry::{RegistryError, TestEntry, TestFn, TestRegistry};
pub use variant::{AccelPath, Binding, Variant, suite_symbols};

/// Runs every entry against a fresh checker from `config` and returns the
/// failure count per runner path.
///
/// Mismatches go to the config's check log when it names one.
pub fn run_registry(registry: &TestRegistry, config: &HarnessConfig) -> Vec<(String, usize)> {
    config.install_check_log();
    registry
        .entries()
        .iter()
        .map(|entry| {
            let mut checker = config.checker();
            (entry.func)(&mut checker);
            (entry.runner_path(), checker.failure_count())
        })
        .collect()
}
