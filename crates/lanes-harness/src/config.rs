use crate::variant::Variant;
use lanes_check::{
    CHECK_LOG_PATH_ENV, Checker, FailurePolicy, FailureReporter, FatalAction, set_check_log_path,
};
use lanes_random::{RANDOM_SEED_ENV, RandomSource, parse_seed};
use std::path::PathBuf;

pub const NONFATAL_ENV: &str = "LANES_NONFATAL";
pub const DEBUG_ENV: &str = "LANES_DEBUG";
pub const VARIANT_ENV: &str = "LANES_VARIANT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub policy: FailurePolicy,
    pub fatal_action: FatalAction,
    pub variant: Variant,
    /// Fixed seed for fixture generation; `None` seeds from the clock.
    pub random_seed: Option<u64>,
    pub check_log_path: Option<PathBuf>,
}

impl HarnessConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: FailurePolicy::Fatal,
            fatal_action: FatalAction::Abort,
            variant: Variant::current(),
            random_seed: None,
            check_log_path: None,
        }
    }

    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, which maps an environment key to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::new();

        if let Some(raw) = lookup(NONFATAL_ENV) {
            if parse_flag(NONFATAL_ENV, &raw)? {
                config.policy = FailurePolicy::NonFatal;
            }
        }
        if let Some(raw) = lookup(DEBUG_ENV) {
            if parse_flag(DEBUG_ENV, &raw)? {
                config.fatal_action = FatalAction::Panic;
            }
        }
        if let Some(raw) = lookup(VARIANT_ENV) {
            config.variant = Variant::parse(&raw)
                .ok_or_else(|| format!("{VARIANT_ENV}: unknown variant {raw:?}"))?;
        }
        if let Some(raw) = lookup(RANDOM_SEED_ENV) {
            let seed =
                parse_seed(&raw).ok_or_else(|| format!("{RANDOM_SEED_ENV}: invalid seed {raw:?}"))?;
            config.random_seed = Some(seed);
        }
        if let Some(raw) = lookup(CHECK_LOG_PATH_ENV) {
            if !raw.trim().is_empty() {
                config.check_log_path = Some(PathBuf::from(raw));
            }
        }

        Ok(config)
    }

    #[must_use]
    pub fn reporter(&self) -> FailureReporter {
        FailureReporter::new(self.policy).with_fatal_action(self.fatal_action)
    }

    /// Checker whose log entries are labelled with the configured variant.
    #[must_use]
    pub fn checker(&self) -> Checker {
        Checker::new(self.reporter()).with_label(self.variant.tag())
    }

    #[must_use]
    pub fn random_source(&self) -> RandomSource {
        self.random_seed
            .map_or_else(RandomSource::new, RandomSource::seeded)
    }

    /// Points the check log at the configured path, if any.
    pub fn install_check_log(&self) {
        if let Some(path) = &self.check_log_path {
            set_check_log_path(Some(path.clone()));
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(format!("{key}: expected a boolean flag, got {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{DEBUG_ENV, HarnessConfig, NONFATAL_ENV, VARIANT_ENV};
    use crate::variant::{AccelPath, Binding, Variant};
    use lanes_check::{CHECK_LOG_PATH_ENV, FailurePolicy, FatalAction};
    use lanes_random::RANDOM_SEED_ENV;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_fatal_abort_defaults() {
        let config = HarnessConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, HarnessConfig::new());
        assert_eq!(config.policy, FailurePolicy::Fatal);
        assert_eq!(config.fatal_action, FatalAction::Abort);
        assert_eq!(config.variant, Variant::current());
    }

    #[test]
    fn environment_overrides_every_field() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (NONFATAL_ENV, "1"),
            (DEBUG_ENV, "yes"),
            (VARIANT_ENV, "emul/cpp"),
            (RANDOM_SEED_ENV, "0x2A"),
            (CHECK_LOG_PATH_ENV, "/tmp/lanes/check.jsonl"),
        ]))
        .expect("config");
        assert_eq!(config.policy, FailurePolicy::NonFatal);
        assert_eq!(config.fatal_action, FatalAction::Panic);
        assert_eq!(config.variant, Variant::new(AccelPath::Emulated, Binding::Cpp));
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(
            config.check_log_path,
            Some(PathBuf::from("/tmp/lanes/check.jsonl"))
        );
        assert_eq!(config.random_source().seed(), 42);
        assert_eq!(config.checker().policy(), FailurePolicy::NonFatal);
    }

    #[test]
    fn malformed_values_are_rejected_with_the_key() {
        let err = HarnessConfig::from_lookup(lookup(&[(NONFATAL_ENV, "sometimes")]))
            .expect_err("bad flag");
        assert!(err.contains(NONFATAL_ENV), "{err}");

        let err = HarnessConfig::from_lookup(lookup(&[(VARIANT_ENV, "gpu/c")]))
            .expect_err("bad variant");
        assert!(err.contains("gpu/c"), "{err}");

        let err = HarnessConfig::from_lookup(lookup(&[(RANDOM_SEED_ENV, "x")]))
            .expect_err("bad seed");
        assert!(err.contains(RANDOM_SEED_ENV), "{err}");
    }

    #[test]
    fn explicit_false_flags_keep_defaults() {
        let config =
            HarnessConfig::from_lookup(lookup(&[(NONFATAL_ENV, "0"), (DEBUG_ENV, "off")]))
                .expect("config");
        assert_eq!(config.policy, FailurePolicy::Fatal);
        assert_eq!(config.fatal_action, FatalAction::Abort);
    }
}
