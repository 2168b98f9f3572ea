//! Environment-driven tuning for property-test suites.
//!
//! `GRAPHSWEEP_PBT_CASES` overrides the case count and
//! `GRAPHSWEEP_PBT_FORK` toggles forked execution. Invalid overrides are
//! logged and ignored.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "GRAPHSWEEP_PBT_CASES";
/// Environment variable toggling forked proptest execution.
pub const FORK_ENV_KEY: &str = "GRAPHSWEEP_PBT_FORK";

/// Case count and fork setting for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads the profile, falling back to the given defaults.
    ///
    /// # Examples
    /// ```
    /// use graphsweep_test_support::proptest_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub const fn cases(&self) -> u32 { self.cases }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub const fn fork(&self) -> bool { self.fork }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Result<T, String>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring invalid property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true/false/1/0/yes/no/on/off".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets or clears an environment variable, restoring it on drop.
    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let original = env::var(key).ok();
            match value {
                // SAFETY: tests serialise environment access with ENV_LOCK.
                Some(value) => unsafe { env::set_var(key, value) },
                // SAFETY: tests serialise environment access with ENV_LOCK.
                None => unsafe { env::remove_var(key) },
            }
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                // SAFETY: tests serialise environment access with ENV_LOCK.
                Some(value) => unsafe { env::set_var(self.key, value) },
                // SAFETY: tests serialise environment access with ENV_LOCK.
                None => unsafe { env::remove_var(self.key) },
            }
        }
    }

    #[rstest]
    #[case::defaults(None, None, 64, false)]
    #[case::cases_override(Some("250"), None, 250, false)]
    #[case::zero_cases_ignored(Some("0"), None, 64, false)]
    #[case::garbage_cases_ignored(Some("abc"), None, 64, false)]
    #[case::fork_on(None, Some("YES"), 64, true)]
    #[case::fork_garbage_ignored(None, Some("maybe"), 64, false)]
    fn load_applies_valid_overrides(
        #[case] cases: Option<&str>,
        #[case] fork: Option<&str>,
        #[case] expected_cases: u32,
        #[case] expected_fork: bool,
    ) {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _cases = EnvGuard::new(CASES_ENV_KEY, cases);
        let _fork = EnvGuard::new(FORK_ENV_KEY, fork);

        let profile = ProptestRunProfile::load(64, false);
        assert_eq!(profile.cases(), expected_cases);
        assert_eq!(profile.fork(), expected_fork);
    }
}
