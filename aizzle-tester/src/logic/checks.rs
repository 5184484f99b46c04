use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const CHECK_SAMPLE_SHAPES: &str = "sample-shapes";
pub const CHECK_TIER_DISTRIBUTION: &str = "tier-distribution";
pub const CHECK_SESSION_BOOKKEEPING: &str = "session-bookkeeping";

/// Every check the tester knows, with a one-line description.
pub fn list_checks() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            CHECK_SAMPLE_SHAPES,
            "Generated puzzles are well formed and solved by their own solution",
        ),
        (
            CHECK_TIER_DISTRIBUTION,
            "Observed tier and word sub-kind shares match the selection policy",
        ),
        (
            CHECK_SESSION_BOOKKEEPING,
            "Simulated play keeps score, streak and hint costs consistent",
        ),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_name: String,
    pub passed: bool,
    pub samples_run: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// Accumulates failures for one check while it runs.
pub struct CheckRecorder {
    name: &'static str,
    samples: usize,
    failures: Vec<String>,
    started: Instant,
}

impl CheckRecorder {
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            samples: 0,
            failures: Vec::new(),
            started: Instant::now(),
        }
    }

    pub const fn sample(&mut self) {
        self.samples += 1;
    }

    pub fn fail(&mut self, message: String) {
        log::debug!("{} failure: {message}", self.name);
        self.failures.push(message);
    }

    pub fn finish(self) -> CheckResult {
        CheckResult {
            check_name: self.name.to_string(),
            passed: self.failures.is_empty(),
            samples_run: self.samples,
            failures: self.failures,
            duration: self.started.elapsed(),
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}
