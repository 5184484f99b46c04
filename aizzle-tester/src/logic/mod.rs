pub mod checks;
pub mod distribution;
pub mod reports;
pub mod sampler;
pub mod seeds;
pub mod session;

pub use checks::{CheckResult, list_checks};
pub use distribution::{DEFAULT_TOLERANCE, check_distribution, run_distribution};
pub use reports::TestReport;
pub use sampler::{Sampler, check_samples};
pub use seeds::{SeedInfo, resolve_seed_inputs};
pub use session::simulate_sessions;
