//! Test logging setup.
//!
//! ```ignore
//! #[test]
//! fn test_example() {
//!     verdict::testing::init_test_logging(); // Safe to call multiple times
//!     let expect = Expectations::new();
//!     expect.truthy(false, "logged as a warning");
//! }
//! ```

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Settings;

static INIT: Once = Once::new();

/// Install a fmt subscriber writing through the test harness.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `VERDICT_LOG_LEVEL`. `VERDICT_LOG_JSON` switches to one JSON object per
/// event. Only the first call in a process has any effect, and a subscriber
/// installed elsewhere is left in place.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let settings = Settings::from_env();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

        let builder = fmt().with_test_writer().with_env_filter(filter);
        let _ = if settings.log_json {
            builder.json().try_init()
        } else {
            builder.with_target(false).try_init()
        };
    });
}
