pub fn init_test_logging() {
    verdict::testing::init_test_logging();
}

#[macro_export]
macro_rules! test_log {
    ($($arg:tt)*) => {
        tracing::info!(target: "test", $($arg)*);
    };
}
