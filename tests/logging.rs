// Installs the global subscriber and edits RUST_LOG, so it is the only test
// in this binary.

use cutkit::{init_json_logging, init_logging, log_filter};
use tracing::level_filters::LevelFilter;
use tracing::Level;

#[test]
fn test_logging_follows_rust_log_and_installs_once() {
    std::env::remove_var("RUST_LOG");
    assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::INFO));

    std::env::set_var("RUST_LOG", "trace");
    assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::TRACE));

    std::env::set_var("RUST_LOG", "debug");
    assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::DEBUG));

    init_logging().unwrap();
    assert!(tracing::enabled!(Level::DEBUG));
    assert!(!tracing::enabled!(Level::TRACE));

    let err = init_logging().unwrap_err();
    assert!(err
        .to_string()
        .contains("Failed to install the logging subscriber"));
    assert!(init_json_logging().is_err());
}
