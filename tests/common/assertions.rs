//! Custom assertion macros
//!
//! Shorter failure output for the shapes that come up repeatedly in the
//! storage and HTTP tests.

/// Assert that a result is ok and return the value
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is an error matching a pattern
macro_rules! assert_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert that records are sorted newest first
macro_rules! assert_newest_first {
    ($records:expr) => {
        for pair in $records.windows(2) {
            assert!(
                pair[0].created_at >= pair[1].created_at,
                "Records out of order: {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    };
}
