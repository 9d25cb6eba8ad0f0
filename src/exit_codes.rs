//! Exit code constants for the noaqh-dev CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing files, bad config)
//! - 2: Lint failure (review found errors)
//! - 3: Git operation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing files, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Lint failure: the review pipeline found lint errors.
pub const LINT_FAILURE: i32 = 2;

/// Git operation failure: fetch, ref lookup, or rev-list errors.
pub const GIT_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, LINT_FAILURE, GIT_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(LINT_FAILURE, 2);
        assert_eq!(GIT_FAILURE, 3);
    }
}
