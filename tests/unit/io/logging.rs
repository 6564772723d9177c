//! Tests for log filter selection

#[cfg(test)]
mod tests {
    use chassistile::io::logging::{filter_directive, init};

    // Tests default verbosity
    // Verified by defaulting to debug
    #[test]
    fn test_default_directive() {
        assert_eq!(
            filter_directive(false, 0),
            "chassistile=info,tower_http=warn,warn"
        );
    }

    // Tests verbosity steps and quiet precedence
    // Verified by letting verbose override quiet
    #[test]
    fn test_verbosity_levels() {
        assert!(filter_directive(false, 1).starts_with("chassistile=debug,tower_http=debug"));
        assert!(filter_directive(false, 3).starts_with("chassistile=trace"));
        assert!(filter_directive(true, 2).starts_with("chassistile=error,tower_http=warn"));
    }

    // Tests repeated initialization keeps the first subscriber
    // Verified by panicking on a second init
    #[test]
    fn test_init_is_idempotent() {
        init(true, 0);
        init(false, 2);
    }
}
