//! Runs a workload with every debug flag and full logging turned on.
//! Kept in its own test binary because it sets process-wide environment variables.

extern crate vector;
extern crate vector_debug_flags;
extern crate vector_tracing;

#[cfg(test)]
mod test_debug_flags {
    use vector::{compare, Vector};
    use vector_debug_flags::{dbg_set, VECTOR_CHECK_INVARIANTS, VECTOR_TRACE_SHIFTS};

    #[test]
    fn workload_with_checks_and_logging() {
        std::env::set_var(VECTOR_CHECK_INVARIANTS, "1");
        std::env::set_var(VECTOR_TRACE_SHIFTS, "1");
        std::env::set_var("VECTOR_LOG", "debug");

        let _guards = vector_tracing::setup_tracing!();

        assert_eq!(dbg_set!(VECTOR_CHECK_INVARIANTS), cfg!(debug_assertions));

        let mut vector = Vector::new();

        for value in (0..64).rev() {
            vector.insert(0, value).unwrap();
        }

        vector.remove(10).unwrap();
        vector.swap_remove(0).unwrap();
        vector.sort(compare::natural);
        vector.shrink_to_fit().unwrap();

        assert_eq!(vector.len(), 62);
        assert_eq!(vector.capacity(), 62);

        vector.release();

        assert_eq!(vector.capacity(), 0);
    }

    static DISABLED_FLAG: &str = "VECTOR_TEST_DISABLED_FLAG";

    #[test]
    fn zero_disables_a_flag() {
        std::env::set_var(DISABLED_FLAG, "0");

        assert!(!dbg_set!(DISABLED_FLAG));
    }
}
