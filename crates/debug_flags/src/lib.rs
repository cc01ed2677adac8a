//! Flags for debugging the vector crates.
//!
//! Lists environment variable flags that can be enabled for expensive checks and verbose
//! logging in debug builds.
//!
//! For example, to run the test suite with every mutation re-validated:
//!
//! ```bash
//! VECTOR_CHECK_INVARIANTS=1 cargo test
//! ```
//!
//! Shift logging goes through `vector_tracing`, so it also needs a `VECTOR_LOG` filter:
//!
//! ```bash
//! VECTOR_TRACE_SHIFTS=1 VECTOR_LOG=debug cargo bench
//! ```
//!
//! These flags are also set in .cargo/config.toml found at the repository root. You can modify
//! them there to avoid maintaining a separate script.

#[macro_export]
macro_rules! dbg_set {
    ($flag:path) => {{
        #[cfg(not(debug_assertions))]
        {
            false
        }
        #[cfg(debug_assertions)]
        {
            let flag = std::env::var($flag);
            flag.is_ok() && flag.as_deref() != Ok("0")
        }
    }};
}

#[macro_export]
macro_rules! dbg_do {
    ($flag:path, $expr:expr) => {
        #[cfg(debug_assertions)]
        {
            if $crate::dbg_set!($flag) {
                $expr
            }
        }
    };
}

macro_rules! flags {
    ($($(#[doc = $doc:expr])+ $flag:ident)*) => {$(
        $(#[doc = $doc])+
        pub static $flag: &str = stringify!($flag);
    )*};
}

flags! {
    /// Re-checks the length/capacity/storage invariants after every mutating
    /// operation, panicking on the first violation.
    VECTOR_CHECK_INVARIANTS

    /// Logs every element shift performed by ordered insertion and removal,
    /// with the index and the number of elements moved.
    VECTOR_TRACE_SHIFTS
}
