use snafu::Snafu;

// Import the context selectors as `crate::error::IndexOutOfRangeSnafu`,
// not through the enum.

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VectorError {
    #[snafu(display(
        "IndexOutOfRange: index {} was out of bounds for Vector with length {}.",
        index,
        len
    ))]
    IndexOutOfRange { index: usize, len: usize },

    #[snafu(display("EmptyContainer: cannot remove an element from an empty Vector."))]
    EmptyContainer,

    #[snafu(display(
        "InvalidArgument: cannot resize to capacity {} because the Vector holds {} elements.",
        requested,
        len
    ))]
    InvalidArgument { requested: usize, len: usize },

    #[snafu(display(
        "OutOfMemory: the allocator could not provide {} bytes.",
        bytes
    ))]
    OutOfMemory { bytes: usize },

    #[snafu(display(
        "CapacityOverflow: a capacity of {} elements does not fit in the address space.",
        requested
    ))]
    CapacityOverflow { requested: usize },
}

pub type VectorResult<T, E = VectorError> = std::result::Result<T, E>;
