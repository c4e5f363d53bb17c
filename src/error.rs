/// Errors shared by the mode engine and the attack engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Missing, empty or out-of-range input
    InvalidArgument,
    /// Buffer length breaks the blocksize contract
    LengthMismatch,
    /// The block cipher primitive rejected its input
    Primitive,
    /// Malformed PKCS#7 padding
    Padding,
    /// I/O or protocol failure surfaced by a caller-supplied oracle
    Oracle,
    /// Candidate space exhausted without a consistent answer
    ///
    /// Signals a violated attack assumption, never a silent wrong guess
    AttackAborted,
    /// The caller's cancellation hook asked the attack to stop
    Cancelled,
}

pub type Result<T> = core::result::Result<T, Error>;
