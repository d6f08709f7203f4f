//! Context handed to the recovery callback.

/// Outcome reported by a recovery callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The callback mitigated the failure; this attempt is not counted.
    Recovered,
    /// Nothing was fixed; the attempt counts against the retry limit.
    Unrecovered,
}

impl Recovery {
    pub fn is_recovered(self) -> bool {
        matches!(self, Recovery::Recovered)
    }
}

impl From<bool> for Recovery {
    fn from(recovered: bool) -> Self {
        if recovered {
            Recovery::Recovered
        } else {
            Recovery::Unrecovered
        }
    }
}

/// A matching failure as seen by the recovery callback.
#[derive(Debug)]
pub struct Failure<'a, A: ?Sized, E> {
    /// Name the retrier was created with.
    pub operation: &'a str,
    /// Attempt counter after this failure was recorded (1 on the first failure).
    pub attempt: u32,
    /// The error returned by the operation.
    pub error: &'a E,
    /// The arguments the operation was called with.
    pub args: &'a A,
}
