//! Console error taxonomy.

use core::fmt;

/// Errors a command handler can report to the console.
///
/// None of these terminate the session; each renders as one line of console
/// text and the polling loop resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsoleError {
    /// The CPU identification instruction is not available.
    UnsupportedFeature,
    /// Division with a zero divisor was requested.
    DivisionByZero,
    /// Input that matched no known command.
    UnknownCommand,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::UnsupportedFeature => write!(f, "CPUID not supported!"),
            ConsoleError::DivisionByZero => write!(f, "Error: Division by zero!"),
            ConsoleError::UnknownCommand => write!(f, "Unknown command"),
        }
    }
}
