//! Error macros for graphtrace

/// Macro for rejecting a malformed graph payload
#[macro_export]
macro_rules! bail_malformed {
    ($($arg:tt)*) => {
        return Err($crate::error::GraphError::malformed(format!($($arg)*)))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::GraphError::UsageError($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::GraphError::UsageError(format!($fmt, $($arg)*)))
    };
}
