//! Format output dispatch helpers
//!
//! Provides macros to eliminate repetitive format match blocks.

/// Macro for format dispatch that automatically wraps result handling.
/// Use when the json branch returns Result and the human branch returns ().
///
/// # Examples
///
/// ```rust,ignore
/// output_by_format_result!(ctx.format,
///     json => ctx.print_json(&response),
///     human => { render::result(&result); }
/// )?;
/// ```
#[macro_export]
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}
