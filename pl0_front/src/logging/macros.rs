//! Logging macros taking `"key" => value` context pairs with Display values
//!
//! ```ignore
//! log_warning!(code = codes::lexical::UNRECOGNIZED_CHARACTER, "Skipped character",
//!     span = skipped.span,
//!     "character" => skipped.character
//! );
//! ```

/// Formats context pairs and hands `&[(&str, &str)]`-style pairs to `$sink`
#[doc(hidden)]
#[macro_export]
macro_rules! __with_log_context {
    ($sink:expr $(, $key:expr => $value:expr)*) => {{
        let owned: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),*];
        $sink(owned.iter().map(|(k, v)| (*k, v.as_str())).collect())
    }};
}

/// Log an error with a registered code
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__with_log_context!(
            |context| $crate::logging::log_error_with_context($code, $message, Some($span), context)
            $(, $key => $value)*
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__with_log_context!(
            |context| $crate::logging::log_error_with_context($code, $message, None, context)
            $(, $key => $value)*
        )
    };
}

/// Log a warning, optionally with a registered code and span
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__with_log_context!(
            |context| $crate::logging::log_warning_with_context(
                Some($code), $message, Some($span), context
            )
            $(, $key => $value)*
        )
    };

    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__with_log_context!(
            |context| $crate::logging::log_warning_with_context(Some($code), $message, None, context)
            $(, $key => $value)*
        )
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__with_log_context!(
            |context| $crate::logging::log_warning_with_context(None, $message, None, context)
            $(, $key => $value)*
        )
    };
}

/// Log a stage completion with a success code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__with_log_context!(
            |context| $crate::logging::log_success_with_context($code, $message, context)
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__with_log_context!(
            |context| $crate::logging::log_info_with_context($message, context)
            $(, $key => $value)*
        )
    };
}

/// Context is only formatted when the debug level is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::__with_log_context!(
                |context| $crate::logging::log_debug_with_context($message, context)
                $(, $key => $value)*
            )
        }
    };
}
