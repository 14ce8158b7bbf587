//! Coloured console output. Colour is dropped when the stream is not a terminal.

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    (stderr, $label:expr, $style:expr, $($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            eprintln!(
                "{}: {}",
                $label.if_supports_color(owo_colors::Stream::Stderr, |s| s.style($style)),
                format_args!($($arg)+)
            );
        }
    };
    (stdout, $label:expr, $style:expr, $($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            println!(
                "{}: {}",
                $label.if_supports_color(owo_colors::Stream::Stdout, |s| s.style($style)),
                format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::__emit!(stderr, "error", owo_colors::Style::new().bold().red(), $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__emit!(stdout, "warning", owo_colors::Style::new().bold().yellow(), $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__emit!(stdout, "info", owo_colors::Style::new().bold().green(), $($arg)+)
    };
}

/// Printed only when `KICKOFF_TRACE` is set.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        if std::env::var_os("KICKOFF_TRACE").is_some() {
            $crate::__emit!(stdout, "trace", owo_colors::Style::new().bold(), $($arg)+)
        }
    };
}
