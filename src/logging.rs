//! Colored console output used everywhere instead of bare `println!`.
//!
//! `yay!` success, `say!` info, `hey!` warning, `nay!` error.

pub use better_term::Color;

#[doc(hidden)]
pub fn emit(color: Color, tag: &str, msg: std::fmt::Arguments<'_>) {
    println!("{}[{}] {}", color, tag, msg);
    better_term::flush_styles();
}

#[macro_export]
macro_rules! yay {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::Color::Green, "+", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! say {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::Color::White, "~", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! hey {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::Color::Yellow, "!", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! nay {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::Color::Red, "x", format_args!($($arg)*))
    };
}
