// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Logging macros.
//!
//! - Target (`stm32f7` feature): forwards to `defmt` over RTT.
//! - Host tests: `println!` with a level prefix.
//! - Host non-test: arguments are type-checked and discarded.
//!
//! Format strings must stay within the subset both `defmt` and `core::fmt` accept (plain `{}`
//! placeholders), and every argument must implement both `defmt::Format` and `Display`.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "stm32f7")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "stm32f7"), test))]
        ::std::println!("[INFO] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(feature = "stm32f7"), not(test)))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "stm32f7")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "stm32f7"), test))]
        ::std::println!("[WARN] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(feature = "stm32f7"), not(test)))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "stm32f7")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "stm32f7"), test))]
        ::std::println!("[DEBUG] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(feature = "stm32f7"), not(test)))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}
