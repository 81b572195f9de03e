// Logging facade for racer-lib.
//
// The firmware logs over defmt/RTT, the console build through the `log` crate.
// Pick one backend with the `defmt-log` or `std-log` feature; with neither the
// macros below swallow their arguments. defmt wins if both are enabled.

#[cfg(feature = "defmt-log")]
pub use defmt::{debug, error, info, trace};

#[cfg(all(feature = "std-log", not(feature = "defmt-log")))]
pub use log::{debug, error, info, trace};

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
#[macro_export]
macro_rules! trace {
    ($($args:tt)*) => {};
}

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
#[macro_export]
macro_rules! debug {
    ($($args:tt)*) => {};
}

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
#[macro_export]
macro_rules! info {
    ($($args:tt)*) => {};
}

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
#[macro_export]
macro_rules! error {
    ($($args:tt)*) => {};
}

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
pub use {debug, error, info, trace};
