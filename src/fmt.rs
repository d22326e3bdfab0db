//! Logging shims. With the `defmt` feature these forward to `defmt`; otherwise
//! (and always under test, where no global logger is linked) they only borrow
//! their arguments so call sites compile the same either way.

#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(not(all(feature = "defmt", not(test))))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(not(all(feature = "defmt", not(test))))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::info!($s $(, $x)*);
        #[cfg(not(all(feature = "defmt", not(test))))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(all(feature = "defmt", not(test)))]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(not(all(feature = "defmt", not(test))))]
        let _ = ($( & $x ),*);
    }};
}
