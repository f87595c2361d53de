//! # Formwatch Reactive
//!
//! Observable state cells and debounced background reactions for the
//! formwatch form validator. An [`Observable`] holds a value and
//! notifies subscribers of real changes; [`watch_debounced`] turns
//! those notifications into a reaction that fires once the value has
//! settled, under the timing rules of a [`DebouncePolicy`].

pub mod cell;
pub mod debounce;
pub mod policy;

pub use cell::Observable;
pub use debounce::{DebouncedWatch, watch_debounced};
pub use policy::{DEFAULT_DEBOUNCE, DEFAULT_MAX_WAIT, DebouncePolicy, PolicyError};
