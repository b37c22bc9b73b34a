/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module contains some common types and traits shared by the other modules.

use sealed::sealed;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use crate::config::Config;

/// The handle trait is implemented on the handle types for tokens and spans. They refer to an item in a
/// [`crate::Document`] by index. Types implementing this are lightweight and do not borrow anything, they
/// can be passed and copied freely.
/// This is a sealed trait, not implementable outside this crate.
#[sealed(pub(crate))] //<-- this ensures nobody outside this crate can implement the trait
pub trait Handle:
    Clone + Copy + core::fmt::Debug + PartialEq + Eq + PartialOrd + Ord + Hash
{
    /// Create a new handle for an internal index. You shouldn't need to use this as handles will always be generated for you.
    fn new(intid: usize) -> Self;
    /// Returns the internal index for this handle
    fn as_usize(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Document,
    Token,
    Span,
    Config,
}

impl Type {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Token => "Token",
            Self::Span => "Span",
            Self::Config => "Config",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provides runtime type information for the main structures, used in log and error messages
#[sealed(pub(crate))]
pub trait TypeInfo {
    fn typeinfo() -> Type;
}

/// Emits a debug log event, but only when debug mode is enabled in the configuration.
/// The message is only constructed when it is actually emitted.
pub(crate) fn debug<F>(config: &Config, message_func: F)
where
    F: FnOnce() -> String,
{
    if config.debug() {
        tracing::debug!(target: "annograph", "{}", message_func());
    }
}
