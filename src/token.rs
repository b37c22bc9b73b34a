/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

use sealed::sealed;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// A token is the smallest addressable unit of text in a [`crate::Document`]. It is anchored to
/// the primary text by its begin and end offsets (unicode codepoints, 0-indexed, end is non-inclusive)
/// and carries the normalized token text from the input.
///
/// Tokens are immutable once created and know nothing about the spans that cover them.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub(crate) begin: usize,
    pub(crate) end: usize,
    pub(crate) text: String,
}

/// Refers to a [`Token`] by its position in the document's token sequence
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenHandle(u32);

#[sealed]
impl Handle for TokenHandle {
    fn new(intid: usize) -> Self {
        Self(intid as u32)
    }
    fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

#[sealed]
impl TypeInfo for Token {
    fn typeinfo() -> Type {
        Type::Token
    }
}

impl Token {
    pub(crate) fn new(begin: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            text: text.into(),
        }
    }

    /// Begin offset (unicode codepoint) in the primary text
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// End offset (unicode codepoint, non-inclusive) in the primary text
    pub fn end(&self) -> usize {
        self.end
    }

    /// The normalized token text as given in the input. This need not equal the slice of the primary text
    /// the token covers, use [`crate::Document::token_text()`] for that.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the token in unicode codepoints
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Does this token cover the specified character position?
    pub fn contains(&self, charpos: usize) -> bool {
        charpos >= self.begin && charpos < self.end
    }
}
