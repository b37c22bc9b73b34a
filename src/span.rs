/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

use sealed::sealed;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::token::TokenHandle;
use crate::types::*;

/// A span is an annotation over a contiguous, **inclusive** range of tokens. It belongs to a layer
/// (the output label of the annotation group it came from) and carries a single value.
///
/// A span only refers to its tokens by handle, tokens are not aware of the spans covering them.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    pub(crate) layer: String,
    pub(crate) value: String,
    /// First token (inclusive)
    pub(crate) begin: TokenHandle,
    /// Last token (inclusive!)
    pub(crate) end: TokenHandle,
}

/// Refers to a [`Span`] by its position in the document
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanHandle(u32);

#[sealed]
impl Handle for SpanHandle {
    fn new(intid: usize) -> Self {
        Self(intid as u32)
    }
    fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

#[sealed]
impl TypeInfo for Span {
    fn typeinfo() -> Type {
        Type::Span
    }
}

impl Span {
    pub(crate) fn new(
        layer: impl Into<String>,
        value: impl Into<String>,
        begin: TokenHandle,
        end: TokenHandle,
    ) -> Self {
        debug_assert!(begin <= end);
        Self {
            layer: layer.into(),
            value: value.into(),
            begin,
            end,
        }
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Handle to the first token of the span
    pub fn begin(&self) -> TokenHandle {
        self.begin
    }

    /// Handle to the last token of the span (inclusive)
    pub fn end(&self) -> TokenHandle {
        self.end
    }

    /// Number of tokens covered, never zero
    pub fn len(&self) -> usize {
        self.end.as_usize() - self.begin.as_usize() + 1
    }

    /// Returns handles to all tokens covered by this span, in order
    pub fn tokens(&self) -> SmallVec<[TokenHandle; 4]> {
        (self.begin.as_usize()..=self.end.as_usize())
            .map(TokenHandle::new)
            .collect()
    }

    /// Does this span cover the specified token?
    pub fn covers(&self, token: TokenHandle) -> bool {
        token >= self.begin && token <= self.end
    }
}
