/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module contains the [`Document`], the annotation graph that is built for every input document.

use sealed::sealed;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::datavalue::MetaValue;
use crate::error::AnnoError;
use crate::json::ToJson;
use crate::span::{Span, SpanHandle};
use crate::token::{Token, TokenHandle};
use crate::types::*;

/// The annotation graph for a single input document: the primary text, the tokens anchored to it,
/// the spans over those tokens and the document metadata.
///
/// A `Document` is fully populated by a single call to [`crate::build()`] (or one of the import functions)
/// and is not changed by this library afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,

    pub(crate) text: String,

    /// Length of the text in unicode codepoints
    #[serde(skip)]
    pub(crate) textlen: usize,

    pub(crate) tokens: Vec<Token>,

    pub(crate) spans: Vec<Span>,

    pub(crate) metadata: BTreeMap<String, MetaValue>,
}

#[sealed]
impl TypeInfo for Document {
    fn typeinfo() -> Type {
        Type::Document
    }
}

impl ToJson for Document {}

impl Document {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: None,
            textlen: text.chars().count(),
            text,
            tokens: Vec::new(),
            spans: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub(crate) fn push_token(&mut self, token: Token) -> TokenHandle {
        self.tokens.push(token);
        TokenHandle::new(self.tokens.len() - 1)
    }

    pub(crate) fn push_span(&mut self, span: Span) -> SpanHandle {
        self.spans.push(span);
        SpanHandle::new(self.spans.len() - 1)
    }

    pub(crate) fn set_metadata(&mut self, key: impl Into<String>, value: MetaValue) {
        self.metadata.insert(key.into(), value);
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the primary text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the length of the text in unicode points
    /// For bytes, use `Self::text().len()` instead.
    pub fn textlen(&self) -> usize {
        self.textlen
    }

    /// Returns all tokens, in input order. The index of a token in this slice corresponds to its [`TokenHandle`].
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterates over all tokens along with their handles
    pub fn iter_tokens(&self) -> impl Iterator<Item = (TokenHandle, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (TokenHandle::new(i), token))
    }

    pub fn token(&self, handle: TokenHandle) -> Option<&Token> {
        self.tokens.get(handle.as_usize())
    }

    /// Returns all spans, in the order they were created
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn span(&self, handle: SpanHandle) -> Option<&Span> {
        self.spans.get(handle.as_usize())
    }

    /// Iterates over all spans in the specified layer
    pub fn spans_by_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = (SpanHandle, &'a Span)> + 'a {
        self.spans
            .iter()
            .enumerate()
            .filter(move |(_, span)| span.layer() == layer)
            .map(|(i, span)| (SpanHandle::new(i), span))
    }

    /// Returns the names of all layers that have at least one span, in order of first occurrence
    pub fn layers(&self) -> Vec<&str> {
        let mut layers: Vec<&str> = Vec::new();
        for span in self.spans.iter() {
            if !layers.contains(&span.layer()) {
                layers.push(span.layer());
            }
        }
        layers
    }

    /// Iterates over all spans that cover the specified token
    pub fn spans_by_token(&self, token: TokenHandle) -> impl Iterator<Item = (SpanHandle, &Span)> {
        self.spans
            .iter()
            .enumerate()
            .filter(move |(_, span)| span.covers(token))
            .map(|(i, span)| (SpanHandle::new(i), span))
    }

    /// Resolves the tokens of a span
    pub fn span_tokens(&self, span: &Span) -> Result<SmallVec<[&Token; 4]>, AnnoError> {
        span.tokens()
            .into_iter()
            .map(|handle| {
                self.token(handle)
                    .ok_or(AnnoError::HandleError("Document::span_tokens"))
            })
            .collect()
    }

    /// Finds the token that covers the specified character position.
    /// This relies on tokens being in ascending order, which is guaranteed when offset validation is enabled.
    pub fn token_at(&self, charpos: usize) -> Option<TokenHandle> {
        let index = self.tokens.partition_point(|token| token.end <= charpos);
        match self.tokens.get(index) {
            Some(token) if token.contains(charpos) => Some(TokenHandle::new(index)),
            _ => None,
        }
    }

    /// Returns the document metadata
    pub fn metadata(&self) -> &BTreeMap<String, MetaValue> {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }

    /// Converts a unicode character position to a UTF-8 byte position
    pub fn utf8byte(&self, charpos: usize) -> Result<usize, AnnoError> {
        if charpos == self.textlen {
            return Ok(self.text.len());
        }
        self.text
            .char_indices()
            .nth(charpos)
            .map(|(bytepos, _)| bytepos)
            .ok_or(AnnoError::CursorOutOfBounds(charpos, "Document::utf8byte"))
    }

    /// Returns a slice of the primary text, offsets are in unicode codepoints
    pub fn text_by_offset(&self, begin: usize, end: usize) -> Result<&str, AnnoError> {
        if begin > end {
            return Err(AnnoError::CursorOutOfBounds(
                begin,
                "Document::text_by_offset: begin beyond end",
            ));
        }
        let beginbyte = self.utf8byte(begin)?;
        let endbyte = self.utf8byte(end)?;
        Ok(&self.text[beginbyte..endbyte])
    }

    /// Returns the part of the primary text the token covers
    pub fn token_text(&self, handle: TokenHandle) -> Result<&str, AnnoError> {
        let token = self
            .token(handle)
            .ok_or(AnnoError::HandleError("Document::token_text"))?;
        self.text_by_offset(token.begin(), token.end())
    }

    /// Returns the part of the primary text from the beginning of the first token of the span to the end of its last token
    pub fn span_text(&self, handle: SpanHandle) -> Result<&str, AnnoError> {
        let span = self
            .span(handle)
            .ok_or(AnnoError::HandleError("Document::span_text"))?;
        let first = self
            .token(span.begin())
            .ok_or(AnnoError::HandleError("Document::span_text"))?;
        let last = self
            .token(span.end())
            .ok_or(AnnoError::HandleError("Document::span_text"))?;
        self.text_by_offset(first.begin(), last.end())
    }
}
