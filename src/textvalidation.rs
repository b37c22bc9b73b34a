/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module implements text validation: a checksum over the primary text of a document allows
//! a consumer to verify that the text that token offsets refer to has not changed.
//!
//! This module is implemented as an extra feature and may be enabled/disabled at compile time.

use sha1::{Digest, Sha1};

use crate::document::Document;

impl Document {
    /// Returns (computes) the SHA-1 checksum of the primary text, as a lowercase hexadecimal string.
    /// Note that this is cryptographically insecure! (but fast)
    pub fn text_checksum(&self) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.text());
        base16ct::lower::encode_string(&hasher.finalize())
    }

    /// Tests if the primary text matches the checksum obtained earlier via [`Self::text_checksum()`]
    pub fn validate_text(&self, checksum: &str) -> bool {
        self.text_checksum().eq_ignore_ascii_case(checksum)
    }
}
