//! Line buffer holding the secret text of a password field.
//!
//! Cursor positions are character indices, never byte offsets, so editing
//! multi-byte input (accented letters, CJK, emoji) never splits a code point.
//!
//! The text lives in a [`Zeroizing`] string. Growth goes through
//! [`SecretBuffer::reserve`], which copies into a larger allocation and wipes
//! the old one, so no reallocation leaves a stale copy on the heap.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const MIN_CAPACITY: usize = 32;

/// Editable single-line text with a cursor.
///
/// The content is sensitive. `Debug` never prints it; callers that need the
/// text go through [`SecretBuffer::text`]. The memory is wiped on drop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretBuffer {
    content: Zeroizing<String>,
    /// Cursor position as a character index (0..=char_len)
    cursor: usize,
}

impl SecretBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a character at the cursor. Always changes the content.
    pub fn insert_char(&mut self, c: char) -> bool {
        self.reserve(c.len_utf8());
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Insert a string at the cursor. Returns whether the content changed.
    pub fn insert_str(&mut self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        self.reserve(s.len());
        let at = self.byte_index(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
        true
    }

    /// Delete the character under the cursor (Delete key).
    pub fn delete_char(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        true
    }

    /// Delete the character before the cursor (Backspace key).
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        true
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the whole content and put the cursor at the end.
    ///
    /// Returns whether the content actually changed.
    pub fn replace(&mut self, text: &str) -> bool {
        let changed = self.content.as_str() != text;
        self.content.zeroize();
        self.reserve(text.len());
        self.content.push_str(text);
        self.cursor = self.char_len();
        changed
    }

    /// Clear all content and reset the cursor.
    pub fn clear(&mut self) -> bool {
        self.replace("")
    }

    /// The current secret text.
    pub fn text(&self) -> &str {
        self.content.as_str()
    }

    /// Cursor position (character index).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the buffer.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Make room for `additional` bytes without an in-place reallocation.
    fn reserve(&mut self, additional: usize) {
        let needed = self.content.len() + additional;
        if needed <= self.content.capacity() {
            return;
        }
        let capacity = needed
            .max(self.content.capacity() * 2)
            .max(MIN_CAPACITY);
        let mut grown = Zeroizing::new(String::with_capacity(capacity));
        grown.push_str(&self.content);
        // Dropping the old Zeroizing wipes the smaller allocation
        self.content = grown;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

impl ZeroizeOnDrop for SecretBuffer {}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("len", &self.char_len())
            .field("cursor", &self.cursor)
            .finish()
    }
}
