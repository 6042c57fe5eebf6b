/// A helper for building a string in-order from an original string and a
/// series of retains, deletions and insertions applied to it. It is safe to
/// use with UTF-8 strings as all operations are based on character indices.
/// The methods must be called in-order.
pub struct StringBuilder<'a> {
    original: std::str::Chars<'a>,
    buffer: String,
    consumed: usize,
}

impl std::fmt::Debug for StringBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringBuilder")
            .field("buffer", &self.buffer)
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}

impl<'a> StringBuilder<'a> {
    pub fn new(original: &'a str) -> Self {
        StringBuilder {
            original: original.chars(),
            buffer: String::with_capacity(original.len()),
            consumed: 0,
        }
    }

    /// Number of characters of the original string that have been retained
    /// or deleted so far.
    pub fn consumed(&self) -> usize { self.consumed }

    /// Append `text` to the built buffer.
    pub fn insert(&mut self, text: &str) { self.buffer.push_str(text); }

    /// Skip copying `length` characters from the original string.
    pub fn delete(&mut self, length: usize) {
        if length == 0 {
            return;
        }

        self.consumed += self.original.by_ref().take(length).count();
    }

    /// Copy `length` characters from the original string to the built buffer.
    pub fn retain(&mut self, length: usize) {
        let before = self.buffer.len();
        self.buffer.extend(self.original.by_ref().take(length));
        self.consumed += self.buffer[before..].chars().count();
    }

    /// Copy characters from the original string until `char_index` has been
    /// reached. Does nothing if the builder is already past `char_index`.
    pub fn retain_until(&mut self, char_index: usize) {
        self.retain(char_index.saturating_sub(self.consumed));
    }

    /// Copy everything that is left of the original string.
    pub fn retain_rest(&mut self) { self.buffer.extend(self.original.by_ref()); }

    /// Consume the builder and return the built string.
    pub fn build(mut self) -> String {
        self.retain_rest();
        self.buffer
    }
}
