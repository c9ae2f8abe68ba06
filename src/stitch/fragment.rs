// src/stitch/fragment.rs
// A chunk of the output document and whether producing it hit an error.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub had_errors: bool,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            had_errors: false,
        }
    }

    // An inline error message standing in for content
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            had_errors: true,
        }
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn push_error(&mut self, text: &str) {
        self.text.push_str(text);
        self.had_errors = true;
    }

    pub fn append(&mut self, other: Fragment) {
        self.text.push_str(&other.text);
        self.had_errors |= other.had_errors;
    }
}
