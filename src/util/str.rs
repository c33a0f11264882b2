pub(crate) trait StrExt {
    fn starts_with_ignore_case(&self, start: &str) -> bool;

    fn contains_ignore_case(&self, needle: &str) -> bool;

    /// Collapses every run of whitespace into a single space and trims both ends.
    fn collapse_whitespace(&self) -> String;
}

impl StrExt for str {
    fn starts_with_ignore_case(&self, start: &str) -> bool {
        self.len() >= start.len()
            && self.is_char_boundary(start.len())
            && self[..start.len()].eq_ignore_ascii_case(start)
    }

    fn contains_ignore_case(&self, needle: &str) -> bool {
        self.to_lowercase().contains(&needle.to_lowercase())
    }

    fn collapse_whitespace(&self) -> String {
        let mut collapsed = String::with_capacity(self.len());

        for word in self.split_whitespace() {
            if !collapsed.is_empty() {
                collapsed.push(' ');
            }
            collapsed.push_str(word);
        }
        collapsed
    }
}
