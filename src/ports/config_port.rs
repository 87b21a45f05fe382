//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// All key/value pairs of `section`, sorted by key. Keys without a value
    /// are skipped.
    fn section_entries(&self, section: &str) -> Vec<(String, String)>;

    fn has_section(&self, section: &str) -> bool {
        !self.section_entries(section).is_empty()
    }
}
