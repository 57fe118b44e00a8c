use crate::models::FileDescriptor;

/// Case-insensitive substring match. An empty pattern matches everything.
pub fn name_matches(pattern: &str, name: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&pattern.to_lowercase())
}

/// Original indices of the entries whose name matches, in listing order.
pub fn apply_filter(pattern: &str, files: &[FileDescriptor]) -> Vec<usize> {
    if pattern.is_empty() {
        return (0..files.len()).collect();
    }
    files
        .iter()
        .enumerate()
        .filter(|(_, f)| name_matches(pattern, &f.name))
        .map(|(i, _)| i)
        .collect()
}
