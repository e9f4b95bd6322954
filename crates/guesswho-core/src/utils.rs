//! Utility helpers: data directory and answer matching.

use std::path::PathBuf;

/// Get the Guesswho data directory (e.g. `~/.guesswho/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".guesswho")
}

/// Case-insensitive membership test against a fixed keyword set.
pub fn matches_keyword(input: &str, keywords: &[&str]) -> bool {
    let lower = input.trim().to_lowercase();
    keywords.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_keyword() {
        let set = ["yes", "y"];
        assert!(matches_keyword("YES", &set));
        assert!(matches_keyword("  y ", &set));
        assert!(!matches_keyword("yes!", &set));
        assert!(!matches_keyword("", &set));
    }

    #[test]
    fn test_data_path_under_home() {
        let path = get_data_path();
        assert!(path.ends_with(".guesswho"));
        if let Some(home) = dirs_next::home_dir() {
            assert_eq!(path, home.join(".guesswho"));
        }
    }
}
