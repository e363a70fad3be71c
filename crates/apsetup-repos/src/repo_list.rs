//! Repo-list file parsing
//!
//! Plain text, one repository identifier per line. Whitespace is trimmed
//! and blank lines are skipped.

use crate::error::Result;
use camino::Utf8Path;
use std::fs;

/// Parse repo identifiers out of file content
pub fn parse_repo_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Load the repo-list file
///
/// Returns `Ok(None)` when the file does not exist; the caller skips
/// repo registration with a warning rather than failing the run.
pub fn load_repo_list(path: &Utf8Path) -> Result<Option<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(parse_repo_list(&content))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_parse_trims_and_skips_blanks() {
        let content = "autopkg/recipes\n\n  grahampugh/recipes  \n\t\n";
        assert_eq!(
            parse_repo_list(content),
            vec!["autopkg/recipes", "grahampugh/recipes"]
        );
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(parse_repo_list("").is_empty());
        assert!(parse_repo_list("\n\n").is_empty());
    }

    #[test]
    fn test_load_absent_file_is_none() {
        let result = load_repo_list(Utf8Path::new("/tmp/no-such-repo-list-77ac.txt"));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_load_existing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("autopkg-repo-list.txt")).unwrap();
        fs::write(&path, "autopkg/recipes\nhomebysix-recipes\n").unwrap();

        let repos = load_repo_list(&path).unwrap().unwrap();
        assert_eq!(repos, vec!["autopkg/recipes", "homebysix-recipes"]);
    }
}
