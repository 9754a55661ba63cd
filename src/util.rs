use std::path::{Path, PathBuf};

/// Used as a clap value parser for paths that have to exist already.
pub fn parse_path(arg: &str) -> Result<PathBuf, std::io::Error> {
    let path = expand_home(Path::new(arg));
    match path.try_exists() {
        Ok(true) => Ok(path),
        Ok(false) => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Path not found".to_string(),
        )),
        Err(e) => Err(e),
    }
}

/// Expands a leading `~` component to the home directory, leaving the path
/// alone otherwise or when no home directory can be found.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) if rest.as_os_str().is_empty() => home,
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::env;

    use pretty_assertions::assert_eq;

    #[test]
    fn expand_home_paths() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home(Path::new("~")), home);
        assert_eq!(expand_home(Path::new("~/notes/a.html")), home.join("notes/a.html"));
        assert_eq!(expand_home(Path::new("~other/a.html")), PathBuf::from("~other/a.html"));
        assert_eq!(expand_home(Path::new("notes/~/a.html")), PathBuf::from("notes/~/a.html"));

        // without $HOME the account database still knows the home directory
        let saved = env::var_os("HOME");
        env::remove_var("HOME");
        let fallback = dirs::home_dir();
        let expanded = expand_home(Path::new("~/notes/a.html"));
        if let Some(saved) = saved {
            env::set_var("HOME", saved);
        }
        if let Some(fallback) = fallback {
            assert_eq!(expanded, fallback.join("notes/a.html"));
        }
    }

    #[test]
    fn parse_path_requires_existence() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().to_str().unwrap();
        assert_eq!(parse_path(existing).unwrap(), dir.path());
        assert!(parse_path(&format!("{existing}/missing")).is_err());
    }
}
