use std::{
    env,
    path::{Path, PathBuf},
};

use dirs::home_dir;

/// Overrides the application directory when set.
pub const HOME_ENV: &str = "POWERRENT_HOME";

const DEFAULT_DIR_NAME: &str = ".powerrent";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";

/// Resolves where configuration and collections live on disk.
pub struct PathResolver;

impl PathResolver {
    /// `$POWERRENT_HOME`, else `~/.powerrent`, else `./.powerrent`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_wins() {
        let base = PathResolver::resolve_base(Some(PathBuf::from("/srv/powerrent")));
        assert_eq!(base, PathBuf::from("/srv/powerrent"));
        assert_eq!(
            PathResolver::data_dir_in(&base),
            PathBuf::from("/srv/powerrent/data")
        );
        assert_eq!(
            PathResolver::config_file_in(&base),
            PathBuf::from("/srv/powerrent/config.json")
        );
    }
}
