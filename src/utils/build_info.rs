/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("POWERRENT_CORE_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("POWERRENT_CORE_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("POWERRENT_CORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("POWERRENT_CORE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("POWERRENT_CORE_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("POWERRENT_CORE_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

impl BuildMetadata {
    /// `true` when the crate was built from a tree with uncommitted changes.
    pub fn is_dirty(&self) -> bool {
        self.git_status == "dirty"
    }
}

impl std::fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "powerrent_core {} ({}{}, {} {}, built {})",
            self.version,
            self.git_hash,
            if self.is_dirty() { "+dirty" } else { "" },
            self.target,
            self.profile,
            self.timestamp
        )
    }
}
