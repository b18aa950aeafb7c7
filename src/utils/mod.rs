pub mod build_info;
pub mod fs;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::filter::Directive;

pub use paths::PathResolver;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "powerrent_core=info";

/// Initializes the global tracing subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
