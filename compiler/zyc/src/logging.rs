//! Subscriber setup for the `zyc` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the log filter (`RUST_LOG` syntax).
pub const LOG_ENV: &str = "ZY_LOG";

/// Install the global subscriber once.
///
/// Does nothing unless `ZY_LOG` is set, e.g. `ZY_LOG=zy_lexer=trace`.
/// Events go to stderr as an indented span tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var(LOG_ENV).is_err() {
            return;
        }
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(
                HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_indent_lines(true),
            )
            .with(filter)
            .init();
    });
}
