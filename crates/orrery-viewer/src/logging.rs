use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// `RUST_LOG` overrides the default info-level filter, and debug level also
/// switches the renderer into verbose shader diagnostics.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }
        builder.init();
        log::debug!("logging initialized");
    });
}
