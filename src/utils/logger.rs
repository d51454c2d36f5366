use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "claw_agent=debug,info"
    } else {
        "claw_agent=info"
    }
}

/// Diagnostic logs go to stderr; stdout carries the activity log mirror.
pub fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    let fmt = if json {
        fmt.json().boxed()
    } else {
        fmt.compact().boxed()
    };

    tracing_subscriber::registry().with(fmt).with(filter).init();
}
