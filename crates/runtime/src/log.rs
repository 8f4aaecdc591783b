
use tracing_subscriber::filter::Targets;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::layer::{Layer, SubscriberExt};


#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Error parsing RUST_LOG env var into targets specifier")]
    InvalidLogEnv(#[source] tracing_subscriber::filter::ParseError),
    #[error("Setting tracing listener failed (setup_logger called twice?)")]
    SetFailed(#[source] tracing::subscriber::SetGlobalDefaultError),
}

/// Targets used when RUST_LOG is unset: the given crates at debug, everything else at warn.
pub fn default_targets(crate_names: &[&str]) -> String {
    let mut targets = crate_names.iter()
        .map(|name| format!("{name}=debug"))
        .collect::<Vec<_>>();
    targets.push("runtime=debug".into());
    targets.push("sanitize=info".into());
    targets.push("warn".into());
    targets.join(",")
}

/// Install the global subscriber; logs go to stderr so stdout stays free for output.
pub fn setup_logger(crate_names: &[&str]) -> Result<(), LoggerError> {
    let env_targets = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| default_targets(crate_names));
    let env_filter = env_targets.parse::<Targets>().map_err(LoggerError::InvalidLogEnv)?;

    let subscriber = Registry::default()
        .with(tracing_tree::HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true)
            .with_filter(env_filter)
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(LoggerError::SetFailed)?;

    Ok(())
}
