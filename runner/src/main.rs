use smoke_core::{RunError, DEFAULT_BASE_URL};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), RunError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut out = std::io::stdout().lock();
    bls_smoke::smoke(DEFAULT_BASE_URL, &mut out)?;
    Ok(())
}
