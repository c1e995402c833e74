//! Log output.
//!
//! Generated code goes to stdout or to files; logs always go to stderr so that both never mix.

use tracing_subscriber::{
  fmt as tracing_fmt,
  layer::SubscriberExt,
  util::{SubscriberInitExt, TryInitError},
  EnvFilter, Registry,
};

/// Filter directive matching a count of `-v` flags.
pub fn directive(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Filter of `RUST_LOG`, or the one matching `verbosity` when unset or invalid.
pub fn filter(verbosity: u8) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(verbosity)))
}

/// Install the process-wide subscriber.
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
  let layer = tracing_fmt::layer().with_writer(std::io::stderr).with_target(false);

  Registry::default().with(layer).with(filter(verbosity)).try_init()
}
