//! Mapping of reqwest failures onto the bridge error taxonomy.

use std::error::Error as StdError;

use hostbridge_core::Error;

/// Normalizes a reqwest error into a transport error.
///
/// The message keeps reqwest's own text followed by its source chain, since
/// the top-level text alone rarely says why a connection failed.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    if err.is_timeout() && !message.contains("timed out") {
        message.push_str(" (timed out)");
    }

    Error::transport(message)
}
