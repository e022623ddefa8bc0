//! User-facing message constants.

/// Shown inline when submit is pressed with an empty message.
pub const ERR_EMPTY_MESSAGE: &str = "Please enter the message.";

/// Outcome of a request whose future was dropped before it finished.
pub const ERR_REQUEST_CANCELLED: &str = "Request cancelled.";

/// Toast text after a successful copy.
pub const MSG_COPIED: &str = "Copied to clipboard!";
