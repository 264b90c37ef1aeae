use std::error::Error;
use std::fmt;

/// A type of error which can be returned whenever commands are sent to
/// a controller whose task has terminated.
pub struct ControllerClosedError;

impl fmt::Debug for ControllerClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClosedError").finish()
    }
}

impl fmt::Display for ControllerClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the controller has closed".fmt(f)
    }
}

impl Error for ControllerClosedError {}
