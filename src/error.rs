use crate::mattermost::error::MatError;
use crate::registry::RegistryError;
use std::fmt;

/// Sum type representing every possible unexceptional fail state of the
/// two entry points.
#[derive(Debug)]
pub enum Failure {
    Api(MatError),
    Registry(RegistryError),
}

impl From<MatError> for Failure {
    fn from(e: MatError) -> Self {
        Failure::Api(e)
    }
}

impl From<RegistryError> for Failure {
    fn from(e: RegistryError) -> Self {
        Failure::Registry(e)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Api(e) => write!(f, "{}", e),
            Failure::Registry(e) => write!(f, "{}", e),
        }
    }
}
