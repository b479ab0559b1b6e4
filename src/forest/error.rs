use thiserror::Error;

/// Misuse of the sink registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    #[error("Cannot plant the tree of souls into itself")]
    PlantedIntoItself,

    #[error("Cannot uproot tree which is not planted")]
    NotPlanted,
}
