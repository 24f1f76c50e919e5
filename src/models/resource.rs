/// Lifecycle of one fetch: `Loading`, then either `Success` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        ResourceState::Loading
    }
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }

    /// True for `Success` and `Error`; no further state follows in the same cycle.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResourceState::Error(message) => Some(message),
            _ => None,
        }
    }
}
