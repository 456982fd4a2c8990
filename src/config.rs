/// Dispatcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatcherConfig {
    /// Internal redirects allowed per dispatch. `None` disables the limit.
    pub max_forwards: Option<usize>,
}

impl DispatcherConfig {
    pub const DEFAULT_MAX_FORWARDS: usize = 16;

    pub fn unlimited() -> Self {
        Self { max_forwards: None }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_forwards: Some(Self::DEFAULT_MAX_FORWARDS),
        }
    }
}
