//! Tri-state fetch slot shared by the view-state controllers.

/// State of one remote fetch as exposed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remote<T> {
    /// The fetch is outstanding.
    Loading,
    /// The fetch settled with a value.
    Ready(T),
    /// The fetch settled with an error and carries no value.
    Failed,
}

impl<T> Remote<T> {
    /// Returns `true` while the fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the settled value, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_has_no_value() {
        // Arrange
        let slot: Remote<u32> = Remote::Loading;

        // Act & Assert
        assert!(slot.is_loading());
        assert_eq!(slot.ready(), None);
    }

    #[test]
    fn test_ready_exposes_value() {
        // Arrange
        let slot = Remote::Ready(7_u32);

        // Act & Assert
        assert!(!slot.is_loading());
        assert_eq!(slot.ready(), Some(&7));
    }

    #[test]
    fn test_failed_is_settled_without_value() {
        // Arrange
        let slot: Remote<u32> = Remote::Failed;

        // Act & Assert
        assert!(!slot.is_loading());
        assert_eq!(slot.ready(), None);
    }
}
