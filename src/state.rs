//! Request lifecycle shared by both screens

/// Where a screen's one outstanding request stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> RequestState<T> {
    /// Enter `Loading`, dropping any previous result or error.
    pub fn begin(&mut self) {
        *self = RequestState::Loading;
    }

    pub fn succeed(&mut self, value: T) {
        *self = RequestState::Success(value);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = RequestState::Error(message.into());
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            RequestState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut state = RequestState::Success(3);
        state.begin();
        assert!(state.is_loading());
        assert_eq!(state.success(), None);

        state.fail("boom");
        assert_eq!(state.error(), Some("boom"));
        assert!(!state.is_loading());

        state.begin();
        assert_eq!(state.error(), None);
    }
}
