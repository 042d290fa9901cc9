use services::{CredentialsError, EditorError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The deck fails the save gate; carries the reason.
    CannotSave(String),
    /// The server sent a credential form back; carries what to tell the user.
    Rejected(String),
    Network,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::CannotSave(reason) => format!("Cannot save: {reason}."),
            ViewError::Rejected(message) => message.clone(),
            ViewError::Network => "The server could not be reached. Please try again.".to_string(),
            ViewError::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<&EditorError> for ViewError {
    fn from(err: &EditorError) -> Self {
        match err {
            EditorError::CannotSave(reason) => ViewError::CannotSave(reason.to_string()),
            EditorError::AlreadySaved => ViewError::CannotSave(err.to_string()),
            EditorError::Submit(_) => ViewError::Network,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&CredentialsError> for ViewError {
    fn from(err: &CredentialsError) -> Self {
        match err {
            CredentialsError::Http(_) | CredentialsError::HttpStatus(_) => ViewError::Network,
            CredentialsError::Rejected(_) => {
                ViewError::Rejected("The server did not accept the form.".to_string())
            }
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizcards_core::model::DeckError;

    #[test]
    fn blocked_save_explains_itself() {
        let err = EditorError::CannotSave(DeckError::EmptyName);
        assert_eq!(
            ViewError::from(&err).message(),
            "Cannot save: deck name cannot be empty."
        );
    }

    #[test]
    fn rejected_form_is_not_a_network_error() {
        let landed_on = url::Url::parse("http://localhost:8000/register").unwrap();
        let err = CredentialsError::Rejected(landed_on);
        assert!(matches!(ViewError::from(&err), ViewError::Rejected(_)));
    }
}
