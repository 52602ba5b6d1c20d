use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreprocessError {
    #[error("utterance is empty")]
    EmptyInput,
    #[error("unrecognized date '{text}'")]
    InvalidDate { text: String },
}
