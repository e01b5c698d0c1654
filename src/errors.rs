//! Error types for the Groq chat client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("GROQ_API_KEY not found. Set it in the environment or in a .env file")]
    MissingCredential,

    #[error("unknown model '{0}' in config, expected one of: {}", crate::groq::MODELS.join(", "))]
    UnknownModel(String),

    #[error("Groq API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type ChatResult<T> = Result<T, ChatError>;
