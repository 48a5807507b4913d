//! Errors raised while loading content

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{0:?} has no `path` in its front-matter")]
    MissingPath(PathBuf),

    #[error("{file:?} uses the path {path}, which is reserved for a generated page")]
    ReservedPath { path: String, file: PathBuf },

    #[error("{first} and {second} both declare the path {path}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("invalid JSON front-matter: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unterminated JSON front-matter")]
    UnterminatedJson,
}
