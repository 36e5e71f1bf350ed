use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    RepositoryError(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
