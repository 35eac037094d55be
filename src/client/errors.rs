use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("url parsing error {0}")]
    UrlParsingError(#[from] url::ParseError),
    #[error("{0}")]
    DuplicateCategory(String),
    #[error("product {0} not found")]
    ProductNotFound(i32),
    #[error("request rejected with {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid form: {0}")]
    InvalidForm(#[from] validator::ValidationErrors),
    #[error("category name is empty")]
    EmptyCategoryName,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("pdf error: {0}")]
    Pdf(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file error: {0}")]
    Session(#[from] serde_json::Error),
}
