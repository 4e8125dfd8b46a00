use std::fmt;

#[derive(Debug)]
pub struct CertificateDispatchError {
    pub status_code: u16,
    pub cause: String,
    pub message: Option<String>,
}

impl CertificateDispatchError {
    pub fn new(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            status_code: 500,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn precondition(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            status_code: 400,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }
}

impl std::error::Error for CertificateDispatchError {}

impl fmt::Display for CertificateDispatchError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}
