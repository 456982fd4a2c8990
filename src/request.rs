use crate::error::HeaderAccessError;

/// The view of a request the dispatcher needs.
pub trait RequestLike {
    fn method(&self) -> &str;

    /// The request target: path plus query string, if any.
    fn uri(&self) -> &str;

    /// Looks up a header by case-insensitive name.
    ///
    /// An `Err` means the header can not be inspected at all, which aborts
    /// dispatch. A missing header is `Ok(None)`.
    fn header(&self, name: &str) -> Result<Option<&str>, HeaderAccessError>;
}

impl<B> RequestLike for http::Request<B> {
    fn method(&self) -> &str {
        self.method().as_str()
    }

    fn uri(&self) -> &str {
        let uri = self.uri();
        match uri.path_and_query() {
            Some(pq) => pq.as_str(),
            None => uri.path(),
        }
    }

    fn header(&self, name: &str) -> Result<Option<&str>, HeaderAccessError> {
        match self.headers().get(name) {
            Some(value) => value
                .to_str()
                .map(Some)
                .map_err(|e| HeaderAccessError::new(name, e.to_string())),
            None => Ok(None),
        }
    }
}
