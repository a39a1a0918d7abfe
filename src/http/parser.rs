use crate::http::request::{Method, Request};

/// Size of the single read a request must fit in.
pub const REQUEST_BUFFER_SIZE: usize = 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// No CRLF-terminated request line
    Incomplete,
    /// Request line is not exactly `method target version`
    InvalidRequestLine,
}

/// Parses the request line out of one received buffer.
///
/// Bytes are decoded lossily as UTF-8. Empty lines before the request line
/// are skipped. Tokens are separated by exactly one space, so a doubled
/// space makes the line invalid.
pub fn parse_request(buf: &[u8]) -> Result<Request, ParseError> {
    let head = String::from_utf8_lossy(buf);
    let line = request_line(&head).ok_or(ParseError::Incomplete)?;

    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(ParseError::InvalidRequestLine);
    };

    Ok(Request::new(Method::parse(method), *target, *version))
}

fn request_line(head: &str) -> Option<&str> {
    let mut rest = head;

    while let Some((line, tail)) = rest.split_once("\r\n") {
        if !line.is_empty() {
            return Some(line);
        }
        rest = tail;
    }

    None
}
