// File: src/method.rs
// Purpose: Recognized HTTP method tokens for handler binding

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP method tokens a route may carry handlers for
///
/// `All` binds a handler for every method.
///
/// # Examples
///
/// ```
/// use shrinkroute::Method;
///
/// assert_eq!("GET".parse::<Method>(), Ok(Method::Get));
/// assert_eq!("all".parse::<Method>(), Ok(Method::All));
/// assert!("path".parse::<Method>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
    All,
}

impl Method {
    /// Every recognized method, in binding order
    pub const ALL: [Method; 9] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
        Method::Head,
        Method::Options,
        Method::Trace,
        Method::All,
    ];

    /// Lowercase token, as written in route definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Patch => "patch",
            Method::Head => "head",
            Method::Options => "options",
            Method::Trace => "trace",
            Method::All => "all",
        }
    }
}

/// Returned when a token is not a recognized method
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method token `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownMethod(token.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
