// File: src/helper.rs
// Purpose: Absolute URL origins and the per-request URL helper

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::collaborator::RequestInfo;
use crate::params::Params;
use crate::table::RouteTable;

/// Scheme and `host[:port]` prepended to a path to make an absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
}

impl Origin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Takes scheme and host from an absolute URL string
    ///
    /// Anything after the host is ignored. Returns `None` when the string is
    /// not an absolute URL with a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use shrinkroute::Origin;
    ///
    /// let origin = Origin::parse("https://example.com:8443/ignored?x=1").unwrap();
    /// assert_eq!(origin.to_string(), "https://example.com:8443");
    ///
    /// assert!(Origin::parse("example.com").is_none());
    /// ```
    pub fn parse(literal: &str) -> Option<Self> {
        let url = Url::parse(literal).ok()?;
        let host = url.host_str()?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        Some(Self::new(url.scheme(), host))
    }

    /// Takes scheme and host from an inbound request
    ///
    /// An empty protocol falls back to `http`. Returns `None` when the
    /// request carries no host.
    pub fn from_request(request: &dyn RequestInfo) -> Option<Self> {
        let host = request.host().filter(|h| !h.is_empty())?;
        let scheme = match request.protocol().trim_end_matches(':') {
            "" => "http",
            scheme => scheme,
        };
        Some(Self::new(scheme, host))
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// Where `full_url` takes its scheme and host from
#[derive(Clone, Copy)]
pub enum HostSource<'a> {
    /// An absolute URL string such as `"https://example.com"`
    Literal(&'a str),
    /// An inbound request
    Request(&'a dyn RequestInfo),
    /// An already resolved origin
    Origin(&'a Origin),
}

impl<'a> HostSource<'a> {
    pub fn request(request: &'a dyn RequestInfo) -> Self {
        HostSource::Request(request)
    }

    /// Resolves the origin, `None` when no host can be determined
    pub fn origin(&self) -> Option<Origin> {
        match self {
            HostSource::Literal(literal) => Origin::parse(literal),
            HostSource::Request(request) => Origin::from_request(*request),
            HostSource::Origin(origin) => Some((*origin).clone()),
        }
    }
}

impl<'a> From<&'a str> for HostSource<'a> {
    fn from(literal: &'a str) -> Self {
        HostSource::Literal(literal)
    }
}

impl<'a> From<&'a String> for HostSource<'a> {
    fn from(literal: &'a String) -> Self {
        HostSource::Literal(literal)
    }
}

impl<'a> From<&'a Origin> for HostSource<'a> {
    fn from(origin: &'a Origin) -> Self {
        HostSource::Origin(origin)
    }
}

/// URL builder bound to one inbound request
///
/// Host frameworks create a fresh helper per request so that
/// [`full_url`](UrlHelper::full_url) uses that request's scheme and host.
/// Cloning is cheap: the route table is shared.
///
/// # Examples
///
/// ```
/// use shrinkroute::{Origin, Params, RouteTable, UrlHelper};
/// use std::sync::Arc;
/// # use shrinkroute::{Collaborator, Method, Shrinkroute};
/// # struct Noop;
/// # impl Collaborator for Noop {
/// #     type Handler = ();
/// #     fn bind_handler(&mut self, _: Method, _: &str, _: ()) {}
/// # }
///
/// let mut shrinkr = Shrinkroute::with_collaborator(Noop);
/// shrinkr.register("user", "/user/:id").unwrap();
/// let (table, _) = shrinkr.into_parts();
///
/// let urls = UrlHelper::new(Arc::new(table), Some(Origin::new("https", "example.com")));
/// let params = Params::new().with("id", 7);
///
/// assert_eq!(urls.url("user", &params), "/user/7");
/// assert_eq!(urls.full_url("user", &params), "https://example.com/user/7");
/// ```
pub struct UrlHelper<H> {
    table: Arc<RouteTable<H>>,
    origin: Option<Origin>,
}

impl<H> UrlHelper<H> {
    pub fn new(table: Arc<RouteTable<H>>, origin: Option<Origin>) -> Self {
        Self { table, origin }
    }

    /// Helper for `request`, taking the origin from its scheme and host
    pub fn for_request(table: Arc<RouteTable<H>>, request: &dyn RequestInfo) -> Self {
        Self::new(table, Origin::from_request(request))
    }

    pub fn table(&self) -> &RouteTable<H> {
        &self.table
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// See [`RouteTable::url`]
    pub fn url(&self, name: &str, params: &Params) -> String {
        self.table.url(name, params)
    }

    /// See [`RouteTable::url_with`]
    pub fn url_with(&self, name: &str, params: &Params, append_extra: bool) -> String {
        self.table.url_with(name, params, append_extra)
    }

    /// Absolute URL using this request's origin
    ///
    /// Falls back to the relative URL when the request had no host.
    pub fn full_url(&self, name: &str, params: &Params) -> String {
        match &self.origin {
            Some(origin) => {
                self.table
                    .full_url(origin, name, params, self.table.append_extra())
            }
            None => self.url(name, params),
        }
    }

    /// Absolute URL using an explicit host source
    pub fn full_url_for<'a>(
        &self,
        source: impl Into<HostSource<'a>>,
        name: &str,
        params: &Params,
        append_extra: bool,
    ) -> String {
        self.table.full_url(source, name, params, append_extra)
    }
}

impl<H> Clone for UrlHelper<H> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            origin: self.origin.clone(),
        }
    }
}

impl<H> fmt::Debug for UrlHelper<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlHelper")
            .field("routes", &self.table.len())
            .field("origin", &self.origin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FakeRequest {
        protocol: &'static str,
        host: Option<&'static str>,
    }

    impl RequestInfo for FakeRequest {
        fn protocol(&self) -> &str {
            self.protocol
        }

        fn host(&self) -> Option<&str> {
            self.host
        }
    }

    #[test]
    fn test_origin_from_request() {
        let req = FakeRequest {
            protocol: "https:",
            host: Some("example.com:8080"),
        };
        assert_eq!(
            Origin::from_request(&req),
            Some(Origin::new("https", "example.com:8080"))
        );
    }

    #[test]
    fn test_origin_from_request_defaults_scheme() {
        let req = FakeRequest {
            protocol: "",
            host: Some("localhost"),
        };
        assert_eq!(Origin::from_request(&req).unwrap().to_string(), "http://localhost");
    }

    #[test]
    fn test_origin_from_request_without_host() {
        let req = FakeRequest {
            protocol: "http",
            host: None,
        };
        assert!(Origin::from_request(&req).is_none());
    }

    #[test]
    fn test_origin_parse_default_port_is_dropped() {
        let origin = Origin::parse("https://example.com:443").unwrap();
        assert_eq!(origin.host, "example.com");
    }
}
