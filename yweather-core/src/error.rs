use reqwest::StatusCode;

/// Errors that abort a weather lookup.
///
/// Missing fields in an otherwise readable response are not errors; they are
/// reported through [`WeatherReport::is_complete`](crate::WeatherReport::is_complete).
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error(
        "The Yahoo! Weather endpoint {endpoint:?} is not a usable http(s) URL ({reason}). \
         Hint: run `yweather configure` and fix or clear the endpoint."
    )]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Can't prepare a Yahoo! Weather request for {location:?}: {source}")]
    InvalidRequest {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Couldn't set up the HTTP client (TLS backend or system configuration): {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error(
        "Yahoo! Weather is either not responding, or ignoring you because you've made too many \
         requests recently. In either case, it should work again in a little while."
    )]
    Transport(#[from] reqwest::Error),

    #[error("Yahoo! Weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Yahoo! Weather responded with unexpected data: {0}")]
    Format(#[from] XmlError),
}

impl WeatherError {
    /// The provider could not be reached or did not hand back a usable body.
    pub fn is_transport(&self) -> bool {
        matches!(self, WeatherError::Transport(_) | WeatherError::Status { .. })
    }

    /// The provider answered, but not with well-formed XML.
    pub fn is_format(&self) -> bool {
        matches!(self, WeatherError::Format(_))
    }
}

/// Why a response body was rejected as XML.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    #[error("document is empty")]
    Empty,
    #[error("document has no root element")]
    NoRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("text outside the root element")]
    StrayText,
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("namespace prefix {0:?} is not declared")]
    UnknownPrefix(String),
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_errors_are_not_transport_errors() {
        let err = WeatherError::from(XmlError::NoRoot);
        assert!(err.is_format());
        assert!(!err.is_transport());
        assert!(err.to_string().contains("unexpected data"));
    }

    #[test]
    fn endpoint_errors_name_the_endpoint_not_the_location() {
        let err = WeatherError::InvalidEndpoint {
            endpoint: "not a url".into(),
            reason: "relative URL without a base".into(),
        };
        let msg = err.to_string();

        assert!(msg.contains("\"not a url\""));
        assert!(msg.contains("yweather configure"));
        assert!(!err.is_transport());
        assert!(!err.is_format());
    }

    #[test]
    fn client_setup_errors_do_not_blame_the_provider() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = WeatherError::ClientSetup(source);

        assert!(err.to_string().starts_with("Couldn't set up the HTTP client"));
        assert!(!err.to_string().contains("not responding"));
        assert!(!err.is_transport());
    }

    #[test]
    fn request_errors_name_the_location() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = WeatherError::InvalidRequest {
            location: "Columbus, OH".into(),
            source,
        };

        assert!(err.to_string().starts_with("Can't prepare a Yahoo! Weather request for \"Columbus, OH\""));
        assert!(!err.is_transport());
    }

    #[test]
    fn status_errors_count_as_transport() {
        let err = WeatherError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".into(),
        };
        assert!(err.is_transport());
        assert!(err.to_string().contains("429"));
    }
}
