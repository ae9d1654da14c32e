use lambda_http::http::Method;
use std::fmt::{Display, Formatter};

/// What an inbound request asks for, decided from its method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// `POST`: add an entry
    Append,
    /// `GET`: read the newest entries
    Recent,
    Unsupported(Method),
}

impl From<&Method> for RequestKind {
    fn from(method: &Method) -> Self {
        if *method == Method::POST {
            RequestKind::Append
        } else if *method == Method::GET {
            RequestKind::Recent
        } else {
            RequestKind::Unsupported(method.clone())
        }
    }
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::Append => f.write_str("append"),
            RequestKind::Recent => f.write_str("recent"),
            RequestKind::Unsupported(method) => write!(f, "unsupported {method}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_method() {
        assert_eq!(RequestKind::Append, RequestKind::from(&Method::POST));
        assert_eq!(RequestKind::Recent, RequestKind::from(&Method::GET));
        assert_eq!(
            RequestKind::Unsupported(Method::DELETE),
            RequestKind::from(&Method::DELETE)
        );
        assert_eq!(
            RequestKind::Unsupported(Method::OPTIONS),
            RequestKind::from(&Method::OPTIONS)
        );
    }
}
