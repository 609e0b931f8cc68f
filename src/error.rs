use std::{
    error::Error as StdError,
    fmt::{
        self, Display, Formatter,
    },
    net::AddrParseError,
    result::{Result as StdResult},
};
use idna;
use serde_json;

#[derive(Debug)]
pub enum Error {
    IdnaError(String, idna::Errors),
    BadIpValue(String, AddrParseError),
    SerdeJsonError(serde_json::error::Error),
    HostResolution(String, AddrParseError),
    InvalidArgument(String),
    ProtocolEncoding(String),
    ProtocolMismatch(String),
}

impl Error {
    pub(crate) fn idna_error<T: Into<String>>(domain: T, err: idna::Errors) -> Self {
        Self::IdnaError(domain.into(), err)
    }

    pub(crate) fn bad_ip_value<T: Into<String>>(value: T, err: AddrParseError) -> Self {
        Self::BadIpValue(value.into(), err)
    }

    pub(crate) fn host_resolution<T: Into<String>>(host: T, err: AddrParseError) -> Self {
        Self::HostResolution(host.into(), err)
    }

    pub(crate) fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn protocol_encoding<T: Into<String>>(msg: T) -> Self {
        Self::ProtocolEncoding(msg.into())
    }

    pub(crate) fn protocol_mismatch<T: Into<String>>(found_type: T) -> Self {
        Self::ProtocolMismatch(found_type.into())
    }

    /// The error category, one of `"invalid-argument"`, `"protocol-mismatch"`, `"host-resolution"` and
    /// `"protocol-encoding"`.  Failures of the IDNA normalizer and of the JSON parser, and a stored IP identifier value
    /// that is not an address, are encoding errors.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid-argument",
            Self::ProtocolMismatch(_) => "protocol-mismatch",
            Self::HostResolution(_, _) => "host-resolution",
            Self::IdnaError(_, _) | Self::BadIpValue(_, _) | Self::SerdeJsonError(_) | Self::ProtocolEncoding(_) => {
                "protocol-encoding"
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::IdnaError(_, err) => Some(err),
            Self::BadIpValue(_, err) => Some(err),
            Self::SerdeJsonError(err) => Some(err),
            Self::HostResolution(_, err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::error::Error> for Error {
    fn from(err: serde_json::error::Error) -> Error {
        Error::SerdeJsonError(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::IdnaError(domain, err) => write!(f, "acmev02_identifier::error::Error::IdnaError({:#}: {:#})", domain, err),
            Self::BadIpValue(value, err) => write!(f, "acmev02_identifier::error::Error::BadIpValue(bad ip identifier value {:#}: {:#})", value, err),
            Self::SerdeJsonError(err) => write!(f, "acmev02_identifier::error::Error::SerdeJsonError({:#})", err),
            Self::HostResolution(host, err) => write!(f, "acmev02_identifier::error::Error::HostResolution({:#}: {:#})", host, err),
            Self::InvalidArgument(msg) => write!(f, "acmev02_identifier::error::Error::InvalidArgument({:#})", msg),
            Self::ProtocolEncoding(msg) => write!(f, "acmev02_identifier::error::Error::ProtocolEncoding({:#})", msg),
            Self::ProtocolMismatch(found) => write!(f, "acmev02_identifier::error::Error::ProtocolMismatch(unexpected identifier type {:#})", found),
        }
    }
}

pub type Result<T> = StdResult<T, Error>;
