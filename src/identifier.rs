use std::{
    convert::TryFrom,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};
use log::debug;
use serde::{self, Serialize, Deserialize};
use serde_json::{Map, Value};
use crate::{
    error::{Error, Result},
    helper::{host_address, parse_ip, to_ace},
    json::{Json, JsonBuilder},
};

/// Identifier type for DNS names, defined in [RFC 8555 §9.7.7](https://tools.ietf.org/html/rfc8555#section-9.7.7).
pub const TYPE_DNS: &str = "dns";

/// Identifier type for IP addresses, defined in [RFC 8738](https://tools.ietf.org/html/rfc8738).
pub const TYPE_IP: &str = "ip";

pub const KEY_TYPE: &str = "type";
pub const KEY_VALUE: &str = "value";

/// ACMEv02 identifier objects.
/// This is used in various places in [RFC 8555](https://tools.ietf.org/html/rfc8555) but does not have a singular
/// referencable definition in the RFC.
///
/// Two identifiers are equal when their type and value are equal.  Values are normalized when an identifier is
/// created with [AcmeIdentifier::dns] or [AcmeIdentifier::ip], never when comparing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawIdentifier", into = "RawIdentifier")]
pub enum AcmeIdentifier {
    /// A domain name in its ASCII-compatible encoding.
    Dns(String),

    /// An IP address in its canonical textual form; see [crate::host_address].
    Ip(String),

    /// An identifier type not defined by the RFCs.  CAs may accept their own types; these are kept verbatim.
    Other {
        identifier_type: String,
        value: String,
    },
}

impl AcmeIdentifier {
    /// Creates an identifier of any type.  The value is stored as given; no encoding of unicode domains or
    /// canonicalization of addresses takes place here.  Use [AcmeIdentifier::dns] or [AcmeIdentifier::ip] for that.
    ///
    /// Only the type is required.  An empty value is kept, since CAs may send one for their own identifier types.
    pub fn new<S1: Into<String>, S2: Into<String>>(identifier_type: S1, value: S2) -> Result<Self> {
        let identifier_type = identifier_type.into();
        let value = value.into();

        if identifier_type.is_empty() {
            return Err(Error::invalid_argument("identifier type is required"));
        }

        Ok(match identifier_type.as_str() {
            TYPE_DNS => Self::Dns(value),
            TYPE_IP => Self::Ip(value),
            _ => Self::Other { identifier_type, value },
        })
    }

    /// Creates a DNS identifier.  Unicode domains are ASCII encoded.
    pub fn dns(domain: &str) -> Result<Self> {
        if domain.trim().is_empty() {
            return Err(Error::invalid_argument("domain is required"));
        }
        Ok(Self::Dns(to_ace(domain)?))
    }

    /// Creates an IP identifier from an address.
    pub fn ip_addr(ip: IpAddr) -> Self {
        Self::Ip(host_address(&ip))
    }

    /// Creates an IP identifier from an IPv4 or IPv6 address literal.
    pub fn ip(ip: &str) -> Result<Self> {
        Ok(Self::ip_addr(parse_ip(ip)?))
    }

    /// Creates an identifier of any type from a JSON object with `type` and `value` fields.
    pub fn from_json(json: &Json) -> Result<Self> {
        let value = json.get(KEY_VALUE).as_string()?;
        let identifier_type = json.get(KEY_TYPE).as_string()?;
        Self::new(identifier_type, value)
    }

    /// Creates a DNS identifier from a JSON object, failing if the object is not a `dns` identifier.
    pub fn dns_from_json(json: &Json) -> Result<Self> {
        let identifier = Self::dns(&json.get(KEY_VALUE).as_string()?)?;
        expect_type(json, TYPE_DNS)?;
        Ok(identifier)
    }

    /// Creates an IP identifier from a JSON object, failing if the object is not an `ip` identifier.
    pub fn ip_from_json(json: &Json) -> Result<Self> {
        let identifier = Self::ip(&json.get(KEY_VALUE).as_string()?)?;
        expect_type(json, TYPE_IP)?;
        Ok(identifier)
    }

    pub fn identifier_type(&self) -> &str {
        match self {
            Self::Dns(_) => TYPE_DNS,
            Self::Ip(_) => TYPE_IP,
            Self::Other { identifier_type, .. } => identifier_type.as_str(),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Dns(value) | Self::Ip(value) | Self::Other { value, .. } => value.as_str(),
        }
    }

    /// Returns the domain name of a `dns` identifier.  Unicode domains are ASCII encoded.
    ///
    /// Like equality, this looks at the identifier type rather than the variant, so a hand-built
    /// `Other { identifier_type: "dns", .. }` answers the same as the equal `Dns` value.
    pub fn domain(&self) -> Option<&str> {
        if self.identifier_type() == TYPE_DNS {
            Some(self.value())
        } else {
            None
        }
    }

    /// Returns the address of an `ip` identifier, or `None` for other identifier types.
    ///
    /// This fails only if the identifier holds a value that is not an address, which can happen only if it was
    /// not created with [AcmeIdentifier::ip] or [AcmeIdentifier::ip_addr].
    pub fn to_ip(&self) -> Result<Option<IpAddr>> {
        if self.identifier_type() != TYPE_IP {
            return Ok(None);
        }

        match parse_ip(self.value()) {
            Ok(ip) => Ok(Some(ip)),
            Err(Error::HostResolution(value, err)) => Err(Error::bad_ip_value(value, err)),
            Err(err) => Err(err),
        }
    }

    /// Returns the identifier as a JSON map with `type` and `value` fields, in that order.
    pub fn to_map(&self) -> Map<String, Value> {
        JsonBuilder::new()
            .put(KEY_TYPE, self.identifier_type())
            .put(KEY_VALUE, self.value())
            .to_map()
    }
}

fn expect_type(json: &Json, expected: &str) -> Result<()> {
    let found = json.get(KEY_TYPE).as_string()?;
    if found == expected {
        Ok(())
    } else {
        debug!("Expected {:?} identifier, but found {:?}", expected, found);
        Err(Error::protocol_mismatch(found))
    }
}

impl PartialEq for AcmeIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.identifier_type() == other.identifier_type() && self.value() == other.value()
    }
}

impl Eq for AcmeIdentifier {}

impl Hash for AcmeIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier_type().hash(state);
        self.value().hash(state);
    }
}

impl Display for AcmeIdentifier {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}={}", self.identifier_type(), self.value())
    }
}

impl From<IpAddr> for AcmeIdentifier {
    fn from(ip: IpAddr) -> Self {
        Self::ip_addr(ip)
    }
}

impl From<Ipv4Addr> for AcmeIdentifier {
    fn from(ip: Ipv4Addr) -> Self {
        Self::ip_addr(IpAddr::V4(ip))
    }
}

impl From<Ipv6Addr> for AcmeIdentifier {
    fn from(ip: Ipv6Addr) -> Self {
        Self::ip_addr(IpAddr::V6(ip))
    }
}

/// Wire form of an identifier.
#[derive(Serialize, Deserialize)]
struct RawIdentifier {
    /// This is named `type` in RFC 8555; it is renamed here to avoid conflict with the Rust `type` keyword.
    #[serde(rename="type")]
    identifier_type: String,

    value: String,
}

impl TryFrom<RawIdentifier> for AcmeIdentifier {
    type Error = Error;

    fn try_from(raw: RawIdentifier) -> Result<Self> {
        Self::new(raw.identifier_type, raw.value)
    }
}

impl From<AcmeIdentifier> for RawIdentifier {
    fn from(identifier: AcmeIdentifier) -> Self {
        match identifier {
            AcmeIdentifier::Dns(value) => Self { identifier_type: TYPE_DNS.to_string(), value },
            AcmeIdentifier::Ip(value) => Self { identifier_type: TYPE_IP.to_string(), value },
            AcmeIdentifier::Other { identifier_type, value } => Self { identifier_type, value },
        }
    }
}
