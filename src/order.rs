use std::collections::HashSet;
use serde::{self, Serialize, Deserialize};
use crate::{
    error::Result,
    identifier::AcmeIdentifier,
};

/// ACMEv02 order request.
/// This holds the information described in [RFC 8555 §7.4](https://tools.ietf.org/html/rfc8555#section-7.4).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcmeOrderRequest {
    /// An array of identifiers the client is requesting certificates for.
    pub identifiers: Vec<AcmeIdentifier>,

    /// The requested value of the `notBefore` field in the certificate in
    /// [RFC 3339](https://tools.ietf.org/html/rfc3339) format.
    #[serde(rename="notBefore", default, skip_serializing_if="Option::is_none")]
    pub not_before: Option<String>,

    /// The requested value of the `notAfter` field in the certificate in
    /// [RFC 3339](https://tools.ietf.org/html/rfc3339) format.
    #[serde(rename="notAfter", default, skip_serializing_if="Option::is_none")]
    pub not_after: Option<String>,
}

impl AcmeOrderRequest {
    /// Creates a request for the given identifiers, without a requested validity window.
    ///
    /// Identifiers that compare equal to an earlier one are dropped; the order of the rest is kept.
    pub fn for_identifiers<I>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = AcmeIdentifier>
    {
        let mut seen = HashSet::new();
        let identifiers = identifiers.into_iter().filter(|id| seen.insert(id.clone())).collect();
        Self { identifiers, not_before: None, not_after: None }
    }

    /// Creates a request for DNS identifiers.  Unicode domains are ASCII encoded; the first domain that cannot be
    /// encoded fails the whole request.
    pub fn for_domains<S: AsRef<str>>(domains: &[S]) -> Result<Self> {
        let identifiers = domains.iter()
            .map(|domain| AcmeIdentifier::dns(domain.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::for_identifiers(identifiers))
    }

    /// Requests a certificate validity window.  Both timestamps are in [RFC 3339](https://tools.ietf.org/html/rfc3339)
    /// format and are passed to the server as given.
    pub fn with_validity<S1: Into<String>, S2: Into<String>>(mut self, not_before: S1, not_after: S2) -> Self {
        self.not_before = Some(not_before.into());
        self.not_after = Some(not_after.into());
        self
    }

    /// Returns the requested identifiers of the given type, e.g. [crate::TYPE_DNS].
    pub fn identifiers_of_type<'a>(&'a self, identifier_type: &'a str) -> impl Iterator<Item = &'a AcmeIdentifier> + 'a {
        self.identifiers.iter().filter(move |id| id.identifier_type() == identifier_type)
    }
}
