//! Remote method names, their scope and the HTTP verb they use.
//!
//! HelpSpot methods are dotted identifiers such as `private.request.update`.
//! Callers may write them with underscores instead (`private_request_update`);
//! [`MethodName::parse`] turns either form into the wire form.

use std::fmt;

use reqwest::Method;

use crate::error::HelpSpotError;

/// Wire-form names of the methods that change server-side state and must be
/// sent as POST. Every other method is a GET.
pub const MUTATING_METHODS: &[&str] = &[
    "request.create",
    "request.update",
    "forums.createTopic",
    "forums.createPost",
    "private.request.create",
    "private.request.update",
    "private.request.addTimeEvent",
    "private.request.deleteTimeEvent",
    "private.request.merge",
    "private.request.unsubscribe",
];

/// Namespace segment that marks a method as requiring staff credentials.
const PRIVATE_NAMESPACE: &str = "private";

/// Whether a method is part of the public or the private (authenticated) API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Anonymous methods; no `Authorization` header is sent.
    Public,
    /// Staff methods; sent with HTTP Basic authorization.
    Private,
}

impl Scope {
    /// Returns true if calls in this scope carry credentials.
    pub fn requires_auth(self) -> bool {
        matches!(self, Scope::Private)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Public => f.write_str("public"),
            Scope::Private => f.write_str("private"),
        }
    }
}

/// The HTTP verb a method is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in a form-encoded body.
    Post,
}

impl HttpVerb {
    /// Looks up the verb for a wire-form name in [`MUTATING_METHODS`].
    pub fn for_method(wire_name: &str) -> Self {
        if MUTATING_METHODS.contains(&wire_name) {
            HttpVerb::Post
        } else {
            HttpVerb::Get
        }
    }

    /// The matching reqwest method.
    pub fn as_method(self) -> Method {
        match self {
            HttpVerb::Get => Method::GET,
            HttpVerb::Post => Method::POST,
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpVerb::Get => f.write_str("GET"),
            HttpVerb::Post => f.write_str("POST"),
        }
    }
}

/// A remote method name in wire form, with its derived scope and verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodName {
    wire: String,
    scope: Scope,
    verb: HttpVerb,
}

impl MethodName {
    /// Parses a caller-facing or wire-form method name.
    ///
    /// Every underscore becomes a dot. Whitespace around the name is ignored.
    ///
    /// # Errors
    ///
    /// Returns `HelpSpotError::Validation` if the name is empty.
    pub fn parse(name: &str) -> Result<Self, HelpSpotError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HelpSpotError::validation("method name must not be empty"));
        }

        let wire = name.replace('_', ".");
        // The namespace must be followed by an action: a bare `private` is public.
        let scope = match wire.split_once('.') {
            Some((PRIVATE_NAMESPACE, _)) => Scope::Private,
            _ => Scope::Public,
        };
        let verb = HttpVerb::for_method(&wire);

        Ok(Self { wire, scope, verb })
    }

    /// The dotted name sent to HelpSpot.
    pub fn wire(&self) -> &str {
        &self.wire
    }

    /// The dot-separated namespace segments, e.g. `["private", "version"]`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.wire.split('.')
    }

    /// Private when the wire name starts with `private.`, public otherwise.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// GET or POST, from the mutating method catalog.
    pub fn verb(&self) -> HttpVerb {
        self.verb
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscores_become_dots() {
        let name = MethodName::parse("private_request_update").unwrap();
        assert_eq!(name.wire(), "private.request.update");
        assert_eq!(
            name.segments().collect::<Vec<_>>(),
            vec!["private", "request", "update"]
        );
    }

    #[test]
    fn test_dotted_names_are_kept() {
        let name = MethodName::parse("forums.createTopic").unwrap();
        assert_eq!(name.wire(), "forums.createTopic");
        assert_eq!(name.verb(), HttpVerb::Post);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            MethodName::parse(""),
            Err(HelpSpotError::Validation(_))
        ));
        assert!(MethodName::parse("   ").is_err());
    }

    #[test]
    fn test_every_mutating_method_is_post() {
        for wire in MUTATING_METHODS {
            let caller_form = wire.replace('.', "_");
            let name = MethodName::parse(&caller_form).unwrap();
            assert_eq!(name.verb(), HttpVerb::Post, "{} should be POST", wire);
        }
    }

    #[test]
    fn test_other_methods_are_get() {
        for caller_form in [
            "version",
            "private_version",
            "request_getCategories",
            "private_request_get",
            "forums_list",
            "private_customer_getPasswordByEmail",
            "made_up_method",
        ] {
            let name = MethodName::parse(caller_form).unwrap();
            assert_eq!(name.verb(), HttpVerb::Get, "{} should be GET", caller_form);
        }
    }

    #[test]
    fn test_scope_from_first_segment() {
        assert_eq!(MethodName::parse("private_version").unwrap().scope(), Scope::Private);
        assert_eq!(MethodName::parse("version").unwrap().scope(), Scope::Public);
        assert_eq!(MethodName::parse("request_create").unwrap().scope(), Scope::Public);
        // Only the first segment counts.
        assert_eq!(MethodName::parse("request_private").unwrap().scope(), Scope::Public);
        assert_eq!(MethodName::parse("privateer_version").unwrap().scope(), Scope::Public);
        // A bare "private" names no method inside the namespace.
        assert_eq!(MethodName::parse("private").unwrap().scope(), Scope::Public);
        assert_eq!(MethodName::parse("private.").unwrap().scope(), Scope::Private);
    }

    #[test]
    fn test_verb_maps_to_reqwest_method() {
        assert_eq!(HttpVerb::Get.as_method(), Method::GET);
        assert_eq!(HttpVerb::Post.as_method(), Method::POST);
        assert_eq!(HttpVerb::Post.to_string(), "POST");
    }
}
