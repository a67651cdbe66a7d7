//! Resolution dispatcher
//!
//! This is the entry point called for every intercepted request: parse the
//! URL, fold the host, look up the site, and run its path rules until one
//! produces a destination.

use crate::registry::{builtin_registry, Registry};
use crate::search::first_extracted;
use crate::types::{Redirect, Request};
use crate::url::{lookup_host, parse};

/// Error type for resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid request URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: ::url::ParseError,
    },
}

/// Resolves requests against one registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r Registry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Resolve a request.
    ///
    /// `Ok(None)` means no rule applies and the request should proceed
    /// unmodified. Only an unparsable URL is an error.
    pub fn resolve(&self, request: &Request<'_>) -> Result<Option<Redirect>, ResolveError> {
        let url = parse(request.url).map_err(|source| ResolveError::InvalidUrl {
            url: request.url.to_string(),
            source,
        })?;

        let host = lookup_host(&url);
        let Some(site) = self.registry.lookup(&host) else {
            log::trace!("No site for host {}", host);
            return Ok(None);
        };

        match first_extracted(site.rules(), &url) {
            Some((rule, destination)) => {
                log::debug!(
                    "Resolved {} via {}{} [{}] -> {}",
                    request.url,
                    site.host(),
                    rule.path(),
                    rule.extractor(),
                    destination
                );
                Ok(Some(Redirect::new(destination)))
            }
            None => {
                log::trace!("No rule of {} produced a destination for {}", site.host(), url.path());
                Ok(None)
            }
        }
    }
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Self::new(builtin_registry())
    }
}

/// Resolve a request against the built-in registry.
pub fn resolve(request: &Request<'_>) -> Result<Option<Redirect>, ResolveError> {
    Resolver::default().resolve(request)
}

/// Resolve a raw URL against the built-in registry.
pub fn resolve_url(url: &str) -> Result<Option<Redirect>, ResolveError> {
    resolve(&Request::new(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extractor;
    use crate::host::FoldList;
    use crate::registry::{PathRule, Site};

    fn redirect(url: &str) -> Option<String> {
        resolve_url(url).unwrap().map(|r| r.redirect_url)
    }

    #[test]
    fn test_facebook() {
        assert_eq!(
            redirect("https://l.facebook.com/l.php?u=https%3A%2F%2Fexample.com").as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_tumblr() {
        assert_eq!(
            redirect("https://t.umblr.com/redirect?z=https://example.com&x=1").as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_curseforge_decodes_once() {
        assert_eq!(
            redirect("https://wow.curseforge.com/linkout?remoteUrl=http%253a%252f%252fi.imgur.com%252f1AjSgEH.png")
                .as_deref(),
            Some("http%3a%2f%2fi.imgur.com%2f1AjSgEH.png")
        );
    }

    #[test]
    fn test_google_fallback_keys() {
        assert_eq!(redirect("https://www.google.com/url?q=https://example.com").as_deref(), Some("https://example.com"));
        assert_eq!(redirect("https://www.google.com/url?url=https://example.com").as_deref(), Some("https://example.com"));
        assert_eq!(
            redirect("https://www.google.com/imgres?imgrefurl=https://example.com").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            redirect("https://www.google.co.jp/imgres?imgurl=https://a.test/i.png&imgrefurl=https://example.com")
                .as_deref(),
            Some("https://a.test/i.png")
        );
        assert_eq!(redirect("https://www.google.com/search?q=rust"), None);
    }

    #[test]
    fn test_unknown_host() {
        assert_eq!(redirect("https://unknownsite.example/foo?url=https://example.com"), None);
    }

    #[test]
    fn test_disqus_strips_from_last_colon() {
        assert_eq!(redirect("https://disq.us/url?url=https://example.com:1234").as_deref(), Some("https://example.com"));
        assert_eq!(
            redirect("https://disq.us/url?url=https%3A%2F%2Fexample.com%2Fa%3AxYz").as_deref(),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn test_mozaws_last_segment() {
        assert_eq!(
            redirect("https://outgoing.prod.mozaws.net/v1/08aa30/https%3A%2F%2Fdeveloper.mozilla.org%2Fen-US").as_deref(),
            Some("https://developer.mozilla.org/en-US")
        );
        assert_eq!(redirect("https://outgoing.prod.mozaws.net/v1/"), None);
    }

    #[test]
    fn test_every_builtin_site() {
        let cases = [
            ("https://www.digidip.net/visit?url=https://example.com", "https://example.com"),
            ("https://console.ebsta.com/linktracking/track.aspx?trackid=1&linkuri=https%3A%2F%2Fexample.com", "https://example.com"),
            ("https://exit.sc/?url=https://example.com", "https://example.com"),
            ("https://gate.sc/?url=http%3A%2F%2Ffanlink.to%2FPartial7&token=10fd54", "http://fanlink.to/Partial7"),
            ("https://news.url.google.com/url?url=https://example.com", "https://example.com"),
            ("https://plus.url.google.com/url?url=https://example.com", "https://example.com"),
            ("https://l.instagram.com/?u=https://example.com", "https://example.com"),
            ("https://www.javlibrary.com/en/redirect.php?url=https://example.com", "https://example.com"),
            ("https://l.messenger.com/l.php?u=https://example.com", "https://example.com"),
            ("https://gcc01.safelinks.protection.outlook.com/?url=https%3A%2F%2Fwww.metro.tokyo.lg.jp%2Fenglish%2Findex.html", "https://www.metro.tokyo.lg.jp/english/index.html"),
            ("https://slack-redir.net/link?url=https://example.com", "https://example.com"),
            ("https://steamcommunity.com/linkfilter/?url=https://example.com", "https://example.com"),
            ("https://twitter.com/i/redirect?url=https://example.com", "https://example.com"),
            ("https://vk.com/away.php?to=https://example.com", "https://example.com"),
            ("https://workable.com/nr?l=https://example.com", "https://example.com"),
            ("https://www.youtube.com/redirect?q=https://example.com", "https://example.com"),
        ];
        for (input, expected) in cases {
            assert_eq!(redirect(input).as_deref(), Some(expected), "{}", input);
        }
    }

    #[test]
    fn test_missing_param_is_no_match() {
        assert_eq!(redirect("https://l.facebook.com/l.php?h=abc"), None);
        assert_eq!(redirect("https://l.facebook.com/l.php?u="), None);
        assert_eq!(redirect("https://l.facebook.com/other?u=https://example.com"), None);
    }

    #[test]
    fn test_bare_folded_domain_is_not_registered() {
        assert_eq!(redirect("https://curseforge.com/linkout?remoteUrl=https://example.com"), None);
        assert_eq!(redirect("https://evilcurseforge.com/linkout?remoteUrl=https://example.com"), None);
    }

    #[test]
    fn test_explicit_port_is_part_of_host() {
        assert_eq!(redirect("https://vk.com:8443/away.php?to=https://example.com"), None);
        assert_eq!(redirect("https://vk.com:443/away.php?to=https://example.com").as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_resolved_destination_is_idempotent() {
        let first = redirect("https://l.facebook.com/l.php?u=https%3A%2F%2Fexample.com").unwrap();
        assert_eq!(redirect(&first), None);

        let nested = redirect("https://www.google.com/url?q=https%3A%2F%2Ft.umblr.com%2Fredirect%3Fz%3Dhttps%3A%2F%2Fexample.com").unwrap();
        assert_eq!(nested, "https://t.umblr.com/redirect?z=https://example.com");
        assert_eq!(redirect(&nested).as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_invalid_url_is_error() {
        let err = resolve_url("not a url").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidUrl { ref url, .. } if url == "not a url"));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_custom_registry() {
        let registry = Registry::new(
            vec![Site::new(
                "go.test",
                vec![
                    PathRule::new("/a", Extractor::param("x")),
                    PathRule::new("/", Extractor::param("y")),
                ],
            )],
            FoldList::new(Vec::<String>::new()),
        );
        let resolver = Resolver::new(&registry);
        let got = resolver.resolve(&Request::new("https://go.test/a?y=fallback")).unwrap();
        assert_eq!(got, Some(Redirect::new("fallback")));
        let got = resolver.resolve(&Request::new("https://l.facebook.com/l.php?u=x")).unwrap();
        assert_eq!(got, None);
    }
}
