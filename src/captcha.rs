//! CAPTCHA provider adapters.
//!
//! Each supported provider is wrapped behind the same [`CaptchaWidget`]
//! interface: a script to load, a container element to render, and snippets
//! for resetting or removing the widget on the host page. Adding a provider
//! means implementing the trait, not touching the renderer.

use crate::html::{Element, Node};
use crate::types::CaptchaProvider;

/// Uniform interface over the supported CAPTCHA providers
pub trait CaptchaWidget: Send + Sync {
    /// The provider this adapter serves
    fn provider(&self) -> CaptchaProvider;

    /// URL of the provider's widget script
    fn script_url(&self) -> &'static str;

    /// Script tag loading the provider's widget, async and deferred
    fn load(&self) -> Node {
        Element::new("script")
            .attr("src", self.script_url())
            .flag("async")
            .flag("defer")
            .into()
    }

    /// Container element the provider script hydrates into its widget
    fn render(&self, container_id: &str, site_key: &str) -> Node;

    /// JS snippet resetting the widget after a failed submission
    fn reset_snippet(&self) -> &'static str;

    /// JS snippet tearing the widget down
    fn remove_snippet(&self) -> &'static str;
}

struct Turnstile;

impl CaptchaWidget for Turnstile {
    fn provider(&self) -> CaptchaProvider {
        CaptchaProvider::Turnstile
    }

    fn script_url(&self) -> &'static str {
        "https://challenges.cloudflare.com/turnstile/v0/api.js"
    }

    fn render(&self, container_id: &str, site_key: &str) -> Node {
        Element::new("div")
            .attr("id", container_id)
            .class("cf-turnstile")
            .attr("data-sitekey", site_key)
            .into()
    }

    fn reset_snippet(&self) -> &'static str {
        "window.turnstile && window.turnstile.reset()"
    }

    fn remove_snippet(&self) -> &'static str {
        "window.turnstile && window.turnstile.remove()"
    }
}

struct Hcaptcha;

impl CaptchaWidget for Hcaptcha {
    fn provider(&self) -> CaptchaProvider {
        CaptchaProvider::Hcaptcha
    }

    fn script_url(&self) -> &'static str {
        "https://js.hcaptcha.com/1/api.js"
    }

    fn render(&self, container_id: &str, site_key: &str) -> Node {
        Element::new("div")
            .attr("id", container_id)
            .class("h-captcha")
            .attr("data-sitekey", site_key)
            .into()
    }

    fn reset_snippet(&self) -> &'static str {
        "window.hcaptcha && window.hcaptcha.reset()"
    }

    fn remove_snippet(&self) -> &'static str {
        "window.hcaptcha && window.hcaptcha.remove()"
    }
}

struct Recaptcha;

impl CaptchaWidget for Recaptcha {
    fn provider(&self) -> CaptchaProvider {
        CaptchaProvider::Recaptcha
    }

    fn script_url(&self) -> &'static str {
        "https://www.google.com/recaptcha/api.js"
    }

    fn render(&self, container_id: &str, site_key: &str) -> Node {
        Element::new("div")
            .attr("id", container_id)
            .class("g-recaptcha")
            .attr("data-sitekey", site_key)
            .into()
    }

    fn reset_snippet(&self) -> &'static str {
        "window.grecaptcha && window.grecaptcha.reset()"
    }

    fn remove_snippet(&self) -> &'static str {
        "window.grecaptcha && window.grecaptcha.reset()"
    }
}

/// Adapter for a provider
pub fn adapter(provider: CaptchaProvider) -> &'static dyn CaptchaWidget {
    match provider {
        CaptchaProvider::Turnstile => &Turnstile,
        CaptchaProvider::Hcaptcha => &Hcaptcha,
        CaptchaProvider::Recaptcha => &Recaptcha,
    }
}
