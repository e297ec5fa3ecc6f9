//! Capability declaration for execution contexts.

use crate::config::RuntimeConfig;
use crate::synthesis::SynthesizedDocument;
use serde::{Deserialize, Serialize};

/// Network access granted to a context
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkPolicy {
    /// No network access at all.
    #[default]
    Deny,
    /// Only the listed resource URLs may be fetched.
    AllowList(Vec<String>),
}

/// A single granted capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ScriptExecution,
    ChannelMessaging,
    Network(Vec<String>),
}

/// The complete, fixed grant for one context.
///
/// There is deliberately no way to add anything else: the context never shares an
/// origin with the host, so it cannot reach host state except through the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    network: NetworkPolicy,
}

impl CapabilitySet {
    /// Capabilities for a synthesized document: network is only granted, and only to
    /// the runtime allowlist, when the document loads runtime resources.
    #[must_use]
    pub fn for_document(document: &SynthesizedDocument, runtime: &RuntimeConfig) -> Self {
        let network = if document.needs_runtime_resources() {
            NetworkPolicy::AllowList(runtime.allowlist().iter().map(|s| s.to_string()).collect())
        } else {
            NetworkPolicy::Deny
        };
        Self { network }
    }

    pub fn network_policy(&self) -> &NetworkPolicy {
        &self.network
    }

    /// Everything granted, in declaration order
    pub fn capabilities(&self) -> Vec<Capability> {
        let mut granted = vec![Capability::ScriptExecution, Capability::ChannelMessaging];
        if let NetworkPolicy::AllowList(urls) = &self.network {
            granted.push(Capability::Network(urls.clone()));
        }
        granted
    }

    /// Value of an iframe `sandbox` attribute.
    ///
    /// Only scripts are enabled; `postMessage` to the parent needs no token, and
    /// leaving out `allow-same-origin` keeps the frame on an opaque origin.
    pub fn sandbox_attribute(&self) -> &'static str {
        "allow-scripts"
    }

    /// Content Security Policy restricting fetches to the allowlist
    pub fn content_security_policy(&self) -> String {
        match &self.network {
            NetworkPolicy::Deny => {
                "default-src 'none'; script-src 'unsafe-inline'; style-src 'unsafe-inline'; img-src data:"
                    .to_string()
            }
            NetworkPolicy::AllowList(urls) => format!(
                "default-src 'none'; script-src 'unsafe-inline' 'unsafe-eval' {}; style-src 'unsafe-inline'; img-src data:",
                urls.join(" ")
            ),
        }
    }
}
