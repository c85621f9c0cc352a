//! Blocking GET executor with an optional read-through cache.
//!
//! # Design
//! One `ureq::Agent` per session; the agent is configured with
//! `http_status_as_error(false)` so non-2xx responses come back as data and
//! status interpretation stays in this crate. In cached mode, successful
//! bodies are written through to the [`ResponseCache`] keyed by method and
//! URL; the store owns TTL filtering. `close()` moves the transport into a
//! terminal state — any later request fails with `Error::SessionClosed`.

use log::debug;
use serde_json::Value;

use crate::cache::ResponseCache;
use crate::error::{Error, Result};

pub(crate) enum Transport {
    Direct(ureq::Agent),
    Cached {
        agent: ureq::Agent,
        store: ResponseCache,
    },
    Closed,
}

impl Transport {
    pub fn direct() -> Self {
        Transport::Direct(new_agent())
    }

    pub fn cached(store: ResponseCache) -> Self {
        Transport::Cached {
            agent: new_agent(),
            store,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Transport::Cached { .. })
    }

    /// Issue a GET and decode the body as JSON, consulting the cache first
    /// when one is configured.
    pub fn get(&self, url: &str) -> Result<Value> {
        match self {
            Transport::Closed => Err(Error::SessionClosed),
            Transport::Direct(agent) => decode(&fetch(agent, url)?),
            Transport::Cached { agent, store } => {
                let key = format!("GET|{url}");
                if let Some(body) = store.lookup(&key)? {
                    debug!("cache hit: {url}");
                    return decode(&body);
                }
                debug!("cache miss: {url}");
                let body = fetch(agent, url)?;
                let payload = decode(&body)?;
                store.store(&key, &body)?;
                Ok(payload)
            }
        }
    }

    /// Release the agent's connection pool and the cache handle.
    /// Idempotent.
    pub fn close(&mut self) {
        *self = Transport::Closed;
    }
}

fn new_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn fetch(agent: &ureq::Agent, url: &str) -> Result<String> {
    debug!("GET {url}");
    let mut response = agent.get(url).call()?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;
    if !(200..300).contains(&status) {
        return Err(Error::Http { status, body });
    }
    Ok(body)
}

fn decode(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| Error::Json(e.to_string()))
}
