use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Client counters, one registry per client so concurrent clients never mix numbers.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Auth metrics
    pub auth_requests: IntCounter,
    pub auth_failures: IntCounter,

    // Cache metrics
    pub token_cache_hits: IntCounter,
    pub token_cache_misses: IntCounter,

    // Retry metrics
    pub invalid_token_retries: IntCounter,
    pub transport_retries: IntCounter,

    // Domain call metrics
    pub domain_requests: IntCounterVec,
    pub domain_failures: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("areship".into()), None)?;

        let metrics = Self {
            auth_requests: IntCounter::new("auth_requests_total", "Token exchange calls")?,
            auth_failures: IntCounter::new("auth_failures_total", "Failed token exchange calls")?,
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Tokens adopted from the durable cache")?,
            token_cache_misses: IntCounter::new("token_cache_misses_total", "Durable cache lookups without a usable token")?,
            invalid_token_retries: IntCounter::new("invalid_token_retries_total", "Calls retried after the upstream rejected the token")?,
            transport_retries: IntCounter::new("transport_retries_total", "Requests re-sent after a transport failure")?,
            domain_requests: IntCounterVec::new(Opts::new("domain_requests_total", "Domain calls by path"), &["path"])?,
            domain_failures: IntCounterVec::new(Opts::new("domain_failures_total", "Failed domain calls by path and reason"), &["path", "reason"])?,
            registry,
        };

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.auth_requests.clone()))?;
        reg.register(Box::new(metrics.auth_failures.clone()))?;
        reg.register(Box::new(metrics.token_cache_hits.clone()))?;
        reg.register(Box::new(metrics.token_cache_misses.clone()))?;
        reg.register(Box::new(metrics.invalid_token_retries.clone()))?;
        reg.register(Box::new(metrics.transport_retries.clone()))?;
        reg.register(Box::new(metrics.domain_requests.clone()))?;
        reg.register(Box::new(metrics.domain_failures.clone()))?;

        Ok(metrics)
    }

    /// Prometheus text exposition of every counter.
    pub fn encode(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
