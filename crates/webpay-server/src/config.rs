//! Server Configuration

/// Server configuration, resolved once at startup and injected into the
/// router. Business constants (supported method, manifest URL) live here
/// rather than as process-wide state.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Socket address to bind
    pub bind_addr: String,

    /// Directory served for the demo page
    pub static_dir: String,

    /// The only payment method the /buy endpoint accepts
    pub supported_method: String,

    /// Manifest URL advertised by the HEAD /test probe
    pub manifest_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            static_dir: "static".into(),
            supported_method: "https://android.com/pay".into(),
            manifest_url: "https://yanfii.github.io/test/bobpay/payment-manifest.json".into(),
        }
    }
}

impl ServerConfig {
    /// Resolve configuration from the environment, falling back to the demo
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            supported_method: defaults.supported_method,
            manifest_url: defaults.manifest_url,
        }
    }
}
