use minidns_application::ports::DnsResolver;
use minidns_application::use_cases::HandleDnsQueryUseCase;
use minidns_domain::Config;
use minidns_infrastructure::dns::{ForwardingResolver, InternalResolver};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub resolver: Arc<dyn DnsResolver>,
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver = Self::build_resolver(config).await?;
        info!(resolver = resolver.name(), "DNS resolver selected");

        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(resolver.clone()));

        Ok(Self {
            resolver,
            handler_use_case,
        })
    }

    /// Forwarding when an upstream is configured, otherwise the stub.
    async fn build_resolver(config: &Config) -> anyhow::Result<Arc<dyn DnsResolver>> {
        match &config.resolver.upstream {
            Some(upstream) => {
                let resolver =
                    ForwardingResolver::connect(upstream, config.resolver.timeout()).await?;
                Ok(Arc::new(resolver))
            }
            None => {
                info!(
                    address = %config.resolver.internal_address,
                    ttl = config.resolver.internal_ttl,
                    "No upstream configured, answering locally"
                );
                Ok(Arc::new(InternalResolver::from_config(&config.resolver)))
            }
        }
    }
}
