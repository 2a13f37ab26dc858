use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use concierge_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use concierge_domain::{Model, ProviderConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    /// Model name to provider index, from `[providers.routing]`.
    explicit_model_routing: HashMap<String, usize>,
    default_kind: ProviderKind,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, config: &ProviderConfig) -> Self {
        let mut explicit_model_routing = HashMap::new();

        for (model_name, provider_name) in &config.routing {
            let Some(target_kind) = ProviderKind::from_name(provider_name) else {
                warn!(model = %model_name, provider = %provider_name, "Unknown provider in routing, ignored");
                continue;
            };

            if let Some(idx) = providers.iter().position(|p| p.kind() == target_kind) {
                explicit_model_routing.insert(model_name.clone(), idx);
            }
        }

        let default_kind = config
            .default
            .as_deref()
            .and_then(ProviderKind::from_name)
            .unwrap_or_default();

        Self {
            providers,
            explicit_model_routing,
            default_kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve the provider for a model.
    ///
    /// 1. explicit `[providers.routing]` entry
    /// 2. the provider matching `[providers].default`
    /// 3. the first registered provider
    /// 4. no providers: `ModelNotAvailable`
    fn resolve_provider(&self, model: &Model) -> Result<&dyn ProviderAdapter, GatewayError> {
        if let Some(&idx) = self.explicit_model_routing.get(model.as_str()) {
            return Ok(self.providers[idx].as_ref());
        }

        if let Some(p) = self
            .providers
            .iter()
            .find(|p| p.kind() == self.default_kind)
        {
            return Ok(p.as_ref());
        }

        self.providers
            .first()
            .map(|p| p.as_ref())
            .ok_or(GatewayError::ModelNotAvailable(
                "No providers available".to_string(),
            ))
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let provider = self.resolve_provider(model)?;
        debug!(%model, provider = %provider.kind(), "Routing session");
        provider
            .create_session_with_system_prompt(model, system_prompt)
            .await
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        let mut all_models = Vec::new();
        for provider in &self.providers {
            if let Ok(models) = provider.available_models().await {
                all_models.extend(models);
            }
        }
        Ok(all_models)
    }
}
