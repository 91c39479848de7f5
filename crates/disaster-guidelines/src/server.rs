use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use guidelines_common::error::StoreError;
use guidelines_common::mcp_api::{DisasterTypesResponse, GetGuidelinesParams, GuidelinesResponse};
use guidelines_common::store::GuidelineStore;

#[derive(Clone)]
pub struct DisasterGuidelinesServer {
    store: Arc<GuidelineStore>,
    tool_router: ToolRouter<DisasterGuidelinesServer>,
}

impl DisasterGuidelinesServer {
    pub fn new(store: GuidelineStore) -> Self {
        Self {
            store: Arc::new(store),
            tool_router: Self::tool_router(),
        }
    }

    /// Runs a store read on the blocking pool and flattens both failure layers into a tool error.
    async fn with_store<T, F>(&self, op: F) -> Result<T, String>
    where
        T: Send + 'static,
        F: FnOnce(&GuidelineStore) -> Result<T, StoreError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| format!("lookup task failed: {e}"))?
            .map_err(|e| {
                warn!(error = %e, path = %e.path().display(), "guideline store unavailable");
                format!("lookup failed: {e}")
            })
    }
}

#[tool_router]
impl DisasterGuidelinesServer {
    #[tool(description = "Get official guidelines for a disaster type (e.g. 'flood', 'earthquake'). \
                          The key is matched exactly; unknown types return a fallback message.")]
    async fn get_guidelines(
        &self,
        Parameters(params): Parameters<GetGuidelinesParams>,
    ) -> Result<Json<GuidelinesResponse>, String> {
        let disaster_type = params.disaster_type;
        let key = disaster_type.clone();
        let lookup = self.with_store(move |store| store.lookup(&key)).await?;
        let found = lookup.is_found();
        info!(disaster_type = %disaster_type, found, "get_guidelines");

        Ok(Json(GuidelinesResponse {
            disaster_type,
            found,
            guidelines: lookup.into_value(),
        }))
    }

    #[tool(description = "List the disaster types that have official guidelines.")]
    async fn list_disaster_types(&self) -> Result<Json<DisasterTypesResponse>, String> {
        let disaster_types = self.with_store(|store| store.disaster_types()).await?;
        Ok(Json(DisasterTypesResponse {
            count: disaster_types.len(),
            disaster_types,
        }))
    }
}

#[tool_handler]
impl ServerHandler for DisasterGuidelinesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "disaster-guidelines".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Disaster Guidelines MCP server. Provides official preparedness and response \
                 guidelines keyed by disaster type. Use list_disaster_types to discover keys and \
                 get_guidelines to fetch the guidelines for one of them."
                    .to_string(),
            ),
        }
    }
}
