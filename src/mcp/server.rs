//! MCP Server handler for libraries.io.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use std::sync::Arc;

use crate::{
    mcp::{SearchParams, SubscriptionAction, SubscriptionParams},
    Arguments, LibrariesError, Outcome, RequestOptions, Search, SearchOperation, SearchQuery,
    Session, SessionBuilder, Subscribe,
};

/// libraries.io MCP Server.
///
/// Implements the MCP ServerHandler trait, providing tools to interact
/// with libraries.io through the Model Context Protocol.
///
/// # Tools
///
/// - `search` - Run any search operation (one page)
/// - `subscription` - List, check, add, update or remove subscriptions
#[derive(Clone)]
pub struct LibrariesServer {
    search: Arc<Search>,
    subscribe: Arc<Subscribe>,
}

impl LibrariesServer {
    /// Create a server configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `LIBRARIES_API_URL` is invalid.
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self::new(Search::from_env()?, Subscribe::from_env()?))
    }

    /// Create a server whose facades share one configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions cannot be built.
    pub fn with_builder(builder: SessionBuilder) -> crate::Result<Self> {
        let search = Search::with_session(builder.clone().build()?);
        let subscribe = Subscribe::with_session(builder.build()?);
        Ok(Self::new(search, subscribe))
    }

    /// Create a server from existing facades.
    pub fn new(search: Search, subscribe: Subscribe) -> Self {
        Self {
            search: Arc::new(search),
            subscribe: Arc::new(subscribe),
        }
    }

    /// Session used by the `search` tool.
    pub fn session(&self) -> &Session {
        self.search.session()
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Convert LibrariesError to McpError.
    fn to_mcp_error(err: LibrariesError) -> McpError {
        match &err {
            LibrariesError::Api { status: 404, message } => {
                McpError::resource_not_found(message.clone(), None)
            }
            e if e.is_configuration() => McpError::invalid_params(err.to_string(), None),
            _ => McpError::internal_error(err.to_string(), None),
        }
    }

    fn into_text(outcome: Outcome) -> Result<CallToolResult, McpError> {
        let response = outcome.into_result().map_err(Self::to_mcp_error)?;
        let result = serde_json::to_string_pretty(&response)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    /// Handle the `search` tool.
    ///
    /// # Errors
    ///
    /// Returns an MCP error if:
    /// - The operation, an argument name or a filter is unknown
    /// - A required argument is missing
    /// - The request fails
    pub async fn handle_search(&self, params: SearchParams) -> Result<CallToolResult, McpError> {
        let op: SearchOperation = params.operation.parse().map_err(Self::to_mcp_error)?;

        let mut arguments = Arguments::new();
        for (key, value) in params.arguments {
            arguments.insert(key.parse().map_err(Self::to_mcp_error)?, value);
        }

        let mut query = SearchQuery {
            q: params.q,
            sort: params.sort,
            ..Default::default()
        };
        for (filter, values) in params.filters {
            query.filters.entry(filter).or_default().extend(values);
        }

        let options = RequestOptions {
            page: params.page,
            per_page: params.per_page,
            ..Default::default()
        };

        let outcome = self
            .search
            .call(op, arguments, query, options)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::into_text(outcome)
    }

    fn target(params: &SubscriptionParams) -> Result<(&str, &str), McpError> {
        match (params.platform.as_deref(), params.project.as_deref()) {
            (Some(platform), Some(project)) => Ok((platform, project)),
            _ => Err(McpError::invalid_params(
                "platform and project are required for this action",
                None,
            )),
        }
    }

    /// Handle the `subscription` tool.
    async fn handle_subscription(
        &self,
        params: SubscriptionParams,
    ) -> Result<CallToolResult, McpError> {
        let outcome = match params.action {
            SubscriptionAction::List => {
                let options = RequestOptions {
                    page: params.page,
                    per_page: params.per_page,
                    ..Default::default()
                };
                self.subscribe.user_subscriptions(options).await
            }
            SubscriptionAction::Check => {
                let (platform, project) = Self::target(&params)?;
                let subscribed = self
                    .subscribe
                    .check_if_subscribed(platform, project)
                    .await
                    .map_err(Self::to_mcp_error)?;
                let result = serde_json::json!({ "subscribed": subscribed }).to_string();
                return Ok(CallToolResult::success(vec![Content::text(result)]));
            }
            SubscriptionAction::Subscribe => {
                let (platform, project) = Self::target(&params)?;
                self.subscribe
                    .subscribe(platform, project, params.include_prerelease)
                    .await
            }
            SubscriptionAction::Update => {
                let (platform, project) = Self::target(&params)?;
                self.subscribe
                    .update_subscription(platform, project, params.include_prerelease)
                    .await
            }
            SubscriptionAction::Unsubscribe => {
                let (platform, project) = Self::target(&params)?;
                self.subscribe.unsubscribe(platform, project).await
            }
        }
        .map_err(Self::to_mcp_error)?;

        Self::into_text(outcome)
    }
}

impl ServerHandler for LibrariesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "librariesio".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "libraries.io MCP Server - Search packages, repositories and users; manage release subscriptions."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "search",
                "Query libraries.io. Operations: platforms, project, project-dependencies, \
                 project-dependents, project-dependent-repositories, project-contributors, \
                 project-sourcerank, project-usage, project-search, repository, \
                 repository-dependencies, repository-projects, user, user-repositories, \
                 user-packages, user-packages-contributions, repository-contributions, \
                 user-dependencies. Returns one page.",
                Self::schema::<SearchParams>(),
            ),
            Tool::new(
                "subscription",
                "Manage release notifications: list, check, subscribe, update, unsubscribe. \
                 All actions except list need platform and project.",
                Self::schema::<SubscriptionParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        match request.name.as_ref() {
            "search" => {
                let params: SearchParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_search(params).await
            }
            "subscription" => {
                let params: SubscriptionParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_subscription(params).await
            }
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}
