//! Tool registry for managing available tools

use crate::config::TransportConfig;
use crate::error::{Result, ToolError};
use crate::tools::Tool;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of named tools, kept in registration order
///
/// Built once at startup and shared read-only afterwards.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new, empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in tool
    pub fn with_builtin_tools(transport: &TransportConfig) -> Result<Self> {
        use crate::tools::builtin::*;

        let http = transport.build_client()?;
        let mut registry = Self::new();

        registry.register(Arc::new(WikipediaTool::new(http.clone())))?;
        registry.register(Arc::new(CalculatorTool::new()))?;
        registry.register(Arc::new(UnitConverterTool::new()))?;
        registry.register(Arc::new(WebSearchTool::new(http.clone())))?;
        registry.register(Arc::new(FetchUrlTool::new(http)))?;
        registry.register(Arc::new(NowTool::new()))?;

        Ok(registry)
    }

    /// Register a tool; names must be unique
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::Duplicate { name }.into());
        }

        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Builder-style registration
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Result<Self> {
        self.register(tool)?;
        Ok(self)
    }

    /// Look up a tool by exact, case-sensitive name
    pub fn resolve(&self, name: &str) -> Option<&dyn Tool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Whether a tool with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// List tool names in registration order
    pub fn list_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get tool name and description
    pub fn get_tool_info(&self, name: &str) -> Option<(&str, &str)> {
        self.resolve(name).map(|tool| (tool.name(), tool.description()))
    }

    /// Iterate over tools in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list_names())
            .finish()
    }
}
