//! Built-in tool implementations for tickerchat.
//!
//! Tools give the agent the ability to answer questions it cannot answer
//! from conversation alone. Today that is one capability: screening the
//! stock market by predefined criteria.

pub mod screener;

use tickerchat_core::tool::ToolRegistry;

/// Create a default tool registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(screener::SimpleScreenerTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_screener() {
        let registry = default_registry();
        assert!(registry.get("simple_screener").is_some());
    }
}
