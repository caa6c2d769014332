//! Plugin registry.
//!
//! Translates declarative `{name: options}` entries from configuration into
//! live plugin instances subscribed to the event bus. Resolution is an
//! explicit constructor map: unknown names fail with
//! [`PluginError::Unknown`] instead of any dynamic lookup.

use std::collections::HashMap;

use tracing::{debug, error, info};

use crate::context::BotContext;
use crate::plugin::{Plugin, PluginCtor, PluginError};

/// Registry mapping configuration keys to plugin constructors, plus the
/// plugins it has loaded.
#[derive(Default)]
pub struct PluginRegistry {
    ctors: HashMap<String, PluginCtor>,
    loaded: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor under a configuration key.
    ///
    /// A later registration for the same key replaces the earlier one.
    pub fn register(&mut self, name: impl Into<String>, ctor: PluginCtor) -> &mut Self {
        self.ctors.insert(name.into(), ctor);
        self
    }

    /// Returns true when a constructor is registered for `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// Loads a single plugin by name.
    ///
    /// Constructs it from its options, then runs its `load` hook with the
    /// runtime context so it can subscribe to bus events.
    pub async fn load(
        &mut self,
        name: &str,
        options: &serde_json::Value,
        ctx: BotContext,
    ) -> Result<(), PluginError> {
        let ctor = *self
            .ctors
            .get(name)
            .ok_or_else(|| PluginError::Unknown(name.to_string()))?;

        let mut plugin = ctor(options)?;
        plugin.load(ctx).await?;
        info!(plugin = name, "Plugin loaded");
        self.loaded.push(plugin);
        Ok(())
    }

    /// Loads every configured plugin, in configuration iteration order.
    ///
    /// Partial-failure semantics: a failing plugin is logged and does not
    /// prevent the remaining plugins from loading. Returns the number of
    /// plugins that loaded successfully.
    pub async fn load_all(
        &mut self,
        entries: &serde_json::Map<String, serde_json::Value>,
        ctx: BotContext,
    ) -> usize {
        let mut count = 0;
        for (name, options) in entries {
            match self.load(name, options, ctx.clone()).await {
                Ok(()) => count += 1,
                Err(e) => error!(plugin = %name, error = %e, "Failed to load plugin"),
            }
        }
        count
    }

    /// Unloads every loaded plugin, in load order.
    pub async fn unload_all(&mut self) {
        for mut plugin in self.loaded.drain(..) {
            debug!(plugin = plugin.name(), "Unloading plugin");
            plugin.unload().await;
        }
    }

    /// Returns the number of successfully loaded plugins.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("registered", &self.ctors.keys().collect::<Vec<_>>())
            .field("loaded", &self.loaded.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockTransport, settings_with_token};

    use std::sync::Arc;

    use async_trait::async_trait;

    fn test_context() -> BotContext {
        BotContext::new(settings_with_token(), Arc::new(MockTransport::new()))
    }

    struct Quiet(&'static str);

    #[async_trait]
    impl Plugin for Quiet {
        fn name(&self) -> &str {
            self.0
        }

        async fn load(&mut self, _ctx: BotContext) -> Result<(), PluginError> {
            Ok(())
        }
    }

    struct FailsToLoad;

    #[async_trait]
    impl Plugin for FailsToLoad {
        fn name(&self) -> &str {
            "broken"
        }

        async fn load(&mut self, _ctx: BotContext) -> Result<(), PluginError> {
            Err(PluginError::load("broken", "refused to start"))
        }
    }

    fn entries(json: &str) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::from_str(json).unwrap() {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn unknown_plugin_name_fails() {
        let mut registry = PluginRegistry::new();
        assert!(!registry.is_registered("ghost"));
        let err = registry
            .load("ghost", &serde_json::json!({}), test_context())
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::Unknown(name) if name == "ghost"));
        assert_eq!(registry.loaded_count(), 0);
    }

    #[tokio::test]
    async fn one_failing_plugin_does_not_block_others() {
        let mut registry = PluginRegistry::new();
        registry.register("first", |_| Ok(Box::new(Quiet("first"))));
        registry.register("broken", |_| Ok(Box::new(FailsToLoad)));
        registry.register("last", |_| Ok(Box::new(Quiet("last"))));
        assert!(registry.is_registered("broken"));

        let loaded = registry
            .load_all(
                &entries(r#"{"first": {}, "broken": {}, "last": {}}"#),
                test_context(),
            )
            .await;

        assert_eq!(loaded, 2);
        assert_eq!(registry.loaded_count(), 2);
    }

    #[tokio::test]
    async fn unregistered_entries_do_not_block_others() {
        let mut registry = PluginRegistry::new();
        registry.register("known", |_| Ok(Box::new(Quiet("known"))));

        let loaded = registry
            .load_all(
                &entries(r#"{"mystery": {}, "known": {}}"#),
                test_context(),
            )
            .await;

        assert_eq!(loaded, 1);
    }

    #[tokio::test]
    async fn constructor_receives_its_options() {
        struct Configured;

        #[async_trait]
        impl Plugin for Configured {
            fn name(&self) -> &str {
                "configured"
            }

            async fn load(&mut self, _ctx: BotContext) -> Result<(), PluginError> {
                Ok(())
            }
        }

        fn ctor(options: &serde_json::Value) -> Result<Box<dyn Plugin>, PluginError> {
            let greeting = options
                .get("greeting")
                .and_then(|v| v.as_str())
                .ok_or_else(|| PluginError::invalid_options("configured", "missing greeting"))?;
            assert_eq!(greeting, "hi");
            Ok(Box::new(Configured))
        }

        let mut registry = PluginRegistry::new();
        registry.register("configured", ctor);

        registry
            .load("configured", &serde_json::json!({"greeting": "hi"}), test_context())
            .await
            .unwrap();

        let err = registry
            .load("configured", &serde_json::json!({}), test_context())
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::InvalidOptions { .. }));
    }
}
