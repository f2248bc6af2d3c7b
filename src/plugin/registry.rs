use crate::error::{Result, SearchError};
use crate::plugin::{SearchPlugin, SearchPluginConfiguration};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Builds plugins of one plugin type from their configuration
pub trait PluginFactory: Send + Sync {
    fn create(&self, configuration: &SearchPluginConfiguration) -> Result<Box<dyn SearchPlugin>>;
}

/// Plugin factories keyed by plugin type
#[derive(Default, Clone)]
pub struct PluginFactoryRegistry {
    factories: BTreeMap<String, Arc<dyn PluginFactory>>,
}

impl PluginFactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, returning the one it replaces
    pub fn register(
        &mut self,
        plugin_type: impl Into<String>,
        factory: impl PluginFactory + 'static,
    ) -> Option<Arc<dyn PluginFactory>> {
        self.factories.insert(plugin_type.into(), Arc::new(factory))
    }

    pub fn get(&self, plugin_type: &str) -> Option<&dyn PluginFactory> {
        self.factories.get(plugin_type).map(|f| f.as_ref())
    }

    pub fn contains(&self, plugin_type: &str) -> bool {
        self.factories.contains_key(plugin_type)
    }

    /// Registered plugin types, sorted
    pub fn plugin_types(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Create a plugin with the factory registered for the configuration's type
    pub fn create(&self, configuration: &SearchPluginConfiguration) -> Result<Box<dyn SearchPlugin>> {
        let factory = self
            .get(&configuration.plugin_type)
            .ok_or_else(|| SearchError::UnknownPluginType(configuration.plugin_type.clone()))?;

        let plugin = factory.create(configuration)?;
        info!(
            plugin_type = %configuration.plugin_type,
            name = %configuration.name,
            "created search plugin"
        );
        Ok(plugin)
    }
}

impl fmt::Debug for PluginFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginFactoryRegistry")
            .field("plugin_types", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{SearchContext, SearchResults};
    use std::time::Duration;

    struct EmptyPlugin;

    impl SearchPlugin for EmptyPlugin {
        fn fetch(&self, _context: &SearchContext, _n: i64) -> Result<SearchResults> {
            Ok(SearchResults {
                total_hits: 0,
                took: Duration::ZERO,
                hits: Vec::new(),
            })
        }
    }

    struct EmptyFactory;

    impl PluginFactory for EmptyFactory {
        fn create(&self, _configuration: &SearchPluginConfiguration) -> Result<Box<dyn SearchPlugin>> {
            Ok(Box::new(EmptyPlugin))
        }
    }

    struct FailingFactory;

    impl PluginFactory for FailingFactory {
        fn create(&self, _configuration: &SearchPluginConfiguration) -> Result<Box<dyn SearchPlugin>> {
            Err(SearchError::config("missing settings"))
        }
    }

    #[test]
    fn test_create_registered_type() {
        let mut registry = PluginFactoryRegistry::new();
        assert!(registry.register("empty", EmptyFactory).is_none());

        let config = SearchPluginConfiguration::new("1", "Empty", "empty");
        let plugin = registry.create(&config).unwrap();
        let results = plugin.fetch(&SearchContext::new(), 10).unwrap();
        assert_eq!(results.total_hits, 0);
    }

    #[test]
    fn test_unknown_type() {
        let registry = PluginFactoryRegistry::new();
        let config = SearchPluginConfiguration::new("1", "Nope", "elasticsearch");
        let err = registry.create(&config).err().unwrap();
        assert!(matches!(err, SearchError::UnknownPluginType(ref t) if t == "elasticsearch"));
    }

    #[test]
    fn test_factory_errors_propagate() {
        let mut registry = PluginFactoryRegistry::new();
        registry.register("broken", FailingFactory);
        let config = SearchPluginConfiguration::new("1", "Broken", "broken");
        assert!(matches!(registry.create(&config), Err(SearchError::Config(_))));
    }

    #[test]
    fn test_register_replaces_and_lists() {
        let mut registry = PluginFactoryRegistry::new();
        registry.register("b", EmptyFactory);
        registry.register("a", EmptyFactory);
        assert!(registry.register("a", FailingFactory).is_some());
        assert_eq!(registry.plugin_types().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(registry.contains("b"));
        assert!(registry.get("c").is_none());
        assert!(format!("{registry:?}").contains("\"a\""));
    }
}
