//! Item catalog: named templates that stamp out fresh items.
//!
//! The core never knows about coins, barrels or backpacks. The catalog turns a template
//! name into a new free-standing item in an [`ItemArena`].

use pathminder_core::{
    Capacity, ContainerError, ContainerSpec, ErrorSeverity, GameError, ItemArena, ItemId,
    ItemSpec,
};

/// Container part of a template. Limits left as `None` are unbounded.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerTemplate {
    pub max_weight: Option<f32>,
    pub max_volume: Option<f32>,
    pub max_count: Option<usize>,
    pub rigid: bool,
}

impl ContainerTemplate {
    pub fn capacity(&self) -> Capacity {
        Capacity::new(
            self.max_weight.unwrap_or(f32::INFINITY),
            self.max_volume.unwrap_or(f32::INFINITY),
            self.max_count.unwrap_or(usize::MAX),
        )
    }
}

/// Description of one kind of item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub name: String,
    pub weight: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub volume: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub container: Option<ContainerTemplate>,
}

impl ItemTemplate {
    pub fn spec(&self) -> ItemSpec {
        ItemSpec::new(self.name.clone(), self.weight, self.volume, self.cost)
    }

    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }

    /// Creates a new free-standing item from this template.
    pub fn instantiate(&self, arena: &mut ItemArena) -> Result<ItemId, ContainerError> {
        match &self.container {
            None => arena.insert_item(self.spec()),
            Some(container) => arena.insert_container(ContainerSpec::new(
                self.spec(),
                container.capacity(),
                container.rigid,
            )),
        }
    }
}

/// Errors raised while spawning items from a catalog.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// No template carries the requested name.
    #[error("no item template named '{name}'")]
    UnknownTemplate {
        /// Requested name.
        name: String,
    },

    /// The template describes an item the arena rejects.
    #[error(transparent)]
    Container(#[from] ContainerError),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownTemplate { .. } => ErrorSeverity::Validation,
            Self::Container(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTemplate { .. } => "CATALOG_UNKNOWN_TEMPLATE",
            Self::Container(error) => error.error_code(),
        }
    }
}

/// Ordered collection of item templates, looked up by name (case-insensitive).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCatalog {
    pub items: Vec<ItemTemplate>,
}

impl ItemCatalog {
    pub fn new(items: Vec<ItemTemplate>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn template(&self, name: &str) -> Option<&ItemTemplate> {
        self.items
            .iter()
            .find(|template| template.name.eq_ignore_ascii_case(name))
    }

    /// Names that appear more than once, ignoring case.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (index, template) in self.items.iter().enumerate() {
            let repeated = self.items[..index]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(&template.name));
            if repeated
                && !duplicates
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(&template.name))
            {
                duplicates.push(&template.name);
            }
        }
        duplicates
    }

    /// Creates a new item from the template called `name`.
    pub fn spawn(&self, arena: &mut ItemArena, name: &str) -> Result<ItemId, CatalogError> {
        let template = self
            .template(name)
            .ok_or_else(|| CatalogError::UnknownTemplate {
                name: name.to_string(),
            })?;
        let id = template.instantiate(arena)?;
        tracing::debug!("spawned {} as {}", template.name, id);
        Ok(id)
    }

    /// Creates `count` items from the same template.
    pub fn spawn_many(
        &self,
        arena: &mut ItemArena,
        name: &str,
        count: usize,
    ) -> Result<Vec<ItemId>, CatalogError> {
        (0..count).map(|_| self.spawn(arena, name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog::new(vec![
            ItemTemplate {
                name: "Torch".to_string(),
                weight: 1.0,
                volume: 0.1,
                cost: 1.0,
                container: None,
            },
            ItemTemplate {
                name: "Chest".to_string(),
                weight: 25.0,
                volume: 4.0,
                cost: 200.0,
                container: Some(ContainerTemplate {
                    max_volume: Some(4.0),
                    rigid: true,
                    ..ContainerTemplate::default()
                }),
            },
        ])
    }

    #[test]
    fn spawns_plain_items_and_containers() {
        let catalog = catalog();
        let mut arena = ItemArena::new();

        let torch = catalog.spawn(&mut arena, "torch").unwrap();
        let chest = catalog.spawn(&mut arena, "Chest").unwrap();

        assert!(!arena.get(torch).unwrap().is_container());
        let capacity = arena.get(chest).unwrap().capacity().unwrap();
        assert_eq!(capacity.max_volume, 4.0);
        assert_eq!(capacity.max_weight, f32::INFINITY);
        assert_eq!(arena.volume(chest).unwrap(), 4.0);
    }

    #[test]
    fn unknown_and_invalid_templates_fail() {
        let mut catalog = catalog();
        let mut arena = ItemArena::new();

        let missing = catalog.spawn(&mut arena, "Lantern").unwrap_err();
        assert_eq!(missing.error_code(), "CATALOG_UNKNOWN_TEMPLATE");

        catalog.items[0].weight = -1.0;
        let invalid = catalog.spawn(&mut arena, "Torch").unwrap_err();
        assert!(matches!(
            invalid,
            CatalogError::Container(ContainerError::InvalidMeasure { field: "weight", .. })
        ));
        assert!(arena.is_empty());
    }

    #[test]
    fn detects_duplicate_names() {
        let mut catalog = catalog();
        assert!(catalog.duplicate_names().is_empty());
        catalog.items.push(catalog.items[0].clone());
        catalog.items.push(catalog.items[0].clone());
        assert_eq!(catalog.duplicate_names(), vec!["Torch"]);
    }
}
