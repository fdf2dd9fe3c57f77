//! Item storage and containment operations.

use super::iter::{Signature, Subtree, SubtreeCursor};
use super::{Capacity, Container, ContainerError, ContainerSpec, FitViolation};
use crate::config::PackConfig;
use crate::item::{Item, ItemId, ItemSpec};

/// Owner of every item and container, addressed by [`ItemId`].
///
/// All containment operations go through the arena. Queries over a subtree (`contains`,
/// `size`, `weight`) are recursive scans; nothing is cached.
#[derive(Clone, Debug, Default)]
pub struct ItemArena {
    items: Vec<Item>,
    /// Monotonic change sequence shared by every container in the arena.
    revision: u64,
}

impl ItemArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items ever created in this arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ===== construction =====

    /// Creates a free-standing plain item.
    pub fn insert_item(&mut self, spec: ItemSpec) -> Result<ItemId, ContainerError> {
        validate_spec(&spec, None)?;
        self.push(Item::plain(spec))
    }

    /// Creates a free-standing, empty container.
    pub fn insert_container(&mut self, spec: ContainerSpec) -> Result<ItemId, ContainerError> {
        validate_spec(&spec.item, Some(&spec.capacity))?;
        let container = Container::new(spec.capacity, spec.rigid);
        self.push(Item::with_container(spec.item, container))
    }

    /// Creates a free-standing item group: a container without limits.
    pub fn insert_group(&mut self, name: impl Into<String>) -> Result<ItemId, ContainerError> {
        let spec = ContainerSpec::group(name);
        self.push(Item::with_container(
            spec.item,
            Container::new(spec.capacity, spec.rigid),
        ))
    }

    /// Handle the next pushed item will receive.
    fn next_id(&self) -> Result<ItemId, ContainerError> {
        handle_for(self.items.len())
    }

    fn push(&mut self, item: Item) -> Result<ItemId, ContainerError> {
        let id = self.next_id()?;
        self.items.push(item);
        Ok(id)
    }

    // ===== lookup =====

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    fn item(&self, id: ItemId) -> Result<&Item, ContainerError> {
        self.get(id).ok_or_else(|| ContainerError::unknown(id))
    }

    fn container(&self, id: ItemId) -> Result<&Container, ContainerError> {
        self.item(id)?
            .as_container()
            .ok_or_else(|| ContainerError::not_a_container(id))
    }

    fn container_mut(&mut self, id: ItemId) -> Result<&mut Container, ContainerError> {
        self.items
            .get_mut(id.index())
            .ok_or_else(|| ContainerError::unknown(id))?
            .as_container_mut()
            .ok_or_else(|| ContainerError::not_a_container(id))
    }

    /// Direct children of a container, in insertion order.
    pub fn children(&self, container: ItemId) -> Result<&[ItemId], ContainerError> {
        Ok(self.container(container)?.children())
    }

    pub fn is_contained(&self, item: ItemId) -> Result<bool, ContainerError> {
        Ok(self.item(item)?.is_contained())
    }

    // ===== measures =====

    /// Own weight plus the weight of everything held inside, recursively.
    pub fn weight(&self, id: ItemId) -> Result<f32, ContainerError> {
        let item = self.item(id)?;
        Ok(item.own_weight() + self.contents_weight_of(item, None))
    }

    /// Observable volume.
    ///
    /// Plain items report their own volume. A rigid container always reports its
    /// `max_volume`; a flexible one reports the sum of its direct children's volumes.
    pub fn volume(&self, id: ItemId) -> Result<f32, ContainerError> {
        Ok(self.volume_of(self.item(id)?, None))
    }

    /// Combined weight of an arbitrary collection of items.
    pub fn total_weight(
        &self,
        items: impl IntoIterator<Item = ItemId>,
    ) -> Result<f32, ContainerError> {
        items
            .into_iter()
            .try_fold(0.0, |total, id| Ok(total + self.weight(id)?))
    }

    /// Weight of a container's contents, excluding the container itself.
    pub fn contents_weight(&self, container: ItemId) -> Result<f32, ContainerError> {
        let container = self.container(container)?;
        Ok(self.sum_weights(container.children(), None))
    }

    /// Volume taken up by a container's direct children.
    pub fn contents_volume(&self, container: ItemId) -> Result<f32, ContainerError> {
        let container = self.container(container)?;
        Ok(self.sum_volumes(container.children(), None))
    }

    // The private measures below skip `excluded` wherever it appears in the subtree, which
    // yields the measures the tree would have once that item is detached.

    fn contents_weight_of(&self, item: &Item, excluded: Option<ItemId>) -> f32 {
        item.as_container().map_or(0.0, |container| {
            self.sum_weights(container.children(), excluded)
        })
    }

    fn volume_of(&self, item: &Item, excluded: Option<ItemId>) -> f32 {
        match item.as_container() {
            None => item.own_volume(),
            Some(container) if container.is_rigid() => container.capacity().max_volume,
            Some(container) => self.sum_volumes(container.children(), excluded),
        }
    }

    fn sum_weights(&self, children: &[ItemId], excluded: Option<ItemId>) -> f32 {
        children
            .iter()
            .filter(|&&child| Some(child) != excluded)
            .map(|&child| {
                let item = &self.items[child.index()];
                item.own_weight() + self.contents_weight_of(item, excluded)
            })
            .sum()
    }

    fn sum_volumes(&self, children: &[ItemId], excluded: Option<ItemId>) -> f32 {
        children
            .iter()
            .filter(|&&child| Some(child) != excluded)
            .map(|&child| self.volume_of(&self.items[child.index()], excluded))
            .sum()
    }

    /// Current direct load of `container`, as if `excluded` were not in its subtree.
    fn load_of(&self, container: &Container, excluded: Option<ItemId>) -> Load {
        let children = container.children();
        Load {
            count: children
                .iter()
                .filter(|&&child| Some(child) != excluded)
                .count(),
            weight: self.sum_weights(children, excluded),
            volume: self.sum_volumes(children, excluded),
        }
    }

    // ===== subtree queries =====

    /// True if `item` appears anywhere below `container`.
    ///
    /// A container never contains itself. Unknown handles are simply not found.
    pub fn contains(&self, container: ItemId, item: ItemId) -> Result<bool, ContainerError> {
        Ok(self.subtree_contains(self.container(container)?, item))
    }

    pub fn contains_all(
        &self,
        container: ItemId,
        items: &[ItemId],
    ) -> Result<bool, ContainerError> {
        let container = self.container(container)?;
        Ok(items
            .iter()
            .all(|&item| self.subtree_contains(container, item)))
    }

    /// Number of items below `container`, each counted once.
    pub fn size(&self, container: ItemId) -> Result<usize, ContainerError> {
        Ok(self.subtree_size(self.container(container)?))
    }

    /// True if the container has no direct children.
    pub fn is_empty_container(&self, container: ItemId) -> Result<bool, ContainerError> {
        Ok(self.container(container)?.children().is_empty())
    }

    fn subtree_contains(&self, container: &Container, item: ItemId) -> bool {
        container.children().iter().any(|&child| {
            child == item
                || self.items[child.index()]
                    .as_container()
                    .is_some_and(|inner| self.subtree_contains(inner, item))
        })
    }

    fn subtree_size(&self, container: &Container) -> usize {
        container
            .children()
            .iter()
            .map(|&child| {
                1 + self.items[child.index()]
                    .as_container()
                    .map_or(0, |inner| self.subtree_size(inner))
            })
            .sum()
    }

    /// Finds the container in `root`'s subtree that lists `item` as a direct child.
    ///
    /// Direct children of `root` are checked before descending.
    fn holder_of(&self, root: ItemId, item: ItemId) -> Option<ItemId> {
        let container = self.items[root.index()].as_container()?;
        if container.holds_directly(item) {
            return Some(root);
        }
        container
            .children()
            .iter()
            .filter(|&&child| self.items[child.index()].is_container())
            .find_map(|&child| self.holder_of(child, item))
    }

    /// Aggregate modification signature of the subtree rooted at `container`.
    pub fn signature(&self, container: ItemId) -> Result<Signature, ContainerError> {
        Ok(self.signature_of(self.container(container)?))
    }

    fn signature_of(&self, container: &Container) -> Signature {
        container
            .children()
            .iter()
            .filter_map(|&child| self.items[child.index()].as_container())
            .map(|inner| self.signature_of(inner))
            .fold(
                Signature {
                    changes: container.modification_count(),
                    latest: container.stamp(),
                },
                |acc, inner| Signature {
                    changes: acc.changes + inner.changes,
                    latest: acc.latest.max(inner.latest),
                },
            )
    }

    // ===== traversal =====

    /// Borrowing pre-order iterator over everything below `container`.
    pub fn iter(&self, container: ItemId) -> Result<Subtree<'_>, ContainerError> {
        Ok(Subtree::new(self, self.container(container)?.children()))
    }

    /// Fail-fast cursor over everything below `container`.
    pub fn cursor(&self, container: ItemId) -> Result<SubtreeCursor, ContainerError> {
        Ok(SubtreeCursor::new(container, self.signature(container)?))
    }

    // ===== fit checks =====

    /// Returns true if `candidate` could be inserted into `container` right now.
    ///
    /// For a free-standing candidate, `fits == true` guarantees that a following
    /// [`add`](Self::add) succeeds.
    pub fn fits(&self, container: ItemId, candidate: ItemId) -> Result<bool, ContainerError> {
        Ok(self.fit_violation(container, candidate)?.is_none())
    }

    /// Explains why `candidate` cannot be inserted into `container`, if it cannot.
    pub fn fit_violation(
        &self,
        container: ItemId,
        candidate: ItemId,
    ) -> Result<Option<FitViolation>, ContainerError> {
        self.fit_violation_excluding(container, candidate, None)
    }

    /// Fit check against the load `container` would carry once `excluded` leaves its
    /// subtree. Used when relocating an item that may already sit below `container`.
    fn fit_violation_excluding(
        &self,
        container: ItemId,
        candidate: ItemId,
        excluded: Option<ItemId>,
    ) -> Result<Option<FitViolation>, ContainerError> {
        let item = self.item(candidate)?;
        let target = self.container(container)?;

        let violation = self.violation_for(
            container,
            candidate,
            item,
            target.capacity(),
            self.load_of(target, excluded),
        );
        if let Some(violation) = violation {
            tracing::trace!("{} does not fit into {}: {}", candidate, container, violation);
        }
        Ok(violation)
    }

    /// Checks one candidate against `capacity` given the load already present.
    fn violation_for(
        &self,
        container: ItemId,
        candidate: ItemId,
        item: &Item,
        capacity: Capacity,
        load: Load,
    ) -> Option<FitViolation> {
        if candidate == container {
            return Some(FitViolation::SelfInsertion);
        }
        if item
            .as_container()
            .is_some_and(|inner| self.subtree_contains(inner, container))
        {
            return Some(FitViolation::Cycle);
        }
        if load.count >= capacity.max_count {
            return Some(FitViolation::Count {
                max: capacity.max_count,
            });
        }
        let weight = load.weight + item.own_weight() + self.contents_weight_of(item, None);
        if weight > capacity.max_weight {
            return Some(FitViolation::Weight {
                max: capacity.max_weight,
                required: weight,
            });
        }
        let volume = load.volume + self.volume_of(item, None);
        if volume > capacity.max_volume {
            return Some(FitViolation::Volume {
                max: capacity.max_volume,
                required: volume,
            });
        }
        None
    }

    // ===== mutation =====

    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn attach(&mut self, container: ItemId, item: ItemId) -> Result<(), ContainerError> {
        let revision = self.next_revision();
        self.container_mut(container)?.push(item, revision);
        self.items[item.index()].set_contained(true);
        Ok(())
    }

    fn detach(&mut self, holder: ItemId, item: ItemId) -> Result<bool, ContainerError> {
        let revision = self.next_revision();
        Ok(self.container_mut(holder)?.take(item, revision))
    }

    /// Inserts a free-standing item as a direct child of `container`.
    ///
    /// Returns `Ok(false)` if the item is already held by some container or already lives
    /// in this subtree. Fails with [`ContainerError::DoesNotFit`] if the item does not fit,
    /// leaving everything untouched.
    pub fn add(&mut self, container: ItemId, item: ItemId) -> Result<bool, ContainerError> {
        let candidate = self.item(item)?;
        let target = self.container(container)?;
        if candidate.is_contained() || self.subtree_contains(target, item) {
            tracing::debug!("{} is already contained, not adding to {}", item, container);
            return Ok(false);
        }

        if let Some(violation) = self.fit_violation(container, item)? {
            return Err(ContainerError::DoesNotFit {
                container,
                item,
                violation,
            });
        }

        self.attach(container, item)?;
        tracing::debug!("added {} to {}", item, container);
        Ok(true)
    }

    /// Inserts every free-standing item in `items`, or none of them.
    ///
    /// Items that are already contained (or repeated in `items`) are skipped. If the
    /// remaining items together do not fit, fails with [`ContainerError::DoesNotFit`]
    /// naming the first item that tips the container over, and nothing is inserted.
    /// Returns `Ok(true)` if anything was inserted.
    pub fn add_all(&mut self, container: ItemId, items: &[ItemId]) -> Result<bool, ContainerError> {
        let target = self.container(container)?;
        let capacity = target.capacity();
        let mut load = self.load_of(target, None);

        let mut accepted: Vec<ItemId> = Vec::with_capacity(items.len());
        for &id in items {
            let item = self.item(id)?;
            if item.is_contained() || accepted.contains(&id) || self.subtree_contains(target, id)
            {
                continue;
            }
            if let Some(violation) = self.violation_for(container, id, item, capacity, load) {
                return Err(ContainerError::DoesNotFit {
                    container,
                    item: id,
                    violation,
                });
            }
            load = Load {
                count: load.count + 1,
                weight: load.weight + item.own_weight() + self.contents_weight_of(item, None),
                volume: load.volume + self.volume_of(item, None),
            };
            accepted.push(id);
        }

        for &id in &accepted {
            self.attach(container, id)?;
        }
        if !accepted.is_empty() {
            tracing::debug!("added {} items to {}", accepted.len(), container);
        }
        Ok(!accepted.is_empty())
    }

    /// Removes `item` from wherever it sits below `container`.
    ///
    /// Only the direct holder's modification counter changes. Returns `Ok(false)` if the
    /// item is not in the subtree.
    pub fn remove(&mut self, container: ItemId, item: ItemId) -> Result<bool, ContainerError> {
        self.item(item)?;
        self.container(container)?;

        let Some(holder) = self.holder_of(container, item) else {
            return Ok(false);
        };
        let removed = self.detach(holder, item)?;
        if removed {
            self.items[item.index()].set_contained(false);
            tracing::debug!("removed {} from {} (below {})", item, holder, container);
        }
        Ok(removed)
    }

    /// Removes each item present below `container`. Returns `Ok(true)` if anything changed.
    pub fn remove_all(
        &mut self,
        container: ItemId,
        items: &[ItemId],
    ) -> Result<bool, ContainerError> {
        self.container(container)?;
        for &id in items {
            self.item(id)?;
        }

        let mut changed = false;
        for &id in items {
            changed |= self.remove(container, id)?;
        }
        Ok(changed)
    }

    /// Moves `item` from somewhere below `source` directly into `destination`.
    ///
    /// The item is never observable as free-standing. Returns `Ok(false)` without changing
    /// anything if `source` does not contain the item, if `destination` already holds it
    /// directly, or if it does not fit into `destination`.
    pub fn move_item(
        &mut self,
        source: ItemId,
        item: ItemId,
        destination: ItemId,
    ) -> Result<bool, ContainerError> {
        self.item(item)?;
        self.container(source)?;
        self.container(destination)?;

        let Some(holder) = self.holder_of(source, item) else {
            return Ok(false);
        };
        if holder == destination
            || self
                .fit_violation_excluding(destination, item, Some(item))?
                .is_some()
        {
            return Ok(false);
        }

        self.detach(holder, item)?;
        self.attach(destination, item)?;
        tracing::debug!("moved {} from {} to {}", item, holder, destination);
        Ok(true)
    }

    /// Empties `container` into a new, free-standing pile and returns the pile.
    ///
    /// The container's counter increases once. Moved items stay contained, now by the pile.
    pub fn dump(&mut self, container: ItemId) -> Result<ItemId, ContainerError> {
        let name = format!(
            "{}{}",
            PackConfig::PILE_NAME_PREFIX,
            self.item(container)?.name()
        );
        self.container(container)?;
        // Fail before anything moves if the pile cannot get a handle.
        self.next_id()?;
        let revision = self.next_revision();
        let contents = self.container_mut(container)?.take_all(revision);
        let count = contents.len();

        let pile = self.push(Item::with_container(
            ItemSpec::new(name, 0.0, 0.0, 0.0),
            Container::with_children(Capacity::UNBOUNDED, contents),
        ))?;
        tracing::debug!("dumped {} items from {} into {}", count, container, pile);
        Ok(pile)
    }
}

/// What a container already holds directly.
#[derive(Clone, Copy, Debug)]
struct Load {
    count: usize,
    weight: f32,
    volume: f32,
}

fn handle_for(index: usize) -> Result<ItemId, ContainerError> {
    u32::try_from(index)
        .map(ItemId)
        .map_err(|_| ContainerError::ArenaFull)
}

fn validate_spec(spec: &ItemSpec, capacity: Option<&Capacity>) -> Result<(), ContainerError> {
    let invalid = spec
        .invalid_measure()
        .or_else(|| capacity.and_then(Capacity::invalid_limit));
    match invalid {
        Some((field, value)) => Err(ContainerError::InvalidMeasure {
            name: spec.name.clone(),
            field,
            value,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(arena: &mut ItemArena) -> ItemId {
        arena
            .insert_item(ItemSpec::new("Ball", 1.0, 0.5, 1.0))
            .unwrap()
    }

    fn boxed(arena: &mut ItemArena) -> ItemId {
        arena
            .insert_container(ContainerSpec::new(
                ItemSpec::new("Box", 1.0, 2.0, 1.0),
                Capacity::by_weight(10.0),
                false,
            ))
            .unwrap()
    }

    #[test]
    fn add_then_remove_restores_free_standing_state() {
        let mut arena = ItemArena::new();
        let container = boxed(&mut arena);
        let item = ball(&mut arena);

        assert!(arena.add(container, item).unwrap());
        assert!(arena.is_contained(item).unwrap());
        assert_eq!(arena.children(container).unwrap(), &[item]);

        assert!(arena.remove(container, item).unwrap());
        assert!(!arena.is_contained(item).unwrap());
        assert!(arena.is_empty_container(container).unwrap());
        assert_eq!(
            arena.get(container).unwrap().as_container().unwrap().modification_count(),
            2
        );
    }

    #[test]
    fn holder_search_prefers_direct_children() {
        let mut arena = ItemArena::new();
        let outer = boxed(&mut arena);
        let inner = boxed(&mut arena);
        let item = ball(&mut arena);
        arena.add(inner, item).unwrap();
        arena.add(outer, inner).unwrap();

        assert_eq!(arena.holder_of(outer, inner), Some(outer));
        assert_eq!(arena.holder_of(outer, item), Some(inner));
        assert_eq!(arena.holder_of(inner, outer), None);
    }

    #[test]
    fn plain_items_reject_container_operations() {
        let mut arena = ItemArena::new();
        let first = ball(&mut arena);
        let second = ball(&mut arena);

        assert_eq!(
            arena.add(first, second),
            Err(ContainerError::NotAContainer { item: first })
        );
        assert_eq!(
            arena.size(ItemId(99)),
            Err(ContainerError::UnknownItem { item: ItemId(99) })
        );
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut arena = ItemArena::new();
        let error = arena
            .insert_container(ContainerSpec::new(
                ItemSpec::new("Sack", 0.5, 0.0, 1.0),
                Capacity::new(f32::NAN, 1.0, 4),
                false,
            ))
            .unwrap_err();
        assert!(matches!(
            error,
            ContainerError::InvalidMeasure {
                field: "max_weight",
                ..
            }
        ));
        assert!(arena.is_empty());
    }

    #[test]
    fn handles_stop_at_the_addressable_limit() {
        assert_eq!(handle_for(0), Ok(ItemId(0)));
        assert_eq!(handle_for(u32::MAX as usize), Ok(ItemId(u32::MAX)));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            handle_for(u32::MAX as usize + 1),
            Err(ContainerError::ArenaFull)
        );
    }

    #[test]
    fn signature_tracks_detached_subtrees() {
        let mut arena = ItemArena::new();
        let outer = arena.insert_group("Outer").unwrap();
        let inner = arena.insert_group("Inner").unwrap();
        let item = ball(&mut arena);
        arena.add(inner, item).unwrap();
        arena.add(outer, inner).unwrap();

        let before = arena.signature(outer).unwrap();
        // Detaching `inner` adds one change to `outer` but takes `inner`'s change away.
        arena.remove(outer, inner).unwrap();
        let after = arena.signature(outer).unwrap();

        assert_eq!(before.changes, after.changes);
        assert!(after.latest > before.latest);
        assert_ne!(before, after);
    }
}
