use pathminder_core::{
    Capacity, Character, ContainerSpec, Encumbrance, ItemArena, ItemId, ItemSpec,
};

fn barrel(arena: &mut ItemArena) -> ItemId {
    arena
        .insert_container(ContainerSpec::new(
            ItemSpec::new("Barrel", 30.0, 10.0, 200.0),
            Capacity::new(f32::INFINITY, 10.0, usize::MAX),
            true,
        ))
        .expect("barrel spec is valid")
}

fn gold_coin(arena: &mut ItemArena) -> ItemId {
    arena
        .insert_item(ItemSpec::new("Gold coin", 0.02, 0.0, 100.0))
        .expect("coin spec is valid")
}

#[test]
fn empty_handed_character_is_lightly_encumbered() {
    let mut arena = ItemArena::new();
    let character = Character::with_stats(&mut arena, "Steve", 12, 30).unwrap();
    assert!(character.inventory_items(&arena).unwrap().is_empty());
    assert_eq!(character.encumbrance(&arena).unwrap(), Encumbrance::Light);
    assert_eq!(character.speed(&arena).unwrap(), 30);
}

#[test]
fn picking_up_never_reaches_unbearable() {
    let mut arena = ItemArena::new();
    let character = Character::with_stats(&mut arena, "Steve", 12, 30).unwrap();

    let mut picked = 0;
    loop {
        let next = barrel(&mut arena);
        if !character.pick(&mut arena, next).unwrap() {
            assert!(!arena.is_contained(next).unwrap());
            break;
        }
        picked += 1;
        assert_ne!(
            character.encumbrance(&arena).unwrap(),
            Encumbrance::Unbearable,
            "picking items must not reach the sentinel tier"
        );
    }

    // Heavy load at strength 12 is 130 lb: four 30 lb barrels.
    assert_eq!(picked, 4);
    assert_eq!(character.encumbrance(&arena).unwrap(), Encumbrance::Heavy);
    assert_eq!(character.speed(&arena).unwrap(), 20);
}

#[test]
fn pick_has_and_drop_delegate_to_inventory() {
    let mut arena = ItemArena::new();
    let character = Character::with_stats(&mut arena, "Steve", 12, 30).unwrap();
    let coins: Vec<ItemId> = (0..10).map(|_| gold_coin(&mut arena)).collect();

    for &coin in &coins {
        assert!(character.pick(&mut arena, coin).unwrap());
    }
    assert_eq!(character.inventory_items(&arena).unwrap(), coins);
    for &coin in &coins {
        assert!(character.has(&arena, coin).unwrap());
    }
    assert!(character.has_all(&arena, &coins).unwrap());

    for &coin in &coins {
        assert!(character.drop(&mut arena, coin).unwrap());
    }
    assert!(character.inventory_items(&arena).unwrap().is_empty());
    assert!(!character.has_all(&arena, &coins).unwrap());
}

#[test]
fn items_inside_carried_containers_count_as_carried() {
    let mut arena = ItemArena::new();
    let character = Character::new(&mut arena, "Steve").unwrap();
    let keg = barrel(&mut arena);
    let coin = gold_coin(&mut arena);
    arena.add(keg, coin).unwrap();

    assert!(character.pick(&mut arena, keg).unwrap());
    assert!(character.has(&arena, coin).unwrap());
    assert!(character.drop(&mut arena, coin).unwrap());
    assert!(character.has(&arena, keg).unwrap());
    assert!(!arena.is_contained(coin).unwrap());
}

#[test]
fn take_from_moves_between_containers() {
    let mut arena = ItemArena::new();
    let character = Character::with_stats(&mut arena, "Steve", 10, 30).unwrap();
    let chest = arena.insert_group("Chest").unwrap();
    let coin = gold_coin(&mut arena);
    let heavy = barrel(&mut arena);
    let anvil = arena
        .insert_item(ItemSpec::new("Anvil", 90.0, 1.0, 500.0))
        .unwrap();
    arena.add_all(chest, &[coin, heavy, anvil]).unwrap();

    assert!(character.take_from(&mut arena, chest, coin).unwrap());
    assert!(character.has(&arena, coin).unwrap());
    assert!(!arena.contains(chest, coin).unwrap());

    // 30 lb barrel plus a 90 lb anvil exceed the 100 lb heavy load at strength 10.
    assert!(character.take_from(&mut arena, chest, heavy).unwrap());
    assert!(!character.take_from(&mut arena, chest, anvil).unwrap());
    assert!(arena.contains(chest, anvil).unwrap());

    // Rearranging inside the inventory does not change the carried weight.
    let root = character.inventory().id();
    assert!(arena.move_item(root, coin, heavy).unwrap());
    let carried = character.inventory().weight(&arena).unwrap();
    assert!(character.take_from(&mut arena, heavy, coin).unwrap());
    assert_eq!(arena.children(root).unwrap(), &[heavy, coin]);
    assert_eq!(character.inventory().weight(&arena).unwrap(), carried);
    assert!(!character.take_from(&mut arena, root, coin).unwrap());
}
