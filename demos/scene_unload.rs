//! # Example: Lifecycle boundary clearing every subscription at once.

use std::sync::Arc;

use eventvisor::{EventRegistry, ScopeSignal};

struct EnemySpawner;
struct QuestLog;

struct EnemyDied;
struct QuestAdvanced;

fn main() -> Result<(), eventvisor::InvokeError> {
    let registry = Arc::new(EventRegistry::new());

    // The host owns the boundary and fires it on scene unload.
    let scene_unloaded = ScopeSignal::new();
    scene_unloaded.bind(&registry);

    let spawner = Arc::new(EnemySpawner);
    let quests = Arc::new(QuestLog);

    registry.add_listener(&spawner, |_: &EnemyDied| {
        println!("[spawner] schedule respawn");
    });
    registry.add_listener(&quests, |_: &EnemyDied| {
        println!("[quests] credit the kill");
    });
    registry.add_listener(&quests, |_: &QuestAdvanced| {
        println!("[quests] refresh journal");
    });

    registry.invoke(&EnemyDied)?;
    registry.invoke(&QuestAdvanced)?;
    println!("types before unload: {}", registry.type_count());

    scene_unloaded.fire();
    println!("types after unload: {}", registry.type_count());

    // Publishing into the cleared registry is a harmless no-op.
    registry.invoke(&EnemyDied)?;
    registry.invoke(&QuestAdvanced)?;
    Ok(())
}
