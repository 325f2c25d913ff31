//! # Example: Subscribe, publish, deduplicate, prune.

use std::sync::Arc;

use eventvisor::EventRegistry;

struct Hud;
struct AudioMixer;

struct DamageTaken {
    amount: u32,
}

struct ScoreChanged {
    total: u64,
}

fn main() -> Result<(), eventvisor::InvokeError> {
    // RUST_LOG=eventvisor=debug shows registration and pruning activity.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = Arc::new(EventRegistry::new());

    let hud = Arc::new(Hud);
    let mixer = Arc::new(AudioMixer);

    registry.add_listener(&hud, |e: &DamageTaken| {
        println!("[hud] flash damage indicator ({} hp)", e.amount);
    });
    registry.add_listener(&mixer, |e: &DamageTaken| {
        println!("[mixer] play hit sound ({} hp)", e.amount);
    });
    registry.add_listener(&hud, |e: &ScoreChanged| {
        println!("[hud] score is now {}", e.total);
    });

    // A second registration for the same owner and type is ignored.
    registry.add_listener(&hud, |_: &DamageTaken| {
        println!("[hud] this handler never runs");
    });

    registry.invoke(&DamageTaken { amount: 25 })?;
    registry.invoke(&ScoreChanged { total: 100 })?;

    // Dropping an owner retires its listeners on the next publish.
    drop(mixer);
    registry.invoke(&DamageTaken { amount: 5 })?;

    println!("--- registry state ---\n{}", registry.debug_info());
    Ok(())
}
