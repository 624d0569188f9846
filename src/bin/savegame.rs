//! Loads a savegame, advances the world clock and saves it again.
//!
//! Usage: `savegame [path]` (defaults to `example.save`).
use serde::{Deserialize, Serialize};

use prefstore::{Preferences, PrefsError};

#[derive(Debug, Serialize, Deserialize)]
struct PlayerData {
    name: String,
    level: i32,
    experience: i32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct WorldData {
    time: f64,
    is_raining: bool,
}

fn main() -> Result<(), String> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "example.save".to_string());
    let mut savegame = Preferences::new(&path);
    match savegame.load() {
        Ok(()) => println!("Loaded savegame"),
        // First run: start from defaults.
        Err(PrefsError::FileNotFound(_)) => println!("No savegame at {}, starting fresh", path),
        Err(err) => return Err(err.to_string()),
    }

    // Anything the file does not mention keeps these values.
    let player = savegame.read_table(PlayerData {
        name: "Unnamed".to_string(),
        level: 1,
        experience: 0,
    });
    println!("---------------- PlayerData");
    println!("Loaded: name {}", player.name);
    println!("Loaded: level {}", player.level);
    println!("Loaded: experience {}", player.experience);

    let mut world = savegame.read_table_named(WorldData::default(), "World");
    println!("---------------- WorldData");
    println!("Loaded: time {}", world.time);
    println!("Loaded: is_raining {}", world.is_raining);

    world.time += 1.0;

    savegame.write_table(&player);
    println!("Written: PlayerData");
    savegame.write_table_named(&world, "World");
    println!("Written: World");

    savegame.save().map_err(|e| e.to_string())?;
    println!("Saved savegame");
    Ok(())
}
