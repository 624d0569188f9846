#![cfg(test)]
use serde::{Deserialize, Serialize};

use super::Preferences;
use crate::backend::{FileBackend, MemoryBackend, TextBackend};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::errors::PrefsError;
use crate::preftypes::{Table, VariablePair};

type TestReturn = Result<(), String>;
type TestPrefs = Preferences<MemoryBackend, Vec<Diagnostic>>;

const SAVEGAME: &str = "\
:PlayerData
name Bob # player name
level 12
experience 3400
:World
time 153.25
is_raining true
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlayerData {
    name: String,
    level: i32,
    experience: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
struct WorldData {
    time: f64,
    is_raining: bool,
}

fn unnamed() -> PlayerData {
    PlayerData {
        name: "Unnamed".to_string(),
        level: 0,
        experience: 0,
    }
}

fn loaded(text: &str) -> Result<TestPrefs, String> {
    let mut prefs = Preferences::with_backend(MemoryBackend::new(text), Vec::new());
    prefs.load().map_err(|e| e.to_string())?;
    Ok(prefs)
}

// TESTS
#[test]
fn read_by_type_name_and_explicit_name() -> TestReturn {
    let mut prefs = loaded(SAVEGAME)?;
    let player = prefs.read_table(unnamed());
    assert_eq!(
        player,
        PlayerData {
            name: "Bob".to_string(),
            level: 12,
            experience: 3400,
        }
    );
    let world = prefs.read_table_named(WorldData::default(), "World");
    assert_eq!(world.time, 153.25);
    assert!(world.is_raining);
    assert!(prefs.sink().is_empty());
    assert!(prefs.is_empty());
    Ok(())
}

#[test]
fn tables_are_read_once() -> TestReturn {
    let mut prefs = loaded(SAVEGAME)?;
    let first = prefs.read_table(unnamed());
    assert_eq!(first.level, 12);
    assert!(!prefs.contains_table("PlayerData"));

    let second = prefs.read_table(unnamed());
    assert_eq!(second, unnamed());
    assert_eq!(prefs.sink().len(), 1);
    let diagnostic = &prefs.sink()[0];
    assert_eq!(
        diagnostic.kind,
        DiagnosticKind::TableNotFound("PlayerData".to_string())
    );
    assert_eq!(diagnostic.line, None);
    assert_eq!(diagnostic.source, "<memory>");
    Ok(())
}

#[test]
fn missing_table_returns_record_untouched() -> TestReturn {
    let mut prefs = loaded(SAVEGAME)?;
    let world = WorldData {
        time: 1.0,
        is_raining: false,
    };
    // Stored as "World", not "WorldData".
    assert_eq!(prefs.read_table(world.clone()), world);
    assert_eq!(prefs.sink().len(), 1);
    assert!(prefs.contains_table("World"));
    Ok(())
}

#[test]
fn load_replaces_contents() -> TestReturn {
    let mut prefs = loaded(SAVEGAME)?;
    prefs.load_str(":Other\nx 1\n");
    let names: Vec<&str> = prefs.table_names().collect();
    assert_eq!(names, ["Other"]);
    Ok(())
}

#[test]
fn load_reports_parse_errors() -> TestReturn {
    let prefs = loaded("stray 1\n:A\nx 1\n:A\nnovalue\n")?;
    let lines: Vec<Option<usize>> = prefs.sink().iter().map(|d| d.line).collect();
    assert_eq!(lines, [Some(1), Some(4), Some(5)]);
    assert_eq!(prefs.table("A").map(Table::len), Some(1));
    Ok(())
}

#[test]
fn write_then_save() -> TestReturn {
    let mut prefs: TestPrefs = Preferences::with_backend(MemoryBackend::default(), Vec::new());
    let player = PlayerData {
        name: "Ada Lovelace".to_string(),
        level: 3,
        experience: 250,
    };
    prefs.write_table(&player);
    prefs.write_table_named(
        &WorldData {
            time: 12.5,
            is_raining: false,
        },
        "World",
    );
    prefs.save().map_err(|e| e.to_string())?;

    assert_eq!(
        prefs.backend().contents(),
        ":PlayerData\nname Ada Lovelace\nlevel 3\nexperience 250\n:World\ntime 12.5\nis_raining False\n"
    );
    assert!(prefs.is_empty());
    assert!(prefs.sink().is_empty());
    Ok(())
}

#[test]
fn save_drains_the_store() -> TestReturn {
    let mut prefs = loaded(SAVEGAME)?;
    prefs.save().map_err(|e| e.to_string())?;
    assert_eq!(prefs.backend().contents(), SAVEGAME.replace(" # player name", ""));
    assert!(prefs.is_empty());

    // Nothing was written again, so the next save produces an empty document.
    prefs.save().map_err(|e| e.to_string())?;
    assert_eq!(prefs.backend().contents(), "");
    prefs.save().map_err(|e| e.to_string())?;
    assert_eq!(prefs.backend().contents(), "");
    Ok(())
}

#[test]
fn rewriting_a_queued_table_warns() -> TestReturn {
    let mut prefs = loaded("")?;
    prefs.write_table(&unnamed());
    let mut player = unnamed();
    player.level = 99;
    prefs.write_table(&player);

    assert_eq!(prefs.len(), 1);
    assert_eq!(prefs.table("PlayerData").and_then(|t| t.get("level")), Some("99"));
    assert_eq!(prefs.sink().len(), 1);
    assert_eq!(prefs.sink()[0].severity(), Severity::Warning);
    assert_eq!(
        prefs.sink()[0].kind,
        DiagnosticKind::TableRequeued("PlayerData".to_string())
    );
    Ok(())
}

#[test]
fn writing_a_loaded_table_also_warns() -> TestReturn {
    // The loaded table was never read, so it is still queued.
    let mut prefs = loaded(SAVEGAME)?;
    prefs.write_table_named(&WorldData::default(), "World");
    assert_eq!(prefs.sink().len(), 1);
    let names: Vec<&str> = prefs.table_names().collect();
    assert_eq!(names, ["PlayerData", "World"]);
    Ok(())
}

#[test]
fn extract_and_upsert() -> TestReturn {
    let mut prefs = loaded(SAVEGAME)?;
    let mut world = prefs.extract("World").ok_or("World should be loaded")?;
    assert_eq!(world.line_number(), Some(5));
    assert!(prefs.extract("World").is_none());

    world.push(VariablePair::new("wind", "strong", None));
    prefs.upsert(world);
    assert_eq!(prefs.table("World").and_then(|t| t.get("wind")), Some("strong"));
    // Only the failed second extract was reported.
    assert_eq!(prefs.sink().len(), 1);
    Ok(())
}

#[test]
fn round_trip_is_stable() -> TestReturn {
    let prefs = loaded(SAVEGAME)?;
    let first = prefs.serialize();
    let reloaded = loaded(&first)?;
    assert_eq!(reloaded.serialize(), first);
    Ok(())
}

#[test]
fn empty_text_survives_save_and_reload() -> TestReturn {
    let mut prefs: TestPrefs = Preferences::with_backend(MemoryBackend::default(), Vec::new());
    let player = PlayerData {
        name: String::new(),
        level: 4,
        experience: 10,
    };
    prefs.write_table(&player);
    prefs.save().map_err(|e| e.to_string())?;
    assert_eq!(
        prefs.backend().contents(),
        ":PlayerData\nname \nlevel 4\nexperience 10\n"
    );

    let mut reloaded = loaded(prefs.backend().contents())?;
    let restored = reloaded.read_table(unnamed());
    assert!(reloaded.sink().is_empty(), "{:?}", reloaded.sink());
    assert_eq!(restored, player);
    Ok(())
}

#[test]
fn byte_order_mark_is_ignored() -> TestReturn {
    let mut prefs = loaded("\u{feff}:PlayerData\nname Bob\nlevel 12\n")?;
    assert!(prefs.sink().is_empty(), "{:?}", prefs.sink());
    let player = prefs.read_table(unnamed());
    assert_eq!(player.name, "Bob");
    assert_eq!(player.level, 12);
    Ok(())
}

#[test]
fn file_backed_session() -> TestReturn {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let path = dir.path().join("example.save");
    std::fs::write(&path, SAVEGAME).map_err(|e| e.to_string())?;

    let mut prefs = Preferences::with_backend(FileBackend::new(&path), Vec::new());
    prefs.load().map_err(|e| e.to_string())?;
    let mut player = prefs.read_table(unnamed());
    let mut world = prefs.read_table_named(WorldData::default(), "World");
    player.experience += 100;
    world.time += 0.5;
    world.is_raining = false;
    prefs.write_table(&player);
    prefs.write_table_named(&world, "World");
    prefs.save().map_err(|e| e.to_string())?;

    let saved = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
    assert_eq!(
        saved,
        ":PlayerData\nname Bob\nlevel 12\nexperience 3500\n:World\ntime 153.75\nis_raining False\n"
    );

    // A fresh store picks up where the last one left off.
    let mut again = Preferences::with_backend(FileBackend::new(&path), Vec::new());
    again.load().map_err(|e| e.to_string())?;
    assert_eq!(again.read_table(unnamed()), player);
    assert!(prefs.sink().is_empty());
    assert!(again.sink().is_empty());
    Ok(())
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut prefs = Preferences::new(dir.path().join("nope.save"));
    assert!(matches!(prefs.load(), Err(PrefsError::FileNotFound(_))));
    assert!(prefs.is_empty());
}

#[test]
fn failed_save_keeps_tables() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path().join("no").join("such").join("dir.save"));
    assert!(backend.source().ends_with("dir.save"));
    let mut prefs = Preferences::with_backend(backend, Vec::new());
    prefs.write_table(&unnamed());
    assert!(matches!(prefs.save(), Err(PrefsError::Io { .. })));
    assert!(prefs.contains_table("PlayerData"));
}
