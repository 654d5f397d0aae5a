//! Tests for loading the game configuration from disk.

use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use fortune_wheel::{
    ConfigErrorKind, GameConfig, GameEngine, Outcome, PhraseRepository, TurnEvent,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Writes a config file into the temp dir and returns its path.
fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("fortune_wheel.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_load_full_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"
total_rounds = 2
vowel_cost = 250
solve_bonus = 0
turn_seconds = 15

[wheel]
prizes = [700, 700, "PASS", "FREE_SPIN_TOKEN"]
jolly_replacements = [350, 900]

[phrases]
"board games" = ["Chess", "  snakes   and ladders "]
"#,
    );

    let config = GameConfig::from_file(&path).expect("Load failed");
    assert_eq!(*config.total_rounds(), 2);
    assert_eq!(*config.vowel_cost(), 250);
    assert_eq!(
        config.wheel().prizes(),
        &vec![
            Outcome::Cash(700),
            Outcome::Cash(700),
            Outcome::Pass,
            Outcome::FreeSpinToken
        ]
    );

    let rules = config.rules();
    assert_eq!(rules.turn_time_limit(), &Some(Duration::from_secs(15)));
    assert_eq!(*rules.vowel_cost(), 250);

    let book = config.phrase_book(Some(3));
    assert_eq!(book.categories(), vec!["BOARD GAMES".to_string()]);
    assert_eq!(
        book.phrases("board games").expect("Category missing"),
        &["CHESS".to_string(), "SNAKES AND LADDERS".to_string()]
    );
}

#[test]
fn test_loaded_config_plays() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"
total_rounds = 1
timer = false

[wheel]
prizes = [100]

[phrases]
animals = ["owl"]
"#,
    );

    let config = GameConfig::from_file(&path).expect("Load failed");
    let mut game = GameEngine::start_match(
        config.rules(),
        config.phrase_book(Some(1)),
        StdRng::seed_from_u64(1),
        &["ada"],
        *config.total_rounds(),
    )
    .expect("Match should start");

    assert_eq!(game.turn_time_limit(), None);
    assert_eq!(game.round().category(), "ANIMALS");
    assert_eq!(game.spin().unwrap().event(), &TurnEvent::Spun(Outcome::Cash(100)));
    let report = game.guess_letter("W").unwrap();
    assert_eq!(report.board(), "_W_");
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err.kind(), ConfigErrorKind::Read(_)));
}

#[test]
fn test_invalid_toml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "this is not valid toml !!!@@@");
    let err = GameConfig::from_file(&path).unwrap_err();
    assert!(matches!(err.kind(), ConfigErrorKind::Parse(_)));
}

#[test]
fn test_unknown_wedge_label() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "[wheel]\nprizes = [100, \"LOSE_A_TURN\"]\n");
    let err = GameConfig::from_file(&path).unwrap_err();
    assert!(matches!(err.kind(), ConfigErrorKind::Parse(_)));
}

#[test]
fn test_cashless_wheel_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "[wheel]\nprizes = [\"BANKRUPT\", \"PASS\"]\n");
    let err = GameConfig::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), &ConfigErrorKind::NoCashEntry);
}

#[test]
fn test_empty_category_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "[phrases]\nmovies = []\n");
    let err = GameConfig::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), &ConfigErrorKind::EmptyCategory("movies".to_string()));
}
