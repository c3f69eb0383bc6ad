//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rust_ccg_search::normalize::RawFile;
use serde_json::json;

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The two-document Alpha/Beta catalog.
pub fn alpha_beta_files() -> Vec<RawFile> {
    vec![
        RawFile::new(
            "S1",
            json!({
                "C001": {
                    "name": "Alpha",
                    "effect": "Summon 「Beta」.",
                    "all_cards": [{ "id": "S1/001", "rarity": "R" }]
                }
            }),
        ),
        RawFile::new(
            "S1",
            json!({
                "C002": {
                    "name": "Beta",
                    "effect": "",
                    "all_cards": [
                        { "id": "S1/002A", "rarity": "C" },
                        { "id": "S1/002B", "rarity": "RR" }
                    ]
                }
            }),
        ),
    ]
}

/// A small product with varied stats, sentinels and trait tags.
pub fn booster_file() -> RawFile {
    RawFile::new(
        "BD",
        json!({
            "BD-001": {
                "name": "Fireheart",
                "effect": "【自】このカードが舞台に置かれた時、あなたは1枚引く。",
                "type": "Character",
                "color": "Red",
                "product_name": "Booster Dawn",
                "level": 1,
                "cost": 1,
                "power": 5000,
                "soul": 1,
                "trigger_soul_count": 1,
                "trait": ["Music", "Idol"],
                "all_cards": [
                    { "id": "BD/W01-001", "rarity": "RR" },
                    { "id": "BD/W01-001SP", "rarity": "SP" }
                ]
            },
            "BD-002": {
                "name": "Ember Fox",
                "effect": "Deal fire damage to 「Fireheart」.",
                "type": "Character",
                "color": "Red",
                "product_name": "Booster Dawn",
                "level": 0,
                "cost": 0,
                "power": 2500,
                "soul": 1,
                "trait": ["Animal"],
                "all_cards": [{ "id": "BD/W01-002", "rarity": "C" }]
            },
            "BD-003": {
                "name": "Tidal Sign",
                "effect": "Return a character to hand.",
                "type": "Event",
                "color": "Blue",
                "product_name": "Booster Dusk",
                "level": "-",
                "cost": "-",
                "power": "-",
                "soul": "-",
                "all_cards": [{ "id": "BD/W01-003", "rarity": "U" }]
            },
            "BD-004": {
                "name": "Climax Wave",
                "effect": "",
                "type": "Climax",
                "color": "Blue",
                "product_name": "Booster Dusk",
                "trigger_soul_count": 2,
                "all_cards": [{ "id": "BD/W01-004a", "rarity": "CR" }]
            }
        }),
    )
}
