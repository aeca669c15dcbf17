//! Subcommand bodies. Each reads its JSON inputs, runs one engine, and
//! returns the result as a JSON value for `main` to print.

use std::path::Path;

use courtside_brackets::organize_brackets;
use courtside_ledger::ClubLedger;
use courtside_settlement::{
    ClubCatalog, compute_party_settlement, verify_bill_totals, verify_party_totals,
};
use courtside_types::{
    BillDraft, CatalogSnapshot, ClubConfig, CourtsideError, PartyBillDraft, Player, Result,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::args::{OrganizeArgs, PartyArgs, SettleArgs};

pub fn load_config(path: Option<&Path>) -> Result<ClubConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let config = ClubConfig::from_json_str(&raw)?;
            tracing::debug!(path = %path.display(), currency = %config.currency.0, "Config loaded");
            Ok(config)
        }
        None => Ok(ClubConfig::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        CourtsideError::Serialization(format!("{}: {e}", path.display()))
    })
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

pub fn settle(config: ClubConfig, args: &SettleArgs) -> Result<Value> {
    let snapshot: CatalogSnapshot = read_json(&args.catalog)?;
    let draft: BillDraft = read_json(&args.draft)?;
    let ledger = ClubLedger::new(config, ClubCatalog::from_snapshot(snapshot)?);
    let result = ledger.preview_bill(&draft)?;
    verify_bill_totals(&result)?;
    to_value(&result)
}

/// With `--catalog`, linked players must exist in it; without, links are
/// carried through unchecked.
pub fn party(config: ClubConfig, args: &PartyArgs) -> Result<Value> {
    let draft: PartyBillDraft = read_json(&args.draft)?;
    let result = match &args.catalog {
        Some(path) => {
            let catalog = ClubCatalog::from_snapshot(read_json(path)?)?;
            ClubLedger::new(config, catalog).preview_party_bill(&draft)?
        }
        None => compute_party_settlement(&draft, &config.party)?,
    };
    verify_party_totals(&result)?;
    to_value(&result)
}

pub fn organize(config: &ClubConfig, args: &OrganizeArgs) -> Result<Value> {
    let players: Vec<Player> = read_json(&args.players)?;
    let assignment = organize_brackets(
        &players,
        args.groups,
        args.filter.into(),
        args.seed,
        &config.brackets,
    )?;
    to_value(&assignment)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use courtside_types::{Gender, GenderFilter, PlayerId};

    use super::*;
    use crate::args::FilterArg;

    fn scratch(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("courtside-cli-{}", PlayerId::new()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn settle_from_files() {
        let catalog = scratch(
            "club.json",
            r#"{
                "players": [
                    {"id": "0190a5c0-0000-7000-8000-000000000001", "name": "Minh", "gender": "male"},
                    {"id": "0190a5c0-0000-7000-8000-000000000002", "name": "Lan", "gender": "female",
                     "default_ratio": "0.7"}
                ],
                "shuttle_types": [
                    {"id": "0190a5c0-0000-7000-8000-0000000000aa", "name": "Feather", "price": 25000}
                ]
            }"#,
        );
        let draft = scratch(
            "bill.json",
            r#"{
                "date": "2024-03-02",
                "court_total": 200000,
                "shuttles": [{"shuttle_type_id": "0190a5c0-0000-7000-8000-0000000000aa", "quantity": 12}],
                "participants": [
                    {"player_id": "0190a5c0-0000-7000-8000-000000000001"},
                    {"player_id": "0190a5c0-0000-7000-8000-000000000002"}
                ]
            }"#,
        );
        let out = settle(ClubConfig::default(), &SettleArgs { catalog, draft }).unwrap();
        assert_eq!(out["grand_total"], 500_000);
        assert_eq!(out["participants"][0]["share_amount"], 294_118);
        assert_eq!(out["participants"][1]["share_amount"], 205_882);
    }

    #[test]
    fn organize_from_file() {
        let pool: Vec<Player> = (0..10).map(|i| Player::new(format!("p{i}"), Gender::Male)).collect();
        let players = scratch("pool.json", &serde_json::to_string(&pool).unwrap());
        let args = OrganizeArgs {
            players,
            groups: 3,
            filter: FilterArg::All,
            seed: Some(7),
        };
        let out = organize(&ClubConfig::default(), &args).unwrap();
        assert_eq!(out["seed"], 7);
        assert_eq!(out["groups"].as_array().unwrap().len(), 3);
        assert_eq!(out["groups"][0]["players"].as_array().unwrap().len(), 4);
        assert_eq!(out["gender_filter"], serde_json::json!(GenderFilter::All));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/courtside.json"))).unwrap_err();
        assert!(matches!(err, CourtsideError::Io(_)));
    }

    #[test]
    fn malformed_draft_is_serialization_error() {
        let draft = scratch("party.json", "{ not json");
        let args = PartyArgs {
            draft,
            catalog: None,
        };
        let err = party(ClubConfig::default(), &args).unwrap_err();
        assert!(matches!(err, CourtsideError::Serialization(_)));
    }
}
