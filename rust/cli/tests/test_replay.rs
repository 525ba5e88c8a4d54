mod helpers;

use helpers::*;

fn played_game(dir: &std::path::Path) -> (String, String) {
    let cfg = write_config(dir, "random-draw", &["Ann", "Bob", "Cid"]);
    let res = run_cli(
        &["play", "--config", cfg.to_str().unwrap(), "--hands", "2", "--seed", "77"],
        "",
    );
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    (cfg.to_str().unwrap().to_string(), game_id_from(&res.stdout))
}

#[test]
fn replay_prints_every_part_of_the_hand() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, game_id) = played_game(dir.path());
    let hands = read_history(dir.path(), &game_id);
    let hand = &hands[1];

    let res = run_cli(
        &["replay", "--game-id", &game_id, "--hand-id", &hand.hand_id, "--config", &cfg],
        "",
    );
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let out = res.stdout;
    assert!(out.contains(&format!("=== Hand {} (game {}) ===", hand.hand_id, game_id)));
    assert!(out.contains("Dealer: Bob  Blinds: 25/50"));
    assert!(out.contains("-- seats --"));
    assert!(out.contains("-- dealt --"));
    assert!(out.contains("Cid posts blind 25"));
    assert!(out.contains("Ann posts blind 50"));
    assert!(out.contains("-- pre-exchange --"));
    assert!(out.contains(&format!("  Pot: {}", hand.pot)));
    for payout in &hand.winners {
        let name = hand.player_name(payout.player_id).unwrap();
        assert!(out.contains(&format!("{} wins {}", name, payout.amount)));
    }
    assert_eq!(out.contains("-- exchange --"), hand.discards.is_some());
    assert_eq!(out.contains("-- showdown --"), hand.showdown.is_some());
}

#[test]
fn data_dir_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let (_, game_id) = played_game(dir.path());
    let hand_id = read_history(dir.path(), &game_id)[0].hand_id.clone();

    let empty = tempfile::tempdir().unwrap();
    let cfg = write_config(empty.path(), "baseline", &["X", "Y"]);
    let data = data_dir(dir.path());
    let res = run_cli(
        &[
            "replay",
            "--game-id",
            &game_id,
            "--hand-id",
            &hand_id,
            "--config",
            cfg.to_str().unwrap(),
            "--data-dir",
            data.to_str().unwrap(),
        ],
        "",
    );
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
}

#[test]
fn unknown_hand_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, game_id) = played_game(dir.path());
    let res = run_cli(
        &["replay", "--game-id", &game_id, "--hand-id", "19700101-000001", "--config", &cfg],
        "",
    );
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.starts_with("Error: Invalid input: Hand 19700101-000001 not found"));
    assert!(res.stderr.contains("(2 hand(s) recorded)"));
}

#[test]
fn corrupt_history_line_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, game_id) = played_game(dir.path());
    let path = data_dir(dir.path()).join(format!("history_{}.jsonl", game_id));
    let mut text = std::fs::read_to_string(&path).unwrap();
    text.push_str("{not json}\n");
    std::fs::write(&path, text).unwrap();

    let res = run_cli(
        &["replay", "--game-id", &game_id, "--hand-id", "x", "--config", &cfg],
        "",
    );
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains(":3: invalid hand record"));
}
