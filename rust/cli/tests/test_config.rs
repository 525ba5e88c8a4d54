mod helpers;

use helpers::{run_cli, write_config};
use serial_test::serial;

struct EnvGuard {
    restores: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn apply(pairs: &[(&'static str, &str)]) -> Self {
        let mut restores = Vec::new();
        for (key, value) in pairs {
            restores.push((*key, std::env::var(key).ok()));
            // SAFETY: every test in this file is #[serial]
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

fn cfg_json(args: &[&str]) -> serde_json::Value {
    let mut argv = vec!["cfg"];
    argv.extend_from_slice(args);
    let res = run_cli(&argv, "");
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    serde_json::from_str(&res.stdout).expect("cfg prints JSON")
}

#[test]
#[serial]
fn defaults_are_reported_with_their_source() {
    let _env = EnvGuard::apply(&[
        ("DRAWPOKER_CONFIG", ""),
        ("DRAWPOKER_SEED", ""),
        ("DRAWPOKER_DATA_DIR", ""),
    ]);
    let v = cfg_json(&[]);
    assert_eq!(v["small_blind"]["value"], 25);
    assert_eq!(v["big_blind"]["value"], 50);
    assert_eq!(v["starting_stack"]["value"], 1000);
    assert_eq!(v["seed"]["value"], serde_json::Value::Null);
    assert_eq!(v["ai"]["value"], "random-draw");
    assert_eq!(v["players"]["value"][0]["name"], "Player (You)");
    assert_eq!(v["players"]["value"][0]["is_human"], true);
    assert_eq!(v["players"]["source"], "default");
}

#[test]
#[serial]
fn env_beats_file_beats_default() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("table.toml");
    std::fs::write(&cfg, "seed = 3\nai = \"baseline\"\ndata_dir = \"from-file\"\n").unwrap();
    let _env = EnvGuard::apply(&[
        ("DRAWPOKER_CONFIG", cfg.to_str().unwrap()),
        ("DRAWPOKER_SEED", "11"),
        ("DRAWPOKER_DATA_DIR", "/tmp/drawpoker-env"),
    ]);

    let v = cfg_json(&[]);
    assert_eq!(v["ai"]["value"], "baseline");
    assert_eq!(v["ai"]["source"], "file");
    assert_eq!(v["seed"]["value"], 11);
    assert_eq!(v["seed"]["source"], "env");
    assert_eq!(v["data_dir"]["value"], "/tmp/drawpoker-env");
    assert_eq!(v["data_dir"]["source"], "env");
    assert_eq!(v["big_blind"]["source"], "default");
}

#[test]
#[serial]
fn config_flag_takes_precedence_over_env_path() {
    let dir = tempfile::tempdir().unwrap();
    let env_cfg = write_config(dir.path(), "baseline", &["A", "B"]);
    let other = tempfile::tempdir().unwrap();
    let flag_cfg = write_config(other.path(), "random-draw", &["C", "D", "E"]);
    let _env = EnvGuard::apply(&[("DRAWPOKER_CONFIG", env_cfg.to_str().unwrap())]);

    let v = cfg_json(&["--config", flag_cfg.to_str().unwrap()]);
    assert_eq!(v["ai"]["value"], "random-draw");
    assert_eq!(v["players"]["value"].as_array().unwrap().len(), 3);
}

#[test]
#[serial]
fn invalid_config_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "big_blind = 0\n").unwrap();
    let _env = EnvGuard::apply(&[("DRAWPOKER_SEED", "")]);

    let res = run_cli(&["cfg", "--config", path.to_str().unwrap()], "");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Configuration error"));
    assert!(res.stderr.contains("big_blind must be >0"));

    let res = run_cli(&["play", "--config", path.to_str().unwrap()], "");
    assert_eq!(res.exit_code, 2);
}

#[test]
#[serial]
fn seed_from_env_makes_play_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "random-draw", &["A", "B", "C"]);
    let _env = EnvGuard::apply(&[("DRAWPOKER_SEED", "2024")]);

    let a = run_cli(&["play", "--config", cfg.to_str().unwrap()], "");
    let b = run_cli(&["play", "--config", cfg.to_str().unwrap()], "");
    assert_eq!(a.exit_code, 0, "stderr: {}", a.stderr);
    assert!(a.stdout.contains("seed=2024"));
    assert_eq!(
        helpers::game_id_from(&a.stdout),
        helpers::game_id_from(&b.stdout)
    );
}
