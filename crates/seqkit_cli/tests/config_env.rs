//! Kept to a single test: it sets `SEQKIT_CONFIG` for the whole process.

use seqkit_cli::{load_config, CONFIG_ENV};

#[test]
fn seqkit_config_env_is_read_unless_a_path_is_given() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let env_path = tmp.path().join("from-env.toml");
    std::fs::write(&env_path, "[limits]\nmax_bound = 42\n\n[output]\npretty = false\n")
        .expect("write env config");
    let explicit = tmp.path().join("explicit.toml");
    std::fs::write(&explicit, "[limits]\nmax_bound = 7\n").expect("write explicit config");

    std::env::set_var(CONFIG_ENV, &env_path);
    let from_env = load_config(None);
    let chosen = load_config(Some(&explicit));
    std::env::set_var(CONFIG_ENV, tmp.path().join("missing.toml"));
    let dangling = load_config(None);
    std::env::remove_var(CONFIG_ENV);

    let from_env = from_env.expect("config from env");
    assert_eq!(from_env.limits.max_bound, 42);
    assert!(!from_env.output.pretty);
    assert_eq!(chosen.expect("explicit config").limits.max_bound, 7);
    assert!(dangling.is_err(), "a dangling SEQKIT_CONFIG should not fall back");
}
