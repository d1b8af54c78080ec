//! Tests for the binary-side configuration layer.

#[cfg(test)]
mod config_tests {
    use blob_core::{RendererMode, SimConfig};
    use clap::Parser;

    use crate::config::{Args, RendererArg, apply_overrides, load_config, parse_config};

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "blobworld",
            "--host", "viewer.local",
            "--port", "6000",
            "--renderer", "socket",
            "--max-hours", "24",
            "--population", "9",
            "--seed", "7",
            "--start-paused",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.network.host, "viewer.local");
        assert_eq!(config.network.port, 6000);
        assert_eq!(config.renderer, RendererMode::Socket);
        assert_eq!(config.max_sim_hours, 24.0);
        assert_eq!(config.world.initial_population, 9);
        assert_eq!(config.seed, 7);
        assert!(config.start_paused);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = parse_config(r#"{"time_multiplier": 2.5, "world": {"name": "Tiny", "length": 20}}"#).unwrap();
        let defaults = SimConfig::default();
        assert_eq!(config.time_multiplier, 2.5);
        assert_eq!(config.world.name, "Tiny");
        assert_eq!(config.world.length, 20.0);
        assert_eq!(config.world.width, defaults.world.width);
        assert_eq!(config.network.port, defaults.network.port);
    }

    #[test]
    fn flags_win_over_file_values() {
        let mut config = parse_config(r#"{"seed": 1, "renderer": "socket"}"#).unwrap();
        let args = Args { seed: Some(2), renderer: Some(RendererArg::Headless), ..Args::default() };
        apply_overrides(&mut config, &args);
        assert_eq!(config.seed, 2);
        assert_eq!(config.renderer, RendererMode::Headless);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = Args { multiplier: Some(0.0), ..Args::default() };
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = Args { config: Some("/nonexistent/blobworld.json".into()), ..Args::default() };
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_config("{ not json").is_err());
    }
}
