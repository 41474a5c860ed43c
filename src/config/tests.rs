#[cfg(test)]
mod tests {
    use crate::benchmarks::{DEFAULT_PATTERN, DEFAULT_PREFIX};
    use crate::cli::Cli;
    use crate::config::{load_config, load_file_config, FileConfig, Settings, DEFAULT_CONFIG};
    use crate::report::{ConsoleConfig, DeltaUnit, DEFAULT_PRECISION};
    use clap::Parser;
    use serial_test::serial;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(DEFAULT_CONFIG);
        fs::write(&path, contents).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("minibench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_load_file_config() {
        let tempdir = tempdir().unwrap();
        let config_path = write_config(
            tempdir.path(),
            r#"
            patterns:
              - suites
              - "/abs/**/*.bench.rs"
            times: 20
            prefix: time_
            precision: 3
            unit: percent
            debug: true
            reference: previous.json
            outputs:
              json: out/report.json
              md: /tmp/report.md
            "#,
        );

        let config = load_file_config(&config_path).unwrap();

        assert_eq!(config.config_path(), config_path.as_path());
        assert_eq!(
            config.patterns,
            vec![
                tempdir.path().join("suites").to_string_lossy().into_owned(),
                "/abs/**/*.bench.rs".to_string(),
            ]
        );
        assert_eq!(config.times, Some(20));
        assert_eq!(config.prefix.as_deref(), Some("time_"));
        assert_eq!(config.precision, Some(3));
        assert_eq!(config.unit, Some(DeltaUnit::Percent));
        assert_eq!(config.debug, Some(true));
        assert_eq!(config.reference, Some(tempdir.path().join("previous.json")));
        assert_eq!(config.outputs.json, Some(tempdir.path().join("out/report.json")));
        assert_eq!(config.outputs.md, Some(PathBuf::from("/tmp/report.md")));
        assert!(config.outputs.csv.is_none());
        assert!(config.outputs.rst.is_none());
    }

    #[test]
    fn test_load_missing_file_config() {
        let tempdir = tempdir().unwrap();
        let err = load_file_config(&tempdir.path().join("missing.yml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_file_config_rejects_unknown_fields() {
        let tempdir = tempdir().unwrap();
        let config_path = write_config(tempdir.path(), "iterations: 3\n");
        assert!(load_file_config(&config_path).is_err());
    }

    #[test]
    fn test_file_config_validation() {
        let valid = FileConfig {
            times: Some(1),
            precision: Some(17),
            prefix: Some("time_".into()),
            ..FileConfig::default()
        };
        assert!(valid.validate().is_ok());

        let zero_times = FileConfig {
            times: Some(0),
            ..FileConfig::default()
        };
        assert!(zero_times.validate().is_err());

        let too_precise = FileConfig {
            precision: Some(18),
            ..FileConfig::default()
        };
        assert!(too_precise.validate().is_err());

        let empty_prefix = FileConfig {
            prefix: Some(String::new()),
            ..FileConfig::default()
        };
        assert!(empty_prefix.validate().is_err());
    }

    #[test]
    fn test_path_expansion() {
        let tempdir = tempdir().unwrap();
        let config = FileConfig {
            patterns: vec!["bench/*.bench.rs".into()],
            reference: Some(PathBuf::from("ref.json")),
            ..FileConfig::default()
        };

        let expanded = config.with_expanded_paths(tempdir.path());

        assert_eq!(
            expanded.patterns,
            vec![tempdir
                .path()
                .join("bench/*.bench.rs")
                .to_string_lossy()
                .into_owned()]
        );
        assert_eq!(expanded.reference, Some(tempdir.path().join("ref.json")));
    }

    #[test]
    #[serial]
    fn test_load_default_config_when_present() {
        let tempdir = tempdir().unwrap();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(tempdir.path()).unwrap();

        let absent = load_config(None).unwrap();
        write_config(tempdir.path(), "times: 7\n");
        let present = load_config(None).unwrap();

        std::env::set_current_dir(previous).unwrap();

        assert!(absent.is_none());
        assert_eq!(present.unwrap().times, Some(7));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let tempdir = tempdir().unwrap();
        assert!(load_config(Some(tempdir.path().join("custom.yml").as_path())).is_err());
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::resolve(&cli(&[]), None).unwrap();

        assert_eq!(settings.patterns, vec![DEFAULT_PATTERN.to_string()]);
        assert_eq!(settings.times, None);
        assert_eq!(settings.prefix, DEFAULT_PREFIX);
        assert_eq!(settings.precision, DEFAULT_PRECISION);
        assert_eq!(settings.unit, DeltaUnit::Seconds);
        assert!(!settings.debug);
        assert!(settings.color);
        assert!(settings.reference.is_none());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_precedence() {
        let file = FileConfig {
            patterns: vec!["from_file".into()],
            times: Some(20),
            prefix: Some("file_".into()),
            precision: Some(2),
            unit: Some(DeltaUnit::Percent),
            debug: Some(true),
            ..FileConfig::default()
        };

        // File over defaults
        let settings = Settings::resolve(&cli(&[]), Some(&file)).unwrap();
        assert_eq!(settings.patterns, vec!["from_file".to_string()]);
        assert_eq!(settings.times, Some(20));
        assert_eq!(settings.prefix, "file_");
        assert_eq!(settings.precision, 2);
        assert_eq!(settings.unit, DeltaUnit::Percent);
        assert!(settings.debug);

        // Command line over file
        let settings = Settings::resolve(
            &cli(&["from_cli", "-t", "3", "--prefix", "cli_", "-p", "4", "-u", "seconds"]),
            Some(&file),
        )
        .unwrap();
        assert_eq!(settings.patterns, vec!["from_cli".to_string()]);
        assert_eq!(settings.times, Some(3));
        assert_eq!(settings.prefix, "cli_");
        assert_eq!(settings.precision, 4);
        assert_eq!(settings.unit, DeltaUnit::Seconds);

        let overrides = settings.overrides();
        assert_eq!(overrides.times, Some(3));
        assert_eq!(overrides.prefix, "cli_");
    }

    #[test]
    fn test_settings_outputs_merge() {
        let mut file = FileConfig::default();
        file.outputs.json = Some(PathBuf::from("file.json"));
        file.outputs.csv = Some(PathBuf::from("file.csv"));

        let settings = Settings::resolve(&cli(&["--json", "cli.json"]), Some(&file)).unwrap();
        assert_eq!(settings.outputs.json, Some(PathBuf::from("cli.json")));
        assert_eq!(settings.outputs.csv, Some(PathBuf::from("file.csv")));
        assert!(settings.outputs.md.is_none());
    }

    #[test]
    fn test_settings_validation() {
        assert!(Settings::resolve(&cli(&["-p", "18"]), None).is_err());
        assert!(Settings::resolve(&cli(&["--prefix", ""]), None).is_err());
    }

    #[test]
    fn test_console_config() {
        let settings = Settings::resolve(&cli(&["--no-color", "-d", "-p", "2"]), None).unwrap();
        let terminal = ConsoleConfig {
            color: true,
            width: 120,
            progress: true,
            ..ConsoleConfig::default()
        };

        let console = settings.console_config(terminal);
        assert!(!console.color);
        assert!(console.debug);
        assert!(console.progress);
        assert_eq!(console.width, 120);
        assert_eq!(console.precision, 2);
    }
}
