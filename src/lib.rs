pub mod config;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod model;
pub mod process;
pub mod reader;
pub mod sample;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::debug;

use config::{BoundingBox, FilterConfig};
use lookup::LookupConfig;
use sample::SampleConfig;

#[derive(Debug)]
pub enum Config {
    Filter {
        paths: Vec<PathBuf>,
        filter: FilterConfig,
    },
    Sample(SampleConfig),
    Lookup(LookupConfig),
}

pub fn command() -> Command {
    Command::new("aisdk-prep")
        .version("0.1")
        .about("prepare daily AIS text files [csv] for spatial database import")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("filter")
                .about("filter day files and write <name>_processed.<ext> next to each")
                .arg(
                    Arg::new("paths")
                        .short('f')
                        .long("file-path")
                        .action(ArgAction::Append)
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("day file to filter, repeat for several"),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("YAML filter configuration"),
                )
                .arg(
                    Arg::new("variant")
                        .long("variant")
                        .value_parser(["minimal", "extended"])
                        .conflicts_with("config")
                        .help("built-in filter preset [default: minimal]"),
                )
                .arg(
                    Arg::new("bbox")
                        .long("bbox")
                        .num_args(4)
                        .value_names(["LAT_MIN", "LAT_MAX", "LON_MIN", "LON_MAX"])
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("override the bounding box"),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("print a sorted random sample of days from a date window")
                .arg(
                    Arg::new("from")
                        .long("from")
                        .required(true)
                        .value_parser(parse_date)
                        .help("first day of the window, YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(parse_date)
                        .help("last day of the window, YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("fixed seed for a reproducible draw"),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("join trajectory MMSIs to vessel details from a day file")
                .arg(
                    Arg::new("trajectories")
                        .long("trajectories")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("ais")
                        .long("ais")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

pub fn get_arg() -> Result<Config> {
    config_from_matches(&command().get_matches())
}

pub fn config_from_matches(matches: &ArgMatches) -> Result<Config> {
    match matches.subcommand() {
        Some(("filter", sub)) => {
            let paths = sub
                .get_many::<PathBuf>("paths")
                .unwrap_or_default()
                .cloned()
                .collect::<Vec<PathBuf>>();

            let mut filter = match sub.get_one::<PathBuf>("config") {
                Some(path) => FilterConfig::from_yaml(path)?,
                None => match sub.get_one::<String>("variant").map(String::as_str) {
                    Some("extended") => FilterConfig::extended(),
                    _ => FilterConfig::default(),
                },
            };

            if let Some(values) = sub.get_many::<f64>("bbox") {
                let v: Vec<f64> = values.copied().collect();
                filter.bounding_box = BoundingBox {
                    lat_min: v[0],
                    lat_max: v[1],
                    lon_min: v[2],
                    lon_max: v[3],
                };
            }

            Ok(Config::Filter { paths, filter })
        }
        Some(("sample", sub)) => Ok(Config::Sample(SampleConfig {
            from: *sub.get_one::<NaiveDate>("from").context("missing --from")?,
            to: *sub.get_one::<NaiveDate>("to").context("missing --to")?,
            count: *sub.get_one::<usize>("count").context("missing --count")?,
            seed: sub.get_one::<u64>("seed").copied(),
        })),
        Some(("lookup", sub)) => Ok(Config::Lookup(LookupConfig {
            trajectories: sub
                .get_one::<PathBuf>("trajectories")
                .cloned()
                .context("missing --trajectories")?,
            ais: sub
                .get_one::<PathBuf>("ais")
                .cloned()
                .context("missing --ais")?,
            output: sub.get_one::<PathBuf>("output").cloned(),
        })),
        _ => anyhow::bail!("no subcommand given"),
    }
}

pub fn run(config: Config) -> Result<()> {
    debug!("config is {:?}", config);

    match config {
        Config::Filter { paths, filter } => {
            for path in &paths {
                process::process_file(path, &filter)?;
            }
        }
        Config::Sample(window) => {
            let days = sample::sample_days(&window)?;
            sample::write_days(&mut std::io::stdout().lock(), &days)?;
        }
        Config::Lookup(join) => {
            lookup::lookup_vessels(&join)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::AisFileError;

    const HEADER: &str =
        "# Timestamp,Type of mobile,MMSI,Latitude,Longitude,Navigational status,Ship type";

    fn parse(args: &[&str]) -> Result<Config> {
        let matches = command().try_get_matches_from(args)?;
        config_from_matches(&matches)
    }

    #[test]
    fn filter_defaults_to_minimal() {
        match parse(&["aisdk-prep", "filter", "-f", "a.csv", "-f", "b.csv"]).unwrap() {
            Config::Filter { paths, filter } => {
                assert_eq!(paths, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
                assert_eq!(filter, FilterConfig::default());
            }
            other => panic!("unexpected config {other:?}"),
        }
    }

    #[test]
    fn bbox_overrides_variant() {
        let config = parse(&[
            "aisdk-prep", "filter", "-f", "a.csv", "--variant", "extended", "--bbox", "57.2",
            "57.5", "11.2", "11.9",
        ])
        .unwrap();
        match config {
            Config::Filter { filter, .. } => {
                assert_eq!(filter.bounding_box, BoundingBox::default());
                assert_eq!(filter.exclusion_regions.len(), 2);
            }
            other => panic!("unexpected config {other:?}"),
        }
    }

    #[test]
    fn bbox_overrides_config_file_box_only() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("filter.yaml");
        fs::write(
            &yaml,
            "bounding_box: { lat_min: 57.3, lat_max: 57.7, lon_min: 10.7, lon_max: 11.7 }\n\
             exclusion_regions:\n  - { name: north-east, lat_min: 57.6, lon_min: 11.6 }\n",
        )
        .unwrap();
        let yaml = yaml.to_str().unwrap();

        let config = parse(&[
            "aisdk-prep", "filter", "-f", "a.csv", "--config", yaml, "--bbox", "57.0", "58.0",
            "10.0", "12.0",
        ])
        .unwrap();
        match config {
            Config::Filter { filter, .. } => {
                assert_eq!(
                    filter.bounding_box,
                    BoundingBox {
                        lat_min: 57.0,
                        lat_max: 58.0,
                        lon_min: 10.0,
                        lon_max: 12.0,
                    }
                );
                assert_eq!(filter.exclusion_regions.len(), 1);
                assert_eq!(filter.exclusion_regions[0].name, "north-east");
            }
            other => panic!("unexpected config {other:?}"),
        }
    }

    #[test]
    fn config_and_variant_conflict() {
        assert!(parse(&[
            "aisdk-prep", "filter", "-f", "a.csv", "--config", "f.yaml", "--variant", "extended",
        ])
        .is_err());
    }

    #[test]
    fn files_run_in_order_and_stop_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let row = "2021-01-21 00:00:00,Class A,123456789,57.30,11.50,Under way using engine,Cargo";
        let first = dir.path().join("a.csv");
        let missing = dir.path().join("b.csv");
        let last = dir.path().join("c.csv");
        fs::write(&first, format!("{HEADER}\n{row}\n")).unwrap();
        fs::write(&last, format!("{HEADER}\n{row}\n")).unwrap();

        let err = run(Config::Filter {
            paths: vec![first, missing.clone(), last],
            filter: FilterConfig::default(),
        })
        .unwrap_err();

        match err.downcast_ref::<AisFileError>() {
            Some(AisFileError::InputNotFound { path }) => assert_eq!(*path, missing),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(dir.path().join("a_processed.csv").exists());
        assert!(!dir.path().join("c_processed.csv").exists());
    }

    #[test]
    fn sample_args() {
        match parse(&[
            "aisdk-prep", "sample", "--from", "2020-04-01", "--to", "2020-06-30", "-n", "20",
            "--seed", "3",
        ])
        .unwrap()
        {
            Config::Sample(sample) => {
                assert_eq!(sample.from, NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());
                assert_eq!(sample.count, 20);
                assert_eq!(sample.seed, Some(3));
            }
            other => panic!("unexpected config {other:?}"),
        }
        assert!(parse(&[
            "aisdk-prep", "sample", "--from", "01/04/2020", "--to", "2020-06-30", "-n", "2",
        ])
        .is_err());
    }

    #[test]
    fn filter_requires_a_path() {
        assert!(parse(&["aisdk-prep", "filter"]).is_err());
    }

    #[test]
    fn lookup_args() {
        match parse(&["aisdk-prep", "lookup", "--trajectories", "t.csv", "--ais", "d.csv"]).unwrap()
        {
            Config::Lookup(lookup) => {
                assert_eq!(lookup.trajectories, PathBuf::from("t.csv"));
                assert_eq!(lookup.output, None);
            }
            other => panic!("unexpected config {other:?}"),
        }
    }
}
