//! Integration tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use vrs_cli::cli::{
    Cli, Command, DatasetArgs, ExportFormatArg, InputArgs, MappingCommand, MappingSetArgs,
    OverrideArgs, ParseArgs,
};
use vrs_cli::commands::{load_upload, run_parse, set_mapping, set_override, summarize};

const ROLL: &str = "नाम,उमेर,लिङ्ग,टिप्पणी\n\
                    Ram Shrestha,34,Male,Teacher\n\
                    Sita Gurung,29,महिला,Farmer\n";

fn write_roll(dir: &Path) -> PathBuf {
    let path = dir.join("ward-4.csv");
    fs::write(&path, ROLL).unwrap();
    path
}

fn input(file: PathBuf) -> InputArgs {
    InputArgs {
        file,
        input_format: None,
        sheet: None,
        max_file_size: None,
        max_rows: None,
        max_field_len: None,
        no_positional_fallback: false,
    }
}

fn dataset(repo: &Path) -> DatasetArgs {
    DatasetArgs {
        dataset: Some("ward-4".to_string()),
        repo: repo.to_path_buf(),
    }
}

fn override_args(repo: &Path, caste: Option<&str>, new_tag: bool) -> OverrideArgs {
    OverrideArgs {
        dataset: "ward-4".to_string(),
        record_key: "2:Sita Gurung".to_string(),
        caste: caste.map(str::to_string),
        surname: None,
        new_tag,
        repo: repo.to_path_buf(),
    }
}

#[test]
fn parse_exports_csv_and_stores_headers() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("repo");
    let out = dir.path().join("records.csv");
    let args = ParseArgs {
        input: input(write_roll(dir.path())),
        dataset: dataset(&repo),
        format: ExportFormatArg::Csv,
        out: Some(out.clone()),
    };

    run_parse(&args).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().next().unwrap().ends_with("उमेर,टिप्पणी,नाम,लिङ्ग"));
    assert!(repo.join("ward-4.mapping.json").exists());
}

#[test]
fn manual_mapping_applies_on_next_upload() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("repo");
    let file = write_roll(dir.path());

    let first = load_upload(&input(file.clone()), &dataset(&repo), true).unwrap();
    assert_eq!(first.outcome.records[0].occupation, None);

    let set = set_mapping(&MappingSetArgs {
        dataset: "ward-4".to_string(),
        column: "टिप्पणी".to_string(),
        field: "occupation".to_string(),
        repo: repo.clone(),
    })
    .unwrap();
    assert_eq!(set.manual_count(), 1);

    let second = load_upload(&input(file), &dataset(&repo), true).unwrap();
    assert_eq!(
        second.outcome.records[0].occupation.as_deref(),
        Some("Teacher")
    );
}

#[test]
fn mapping_requires_a_known_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let error = set_mapping(&MappingSetArgs {
        dataset: "nowhere".to_string(),
        column: "नाम".to_string(),
        field: "voterName".to_string(),
        repo: dir.path().to_path_buf(),
    })
    .unwrap_err();
    assert!(error.to_string().contains("no stored mappings"));
}

#[test]
fn custom_caste_needs_new_tag() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("repo");

    assert!(set_override(&override_args(&repo, Some("Rai-Kirat"), false)).is_err());
    let stored = set_override(&override_args(&repo, Some("Rai-Kirat"), true)).unwrap();
    assert!(stored.custom_castes.contains("Rai-Kirat"));

    let upload = load_upload(&input(write_roll(dir.path())), &dataset(&repo), false).unwrap();
    let sita = &upload.outcome.records[1];
    assert_eq!(sita.caste, "Rai-Kirat");
    assert_eq!(upload.outcome.manual_overrides, 1);

    let summary = summarize(&upload).unwrap();
    let rai = summary
        .by_caste
        .iter()
        .find(|entry| entry.label == "Rai-Kirat")
        .unwrap();
    assert_eq!(rai.count, 1);
    assert_eq!(summary.manual_count, 1);
}

#[test]
fn built_in_caste_is_canonicalized() {
    let dir = tempfile::tempdir().unwrap();
    let stored = set_override(&override_args(dir.path(), Some("chhetri"), false)).unwrap();
    let entry = stored.overrides.get("2:Sita Gurung").unwrap();
    assert_eq!(entry.caste.as_deref(), Some("Chhetri"));
}

#[test]
fn parses_command_line() {
    let cli = Cli::try_parse_from([
        "vrs",
        "--log-data",
        "mapping",
        "set",
        "ward-4",
        "टिप्पणी",
        "none",
        "--repo",
        "/tmp/repo",
    ])
    .unwrap();
    assert!(cli.log_data);
    let Command::Mapping(MappingCommand::Set(args)) = cli.command else {
        panic!("expected mapping set");
    };
    assert_eq!(args.field, "none");
    assert_eq!(args.repo, PathBuf::from("/tmp/repo"));

    assert!(Cli::try_parse_from(["vrs", "override", "ward-4", "1", "--new-tag"]).is_err());
    assert!(Cli::try_parse_from(["vrs", "classify"]).is_err());
}
