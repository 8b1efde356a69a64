use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info;

use vrs_classify::{ClassificationOverride, ClassifyError, CustomCasteTags, SurnameClassifier};
use vrs_ingest::{IngestContext, IngestOptions, IngestOutcome, InputFormat, ingest_file};
use vrs_map::{MappingRepository, MappingSet, StoredOverrides};
use vrs_model::FieldKey;
use vrs_report::{
    CountEntry, DistributionSummary, ExportFormat, export_records, write_csv, write_json,
};

use crate::cli::{
    ClassifyArgs, DatasetArgs, ExportFormatArg, InputArgs, InputFormatArg, MappingSetArgs,
    OverrideArgs, ParseArgs, SummaryArgs,
};
use crate::tables::{align_column, dim_cell, flag_cell, new_table, total_cell, warn_cell};

/// Field argument that clears a column mapping.
const NO_FIELD: &str = "none";

/// An upload run through the pipeline, with the dataset's custom caste tags.
pub struct LoadedUpload {
    pub outcome: IngestOutcome,
    pub custom_castes: CustomCasteTags,
}

pub fn run_classify(args: &ClassifyArgs) -> Result<()> {
    let classifier = SurnameClassifier::standard().context("load caste tables")?;
    let mut table = new_table(&["Name", "Caste", "Surname", "Newar"]);
    for name in &args.names {
        let classification = classifier.classify(name);
        let is_newar = classifier.is_newar_surname(&classification.surname);
        let caste_cell = if classification.is_other() {
            dim_cell(&classification.caste)
        } else {
            Cell::new(&classification.caste)
        };
        table.add_row(vec![
            Cell::new(name),
            caste_cell,
            Cell::new(&classification.surname),
            flag_cell(is_newar),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_headers(args: &InputArgs) -> Result<()> {
    let classifier = SurnameClassifier::standard().context("load caste tables")?;
    let outcome = ingest_file(
        &args.file,
        &ingest_options(args),
        IngestContext::new(classifier),
    )
    .with_context(|| format!("read {}", args.file.display()))?;
    println!("{}", header_table(&outcome));
    if outcome.reconciliation.unmapped.is_empty() {
        return Ok(());
    }
    let unmapped: Vec<&str> = outcome.reconciliation.unmapped_headers().collect();
    println!("Unmapped: {}", unmapped.join(", "));
    Ok(())
}

pub fn run_parse(args: &ParseArgs) -> Result<()> {
    let LoadedUpload { outcome, .. } = load_upload(&args.input, &args.dataset, true)?;
    let format = export_format(args.format);
    match &args.out {
        Some(path) => export_records(path, &outcome.records, format)
            .with_context(|| format!("write {}", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            match format {
                ExportFormat::Json => write_json(&mut handle, &outcome.records)?,
                ExportFormat::Csv => write_csv(&mut handle, &outcome.records)?,
            }
            handle.flush().context("flush stdout")?;
        }
    }
    Ok(())
}

pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let upload = load_upload(&args.input, &args.dataset, false)?;
    let summary = summarize(&upload)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serialize summary")?
        );
        return Ok(());
    }
    print_summary(&args.input.file, &summary);
    Ok(())
}

pub fn run_castes() -> Result<()> {
    let classifier = SurnameClassifier::standard().context("load caste tables")?;
    let mut table = new_table(&["Category", "Nepali", "Surnames", "Nepali surnames"]);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for category in classifier.catalog().categories() {
        table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(&category.name_ne),
            Cell::new(category.surnames.len()),
            Cell::new(category.surnames_ne.len()),
        ]);
    }
    println!("{table}");
    println!("Newar surnames: {}", classifier.newar_surnames().len());
    Ok(())
}

pub fn run_mapping_set(args: &MappingSetArgs) -> Result<()> {
    let set = set_mapping(args)?;
    let target = set
        .get(&args.column)
        .and_then(|mapping| mapping.target_field)
        .map_or(NO_FIELD, |field| field.as_str());
    println!(
        "{}: '{}' -> {target} ({} manual mappings)",
        set.dataset_id,
        args.column,
        set.manual_count()
    );
    Ok(())
}

pub fn run_override(args: &OverrideArgs) -> Result<()> {
    let stored = set_override(args)?;
    println!(
        "{}: override for '{}' saved ({} overrides)",
        stored.dataset_id,
        args.record_key.trim(),
        stored.overrides.len()
    );
    Ok(())
}

/// Stores a manual column mapping and returns the updated mapping set.
pub fn set_mapping(args: &MappingSetArgs) -> Result<MappingSet> {
    let field = if args.field.trim().eq_ignore_ascii_case(NO_FIELD) {
        None
    } else {
        Some(
            args.field
                .parse::<FieldKey>()
                .with_context(|| format!("parse field '{}'", args.field))?,
        )
    };
    let repo = open_repository(&args.repo)?;
    let Some(mut set) = repo
        .load_mapping(&args.dataset)
        .with_context(|| format!("load mappings of '{}'", args.dataset))?
    else {
        bail!(
            "dataset '{}' has no stored mappings; parse an upload with --dataset first",
            args.dataset
        );
    };
    set.set_manual(&args.column, field)
        .with_context(|| format!("map column in dataset '{}'", args.dataset))?;
    repo.save_mapping(&set).context("save mappings")?;
    info!(
        dataset = %set.dataset_id,
        field = field.map_or(NO_FIELD, |f| f.as_str()),
        "Manual mapping saved"
    );
    Ok(set)
}

/// Stores a manual classification and returns the dataset's overrides.
pub fn set_override(args: &OverrideArgs) -> Result<StoredOverrides> {
    let classifier = SurnameClassifier::standard().context("load caste tables")?;
    let catalog = classifier.catalog();
    let repo = open_repository(&args.repo)?;
    let mut stored = repo
        .load_or_create_overrides(&args.dataset)
        .with_context(|| format!("load overrides of '{}'", args.dataset))?;

    let caste = match args.caste.as_deref() {
        None => None,
        Some(caste) => match stored.custom_castes.canonical_caste(caste, catalog) {
            Ok(canonical) => Some(canonical),
            Err(ClassifyError::UnknownCaste(_)) if args.new_tag => {
                stored.custom_castes.add(caste, catalog)?;
                Some(stored.custom_castes.canonical_caste(caste, catalog)?)
            }
            Err(error) => {
                return Err(error).context("use --new-tag to register a custom caste tag");
            }
        },
    };
    stored
        .overrides
        .set(&args.record_key, ClassificationOverride::new(caste, args.surname.clone()))?;
    repo.save_overrides(&stored).context("save overrides")?;
    Ok(stored)
}

/// Runs an upload through the pipeline, with the dataset's stored mappings
/// and overrides when a dataset is named. `persist` saves the mapping set
/// back after the upload's headers were merged into it.
pub fn load_upload(
    input: &InputArgs,
    dataset: &DatasetArgs,
    persist: bool,
) -> Result<LoadedUpload> {
    let classifier = SurnameClassifier::standard().context("load caste tables")?;
    let options = ingest_options(input);
    let started = Instant::now();

    let Some(dataset_id) = dataset.dataset.as_deref() else {
        let outcome = ingest_file(&input.file, &options, IngestContext::new(classifier))
            .with_context(|| format!("read {}", input.file.display()))?;
        return Ok(LoadedUpload {
            outcome,
            custom_castes: CustomCasteTags::default(),
        });
    };

    let repo = open_repository(&dataset.repo)?;
    let mut mapping = repo
        .load_or_create_mapping(dataset_id)
        .with_context(|| format!("load mappings of '{dataset_id}'"))?;
    let stored = repo
        .load_overrides(dataset_id)
        .with_context(|| format!("load overrides of '{dataset_id}'"))?
        .unwrap_or_else(|| StoredOverrides::new(dataset_id));

    let context = IngestContext::new(classifier)
        .with_mapping(&mut mapping)
        .with_overrides(&stored.overrides);
    let outcome = ingest_file(&input.file, &options, context)
        .with_context(|| format!("read {}", input.file.display()))?;

    if persist {
        repo.save_mapping(&mapping).context("save mappings")?;
    }
    info!(
        dataset = dataset_id,
        records = outcome.records.len(),
        new_headers = outcome.new_headers,
        manual_overrides = outcome.manual_overrides,
        duration_ms = started.elapsed().as_millis(),
        "Dataset upload processed"
    );
    Ok(LoadedUpload {
        outcome,
        custom_castes: stored.custom_castes,
    })
}

pub fn summarize(upload: &LoadedUpload) -> Result<DistributionSummary> {
    let classifier = SurnameClassifier::standard().context("load caste tables")?;
    Ok(DistributionSummary::from_records(
        &upload.outcome.records,
        classifier.catalog(),
        &upload.custom_castes,
    ))
}

pub fn ingest_options(args: &InputArgs) -> IngestOptions {
    let mut options =
        IngestOptions::default().with_positional_fallback(!args.no_positional_fallback);
    if let Some(bytes) = args.max_file_size {
        options = options.with_max_file_size(bytes);
    }
    if let Some(rows) = args.max_rows {
        options = options.with_max_rows(rows);
    }
    if let Some(chars) = args.max_field_len {
        options = options.with_max_field_len(chars);
    }
    if let Some(sheet) = &args.sheet {
        options = options.with_worksheet(sheet.clone());
    }
    if let Some(format) = args.input_format {
        options = options.with_format(match format {
            InputFormatArg::Csv => InputFormat::Csv,
            InputFormatArg::Xlsx => InputFormat::Xlsx,
            InputFormatArg::Json => InputFormat::Json,
        });
    }
    options
}

fn export_format(format: ExportFormatArg) -> ExportFormat {
    match format {
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Csv => ExportFormat::Csv,
    }
}

fn open_repository(dir: &Path) -> Result<MappingRepository> {
    MappingRepository::new(dir).with_context(|| format!("open repository {}", dir.display()))
}

fn header_table(outcome: &IngestOutcome) -> Table {
    let reconciliation = &outcome.reconciliation;
    let mut table = new_table(&["#", "Header", "Field", "Note"]);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, header) in reconciliation.headers.iter().enumerate() {
        let field = reconciliation.field_for(index);
        let superseded = reconciliation
            .conflicts
            .iter()
            .find(|conflict| conflict.superseded == index);
        let (field_cell, note_cell) = match (field, superseded) {
            (Some(field), _) => (Cell::new(field.as_str()), dim_cell("")),
            (None, Some(conflict)) => (
                dim_cell("-"),
                warn_cell(format!(
                    "{} taken by column {}",
                    conflict.field, conflict.winner
                )),
            ),
            (None, None) => (dim_cell("-"), dim_cell("unmapped")),
        };
        table.add_row(vec![
            Cell::new(index),
            Cell::new(header),
            field_cell,
            note_cell,
        ]);
    }
    table
}

fn print_summary(path: &Path, summary: &DistributionSummary) {
    println!("File: {}", path.display());
    println!("Records: {}", summary.total);
    println!("Newar: {}", summary.newar_count);
    println!("Manual overrides: {}", summary.manual_count);
    match summary.average_age {
        Some(age) => println!("Average age: {age:.1}"),
        None => println!("Average age: -"),
    }
    println!("{}", count_table("Caste", &summary.by_caste, summary.total));
    println!("{}", count_table("Gender", &summary.by_gender, summary.total));
    println!("{}", count_table("Ward", &summary.by_ward, summary.total));
}

fn count_table(label: &str, entries: &[CountEntry], total: usize) -> Table {
    let mut table = new_table(&[label, "Count", "Share"]);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in entries {
        let count = if entry.count == 0 {
            dim_cell(entry.count)
        } else {
            Cell::new(entry.count)
        };
        table.add_row(vec![
            Cell::new(&entry.label),
            count,
            Cell::new(share(entry.count, total)),
        ]);
    }
    table.add_row(vec![total_cell("TOTAL"), total_cell(total), dim_cell("-")]);
    table
}

fn share(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}
