//! CSV boundary: turns the JHU-style category tables, the country centroid table and the
//! per-destination migration files into a [`Dataset`] and a [`FlowGraph`].
//!
//! Unusable rows are dropped and counted rather than reported as errors; only IO/CSV
//! framing failures and dataset shape violations abort a load.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::data::dataset::{Category, CategorySeries, Dataset, DatasetBuilder};
use crate::flow::graph::{CentroidTable, FlowBuildReport, FlowGraph, FlowGraphBuilder};
use crate::foundation::core::Location;
use crate::foundation::error::{SceneError, SceneResult};

const CATEGORY_LAT_COL: usize = 2;
const CATEGORY_LON_COL: usize = 3;
const CATEGORY_FIRST_COUNT_COL: usize = 4;

const CENTROID_NAME_COL: usize = 0;
const CENTROID_LAT_COL: usize = 4;
const CENTROID_LON_COL: usize = 5;

const FLOW_SOURCE_COL: usize = 2;
const FLOW_WEIGHT_COL: usize = 9;

/// Row accounting for one input table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TableReport {
    /// Data rows read.
    pub rows_read: usize,
    /// Rows that made it into the output.
    pub rows_kept: usize,
    /// Rows dropped (unparsable fields or no-data coordinates).
    pub rows_skipped: usize,
}

impl TableReport {
    fn kept(&mut self) {
        self.rows_read += 1;
        self.rows_kept += 1;
    }

    fn skipped(&mut self) {
        self.rows_read += 1;
        self.rows_skipped += 1;
    }
}

/// Read one category table into `builder`.
///
/// Columns: province, country, latitude, longitude, then one cumulative count per day.
pub fn read_category_table<R: Read>(
    reader: R,
    category: Category,
    builder: &mut DatasetBuilder,
) -> SceneResult<TableReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut report = TableReport::default();
    for record in rdr.records() {
        let record = record.with_context(|| format!("read {category} table row"))?;
        let Some(series) = parse_category_row(&record) else {
            report.skipped();
            continue;
        };
        if builder.push(category, series)? {
            report.kept();
        } else {
            report.skipped();
        }
    }
    Ok(report)
}

fn parse_category_row(record: &csv::StringRecord) -> Option<CategorySeries> {
    let lat = parse_f64(record.get(CATEGORY_LAT_COL)?)?;
    let lon = parse_f64(record.get(CATEGORY_LON_COL)?)?;
    let counts = record
        .iter()
        .skip(CATEGORY_FIRST_COUNT_COL)
        .map(|f| f.trim().parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let province = record.get(0).map(str::trim).unwrap_or_default();
    let country = record.get(1).map(str::trim).unwrap_or_default();
    let id = match (province.is_empty(), country.is_empty()) {
        (true, true) => None,
        (true, false) => Some(country.to_owned()),
        (false, true) => Some(province.to_owned()),
        (false, false) => Some(format!("{province}, {country}")),
    };

    Some(CategorySeries::new(Location { id, lat, lon }, counts))
}

/// Read the centroid table: name in column 0, latitude in column 4, longitude in column 5.
///
/// Every row is read; a header row falls out as unparsable.
pub fn read_centroid_table<R: Read>(reader: R) -> SceneResult<(CentroidTable, TableReport)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = CentroidTable::new();
    let mut report = TableReport::default();
    for record in rdr.records() {
        let record = record.context("read centroid table row")?;
        let parsed = (|| {
            let name = record.get(CENTROID_NAME_COL)?.trim();
            let lat = parse_f64(record.get(CENTROID_LAT_COL)?)?;
            let lon = parse_f64(record.get(CENTROID_LON_COL)?)?;
            Some((name, lat, lon))
        })();
        match parsed {
            Some((name, lat, lon)) if !name.is_empty() => {
                table.insert(name, lat, lon);
                report.kept();
            }
            _ => report.skipped(),
        }
    }
    Ok((table, report))
}

/// Feed one destination's inbound flow rows (source in column 2, weight in column 9)
/// into `builder`. Returns the number of edges added.
///
/// Every row is read; a header row falls out as an unknown source.
pub fn read_flow_file<R: Read>(
    reader: R,
    destination: &str,
    builder: &mut FlowGraphBuilder<'_>,
) -> SceneResult<usize> {
    if !builder.knows(destination) {
        return Ok(builder.add_inbound(destination, std::iter::empty::<(&str, &str)>()));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.with_context(|| format!("read flow row for '{destination}'"))?;
        let source = record.get(FLOW_SOURCE_COL).unwrap_or_default().trim().to_owned();
        let weight = record.get(FLOW_WEIGHT_COL).unwrap_or_default().to_owned();
        rows.push((source, weight));
    }
    Ok(builder.add_inbound(destination, rows))
}

/// Build the flow graph from every `*.csv` file in `dir`; each file stem names its
/// destination. Files are visited in path order so edge order is reproducible.
pub fn read_flow_dir(
    dir: &Path,
    centroids: &CentroidTable,
) -> SceneResult<(FlowGraph, FlowBuildReport)> {
    let mut paths = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("list flow dir '{}'", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("list flow dir '{}'", dir.display()))?
            .path();
        let is_csv = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut builder = FlowGraphBuilder::new(centroids);
    for path in &paths {
        let Some(destination) = destination_name(path) else {
            continue;
        };
        let f = open(path)?;
        let added = read_flow_file(f, destination, &mut builder)?;
        tracing::trace!(destination, added, "read flow file");
    }
    Ok(builder.finish())
}

/// Destination named by a flow file: the file name up to its first `.`.
fn destination_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.split('.').next().filter(|s| !s.is_empty())
}

fn parse_f64(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn open(path: &Path) -> SceneResult<File> {
    Ok(File::open(path).with_context(|| format!("open '{}'", path.display()))?)
}

/// Input files for a full load.
#[derive(Clone, Debug, Default)]
pub struct SourcePaths {
    /// Confirmed-cases table.
    pub infections: PathBuf,
    /// Recovered table.
    pub recovered: PathBuf,
    /// Deaths table.
    pub deaths: PathBuf,
    /// Country centroid table (required when `flows` is set).
    pub centroids: Option<PathBuf>,
    /// Directory of per-destination flow files.
    pub flows: Option<PathBuf>,
}

/// Row accounting for a full load.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    /// Per-category table accounting.
    pub categories: BTreeMap<Category, TableReport>,
    /// Centroid table accounting, when one was read.
    pub centroids: Option<TableReport>,
    /// Flow build accounting, when flows were read.
    pub flows: Option<FlowBuildReport>,
}

impl LoadReport {
    /// Total rows dropped across every table.
    pub fn rows_skipped(&self) -> usize {
        self.categories
            .values()
            .map(|r| r.rows_skipped)
            .sum::<usize>()
            + self.centroids.map_or(0, |r| r.rows_skipped)
            + self.flows.map_or(0, |r| r.skipped())
    }
}

/// Everything a scene needs, loaded from disk.
#[derive(Clone, Debug)]
pub struct LoadedSources {
    /// Case series.
    pub dataset: Dataset,
    /// Migration flows (empty when no flow inputs were given).
    pub flows: FlowGraph,
    /// Skipped-row accounting.
    pub report: LoadReport,
}

/// Load every table named by `paths`.
#[tracing::instrument(skip_all)]
pub fn load(paths: &SourcePaths) -> SceneResult<LoadedSources> {
    let mut builder = Dataset::builder();
    let mut report = LoadReport::default();

    for (category, path) in [
        (Category::Infections, &paths.infections),
        (Category::Recovered, &paths.recovered),
        (Category::Deaths, &paths.deaths),
    ] {
        let table = read_category_table(open(path)?, category, &mut builder)?;
        report.categories.insert(category, table);
    }
    let dataset = builder.build()?;

    let centroids = match &paths.centroids {
        Some(path) => {
            let (table, table_report) = read_centroid_table(open(path)?)?;
            report.centroids = Some(table_report);
            Some(table)
        }
        None => None,
    };

    let flows = match (&paths.flows, &centroids) {
        (Some(dir), Some(centroids)) => {
            let (graph, flow_report) = read_flow_dir(dir, centroids)?;
            report.flows = Some(flow_report);
            graph
        }
        (Some(_), None) => {
            return Err(SceneError::validation(
                "a flow directory needs a centroid table",
            ));
        }
        (None, _) => FlowGraph::new(),
    };

    tracing::info!(
        locations = dataset.location_count(),
        num_dates = dataset.num_dates(),
        edges = flows.len(),
        max_weight = flows.max_weight(),
        "loaded inputs"
    );
    let skipped = report.rows_skipped();
    if skipped > 0 {
        tracing::warn!(skipped, "dropped unusable input rows");
    }

    Ok(LoadedSources {
        dataset,
        flows,
        report,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/data/loader.rs"]
mod tests;
