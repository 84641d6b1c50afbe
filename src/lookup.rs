//! Static vessel details for the MMSIs of a trajectories file.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::AisFileError;
use crate::model::{Column, VesselInfo};
use crate::process::derived_path;
use crate::reader;

pub const VESSELS_SUFFIX: &str = "_vessels";

const OUTPUT_HEADER: [&str; 6] = [
    "mmsi",
    "Type of mobile",
    "MMSI",
    "Callsign",
    "Name",
    "Ship type",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub trajectories: PathBuf,
    pub ais: PathBuf,
    pub output: Option<PathBuf>,
}

impl LookupConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derived_path(&self.trajectories, VESSELS_SUFFIX))
    }
}

/// One joined row; `vessel` is `None` when the day file has nothing for `mmsi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRow {
    pub mmsi: u64,
    pub vessel: Option<VesselInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSummary {
    pub output: PathBuf,
    pub trajectories: usize,
    pub rows: usize,
    pub unmatched: usize,
}

/// The `mmsi` column of a trajectories file, in file order.
pub fn read_trajectory_mmsis(path: &Path) -> Result<Vec<u64>, AisFileError> {
    let (mut rdr, headers) = reader::open(path)?;
    let index = reader::column_indices(path, &headers, &["mmsi"])?[0];

    let mut mmsis = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| reader::read_error(path, e))?;
        mmsis.push(parse_mmsi(path, &row, row.get(index).unwrap_or_default())?);
    }
    Ok(mmsis)
}

/// Complete, de-duplicated vessel rows of an AIS day file.
///
/// Rows with any of the five fields empty are skipped; repeats keep their
/// first position.
pub fn read_vessel_info(path: &Path) -> Result<Vec<VesselInfo>, AisFileError> {
    let columns = [
        Column::MobileType,
        Column::Mmsi,
        Column::Callsign,
        Column::Name,
        Column::ShipType,
    ];
    let names: Vec<&str> = columns.iter().map(|c| c.header()).collect();

    let (mut rdr, headers) = reader::open(path)?;
    let idx = reader::column_indices(path, &headers, &names)?;

    let mut seen = HashSet::new();
    let mut vessels = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| reader::read_error(path, e))?;
        let values: Vec<&str> = idx.iter().map(|i| row.get(*i).unwrap_or_default()).collect();
        if values.iter().any(|v| v.trim().is_empty()) {
            continue;
        }

        let vessel = VesselInfo {
            mobile_type: values[0].to_string(),
            mmsi: parse_mmsi(path, &row, values[1])?,
            callsign: values[2].to_string(),
            name: values[3].to_string(),
            ship_type: values[4].to_string(),
        };
        if seen.insert(vessel.clone()) {
            vessels.push(vessel);
        }
    }
    Ok(vessels)
}

fn parse_mmsi(path: &Path, row: &csv::StringRecord, value: &str) -> Result<u64, AisFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| AisFileError::InputParse {
            path: path.to_path_buf(),
            line: reader::line_of(row),
            reason: format!("non-numeric mmsi `{value}`"),
        })
}

/// Left join: every trajectory MMSI appears once per matching vessel row,
/// or once with no vessel.
pub fn join(mmsis: &[u64], vessels: &[VesselInfo]) -> Vec<LookupRow> {
    let mut by_mmsi: HashMap<u64, Vec<&VesselInfo>> = HashMap::new();
    for vessel in vessels {
        by_mmsi.entry(vessel.mmsi).or_default().push(vessel);
    }

    let mut rows = Vec::with_capacity(mmsis.len());
    for mmsi in mmsis {
        match by_mmsi.get(mmsi) {
            Some(matches) => rows.extend(matches.iter().map(|v| LookupRow {
                mmsi: *mmsi,
                vessel: Some((*v).clone()),
            })),
            None => rows.push(LookupRow {
                mmsi: *mmsi,
                vessel: None,
            }),
        }
    }
    rows
}

pub fn write_lookup(path: &Path, rows: &[LookupRow]) -> Result<(), AisFileError> {
    let write_error = |source: csv::Error| AisFileError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(write_error)?;

    wtr.write_record(OUTPUT_HEADER).map_err(write_error)?;
    for row in rows {
        let record = match &row.vessel {
            Some(v) => [
                row.mmsi.to_string(),
                v.mobile_type.clone(),
                v.mmsi.to_string(),
                v.callsign.clone(),
                v.name.clone(),
                v.ship_type.clone(),
            ],
            None => [
                row.mmsi.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        };
        wtr.write_record(&record).map_err(write_error)?;
    }
    wtr.flush().map_err(|e| write_error(e.into()))?;

    Ok(())
}

pub fn lookup_vessels(config: &LookupConfig) -> Result<LookupSummary, AisFileError> {
    let mmsis = read_trajectory_mmsis(&config.trajectories)?;
    let vessels = read_vessel_info(&config.ais)?;
    let rows = join(&mmsis, &vessels);

    let output = config.output_path();
    write_lookup(&output, &rows)?;

    let unmatched = rows.iter().filter(|r| r.vessel.is_none()).count();
    info!(
        "{} trajectories joined against {} vessels: {} rows, {} without match, written to {}",
        mmsis.len(),
        vessels.len(),
        rows.len(),
        unmatched,
        output.display()
    );

    Ok(LookupSummary {
        output,
        trajectories: mmsis.len(),
        rows: rows.len(),
        unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vessel(mmsi: u64, name: &str) -> VesselInfo {
        VesselInfo {
            mobile_type: "Class A".into(),
            mmsi,
            callsign: "OXAB2".into(),
            name: name.into(),
            ship_type: "Cargo".into(),
        }
    }

    #[test]
    fn join_keeps_left_order_and_unmatched() {
        let vessels = vec![vessel(2, "B"), vessel(1, "A"), vessel(2, "B2")];
        let rows = join(&[1, 3, 2], &vessels);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].vessel.as_ref().unwrap().name, "A");
        assert_eq!(rows[1], LookupRow { mmsi: 3, vessel: None });
        assert_eq!(rows[2].vessel.as_ref().unwrap().name, "B");
        assert_eq!(rows[3].vessel.as_ref().unwrap().name, "B2");
    }

    #[test]
    fn vessel_rows_drop_incomplete_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aisdk_20201021.csv");
        std::fs::write(
            &path,
            "# Timestamp,Type of mobile,MMSI,Callsign,Name,Ship type\n\
             t0,Class A,219000001,OXAB2,SKAGEN,Cargo\n\
             t1,Class A,219000001,OXAB2,SKAGEN,Cargo\n\
             t2,Class B,219000002,,,Sailing\n\
             t3,Class B,219000003,OU1234,LAILA,Pleasure\n",
        )
        .unwrap();

        let vessels = read_vessel_info(&path).unwrap();
        assert_eq!(
            vessels.iter().map(|v| v.mmsi).collect::<Vec<_>>(),
            vec![219000001, 219000003]
        );
    }

    #[test]
    fn default_output_next_to_trajectories() {
        let config = LookupConfig {
            trajectories: PathBuf::from("data/trajectories.csv"),
            ais: PathBuf::from("data/aisdk_20201021.csv"),
            output: None,
        };
        assert_eq!(config.output_path(), PathBuf::from("data/trajectories_vessels.csv"));
    }

    #[test]
    fn non_numeric_trajectory_mmsi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectories.csv");
        std::fs::write(&path, "mmsi,points\n219000001,4\nunknown,2\n").unwrap();

        let err = read_trajectory_mmsis(&path).unwrap_err();
        assert!(matches!(err, AisFileError::InputParse { line: 3, .. }));
    }
}
