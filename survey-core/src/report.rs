use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::model::WeatherRecord;

pub const CSV_FILE_NAME: &str = "weather_data.csv";

/// Column names, matching the serde renames on `WeatherRecord` field
/// for field.
pub const CSV_HEADER: [&str; 9] = [
    "City",
    "Cloudiness",
    "Country",
    "Date",
    "Humidity",
    "Lat",
    "Lng",
    "Max Temp",
    "Wind Speed",
];

/// Serialize the dataset to CSV. The header row is written explicitly
/// so even an empty dataset carries the column names; output is
/// deterministic for a given dataset.
pub fn write_csv<W: Write>(writer: W, records: &[WeatherRecord]) -> Result<()> {
    let mut w = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    w.write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    for record in records {
        w.serialize(record)
            .context("Failed to serialize weather record to CSV")?;
    }

    w.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write the dataset to `<dir>/weather_data.csv`. An unwritable
/// destination is fatal for the run; the error propagates uncaught.
pub fn write_csv_file(dir: &Path, records: &[WeatherRecord]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(CSV_FILE_NAME);
    let file = fs::File::create(&path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    write_csv(file, records)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{WeatherObservation, WeatherRecord};

    fn record(city: &str, observed_at: i64) -> WeatherRecord {
        WeatherRecord::fetched(
            city,
            WeatherObservation {
                cloudiness: 75,
                country: "NZ".to_string(),
                observed_at,
                humidity: 81,
                latitude: -46.19,
                longitude: 168.86,
                max_temp: 55.4,
                wind_speed: 12.66,
            },
        )
    }

    fn to_csv(records: &[WeatherRecord]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_matches_the_fixed_column_order() {
        let out = to_csv(&[record("mataura", 1_700_000_000)]);
        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "City,Cloudiness,Country,Date,Humidity,Lat,Lng,Max Temp,Wind Speed"
        );
    }

    #[test]
    fn every_row_has_a_nonempty_date_column() {
        let records = vec![record("mataura", 1_700_000_000), record("rikitea", 1_700_000_100)];
        let out = to_csv(&records);

        for line in out.lines().skip(1) {
            let date = line.split(',').nth(3).unwrap();
            assert!(!date.is_empty());
        }
    }

    #[test]
    fn identical_datasets_serialize_to_identical_bytes() {
        let records = vec![record("mataura", 1_700_000_000), record("rikitea", 1_700_000_100)];

        let mut a = Vec::new();
        let mut b = Vec::new();
        write_csv(&mut a, &records).unwrap();
        write_csv(&mut b, &records).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset_still_gets_a_header_row() {
        let out = to_csv(&[]);
        assert_eq!(
            out,
            "City,Cloudiness,Country,Date,Humidity,Lat,Lng,Max Temp,Wind Speed\n"
        );
    }
}
