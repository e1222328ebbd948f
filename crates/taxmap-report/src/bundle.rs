//! Joined-table export and the zip bundle.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use taxmap_model::Amount;
use taxmap_transform::JoinedMap;

const CSV_HEADER: [&str; 6] = [
    "il",
    "kaynak_il",
    "tahakkuk",
    "tahsilat",
    "tahsilat_orani",
    "bildirilen_oran",
];

fn amount_field(amount: Amount) -> String {
    amount.value().map(|value| format!("{value:.2}")).unwrap_or_default()
}

/// Writes one CSV line per map province; missing values are empty fields.
pub fn joined_csv(joined: &JoinedMap<'_>) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in &joined.records {
        writer.write_record([
            record.name().to_string(),
            record.source_province.clone().unwrap_or_default(),
            amount_field(record.accrual),
            amount_field(record.collection),
            amount_field(record.ratio),
            amount_field(record.reported_ratio),
        ])?;
    }
    writer.into_inner().context("flush joined csv")
}

/// Packs named files into an in-memory zip archive, in the given order.
pub fn build_archive<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, bytes) in entries {
            zip.start_file(name, options)
                .with_context(|| format!("add {name} to archive"))?;
            zip.write_all(bytes)
                .with_context(|| format!("write {name} to archive"))?;
        }
        zip.finish().context("finish archive")?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use taxmap_geo::{ProvinceMap, ProvinceShape};
    use taxmap_model::SelectionRow;
    use taxmap_transform::join_selection;

    #[test]
    fn csv_keeps_unmatched_provinces() {
        let map = ProvinceMap::new(vec![
            ProvinceShape::new("Adiyaman", vec![]),
            ProvinceShape::new("Bolu", vec![]),
        ]);
        let rows = vec![SelectionRow {
            province: "Adıyaman".to_string(),
            accrual: Amount::Number(200.0),
            collection: Amount::Number(150.0),
            reported_ratio: Amount::Number(75.0),
        }];
        let joined = join_selection(&map, &rows);

        let csv = String::from_utf8(joined_csv(&joined).unwrap()).unwrap();
        insta::assert_snapshot!(csv.trim_end(), @r"
        il,kaynak_il,tahakkuk,tahsilat,tahsilat_orani,bildirilen_oran
        Adiyaman,Adıyaman,200.00,150.00,75.00,75.00
        Bolu,,,,,
        ");
    }

    #[test]
    fn archive_holds_every_entry() {
        let archive = build_archive([
            ("a.svg", b"<svg/>".as_slice()),
            ("b.csv", b"il\n".as_slice()),
        ])
        .unwrap();

        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(zip.len(), 2);
        let mut contents = String::new();
        zip.by_name("a.svg")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "<svg/>");
    }
}
