//! Test fixtures: gzip-compressed aircraft snapshots.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Archive path of a snapshot token, e.g. `/2023/11/01/000005Z.json.gz`.
pub fn archive_path(token: &str) -> String {
    format!("/2023/11/01/{}", token)
}

/// A small readsb-style snapshot taken `second` seconds into the day.
pub fn aircraft_snapshot_json(second: u32) -> String {
    serde_json::json!({
        "now": 1_698_796_800.0 + f64::from(second),
        "messages": 1000 + second,
        "aircraft": [
            {
                "hex": "a1b2c3",
                "flight": "TEST123 ",
                "alt_baro": 35000,
                "lat": 40.6413,
                "lon": -73.7781,
                "emergency": "none"
            }
        ]
    })
    .to_string()
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn gz_snapshot(second: u32) -> Vec<u8> {
    gzip(aircraft_snapshot_json(second).as_bytes())
}
