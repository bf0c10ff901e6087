#![allow(dead_code)]

use axum::Router;
use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image_location_finder::ReverseGeocoder;

pub type Dms = [(u32, u32); 3];

pub const EIFFEL_LAT: Dms = [(48, 1), (51, 1), (295, 10)];
pub const EIFFEL_LON: Dms = [(2, 1), (17, 1), (402, 10)];

fn rationals(dms: Dms) -> Value {
    Value::Rational(
        dms.iter()
            .map(|&(num, denom)| Rational { num, denom })
            .collect(),
    )
}

fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

pub fn description_field() -> Field {
    field(Tag::ImageDescription, ascii("test fixture"))
}

/// GPS fields for one position; `None` references are left out
pub fn gps_fields(lat: Dms, lat_ref: Option<&str>, lon: Dms, lon_ref: Option<&str>) -> Vec<Field> {
    let mut fields = vec![
        field(Tag::GPSLatitude, rationals(lat)),
        field(Tag::GPSLongitude, rationals(lon)),
    ];
    if let Some(r) = lat_ref {
        fields.push(field(Tag::GPSLatitudeRef, ascii(r)));
    }
    if let Some(r) = lon_ref {
        fields.push(field(Tag::GPSLongitudeRef, ascii(r)));
    }
    fields
}

/// Serializes fields into a big-endian TIFF/EXIF block
pub fn tiff_block(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for f in fields {
        writer.push_field(f);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).expect("failed to encode EXIF");
    buf.into_inner()
}

/// Smallest JPEG container the EXIF reader accepts: SOI, APP1 "Exif", EOI
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("EXIF block too large");
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub fn jpeg_without_exif() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("failed to write fixture");
    path
}

pub fn write_gps_jpeg(
    dir: &Path,
    name: &str,
    lat: Dms,
    lat_ref: Option<&str>,
    lon: Dms,
    lon_ref: Option<&str>,
) -> PathBuf {
    let mut fields = vec![description_field()];
    fields.extend(gps_fields(lat, lat_ref, lon, lon_ref));
    write_file(dir, name, &jpeg_with_exif(&tiff_block(&fields)))
}

/// JPEG tagged with the Eiffel Tower position, north-east
pub fn eiffel_jpeg(dir: &Path, name: &str) -> PathBuf {
    write_gps_jpeg(dir, name, EIFFEL_LAT, Some("N"), EIFFEL_LON, Some("E"))
}

/// Serves `app` on an ephemeral local port and returns its `/reverse` URL
pub async fn spawn_geocoder(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test geocoder crashed");
    });
    format!("http://{}/reverse", addr)
}

pub fn test_geocoder(endpoint: &str, timeout: Duration) -> ReverseGeocoder {
    let client = reqwest::Client::builder()
        .user_agent("ilf-tests/1.0")
        .timeout(timeout)
        .no_proxy()
        .build()
        .expect("failed to build test client");
    ReverseGeocoder::with_client(client, endpoint)
}
