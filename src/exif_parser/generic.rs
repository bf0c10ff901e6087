use exif::{Exif, Field, In, Tag, Value};

use crate::coordinate::{signed_decimal, Hemisphere};

/// Reads one GPS axis as signed decimal degrees.
///
/// `coord_tag` holds the degree/minute/second rationals and `ref_tag` the
/// hemisphere letter. S/W references negate the value; a missing or
/// unrecognised reference leaves it positive.
pub fn get_gps_coord(exif: &Exif, coord_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let coord_field = exif.get_field(coord_tag, In::PRIMARY)?;
    let dms = rational_triple(&coord_field.value)?;

    let hemisphere = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(hemisphere_of);

    let decimal = signed_decimal(dms, hemisphere);
    decimal.is_finite().then_some(decimal)
}

// Zero denominators come out of to_f64() as inf/NaN and are rejected here
fn rational_triple(value: &Value) -> Option<[f64; 3]> {
    let parts: Vec<f64> = match value {
        Value::Rational(vec) => vec.iter().map(|r| r.to_f64()).collect(),
        Value::SRational(vec) => vec.iter().map(|r| r.to_f64()).collect(),
        _ => return None,
    };

    match parts.as_slice() {
        [d, m, s, ..] if d.is_finite() && m.is_finite() && s.is_finite() => Some([*d, *m, *s]),
        _ => None,
    }
}

fn hemisphere_of(field: &Field) -> Option<Hemisphere> {
    if let Value::Ascii(ref vec) = field.value {
        let raw = vec.first()?;
        let text = std::str::from_utf8(raw).ok()?;
        return Hemisphere::from_ref(text);
    }
    None
}
