//! Jurisdiction code → province name lookup.
//!
//! The withholding sheet identifies each gross-income (IIBB) jurisdiction by a
//! numeric code from 1 to 24; the code is the 1-based position in this table.

/// Province names ordered by jurisdiction code (index 0 = code 1).
pub static PROVINCES: [&str; 24] = [
    "CABA",
    "BUENOS AIRES",
    "CATAMARCA",
    "CORDOBA",
    "CORRIENTES",
    "CHACO",
    "CHUBUT",
    "ENTRE RIOS",
    "FORMOSA",
    "JUJUY",
    "LA PAMPA",
    "LA RIOJA",
    "MENDOZA",
    "MISIONES",
    "NEUQUEN",
    "RIO NEGRO",
    "SALTA",
    "SAN JUAN",
    "SAN LUIS",
    "SANTA CRUZ",
    "SANTA FE",
    "SANTIAGO DEL ESTERO",
    "TIERRA DEL FUEGO",
    "TUCUMAN",
];

/// Province name for a jurisdiction code, or `None` outside 1..=24.
pub fn province_name(code: i64) -> Option<&'static str> {
    let index = usize::try_from(code.checked_sub(1)?).ok()?;
    PROVINCES.get(index).copied()
}
