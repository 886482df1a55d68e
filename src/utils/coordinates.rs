/// Whether a WKT definition (as found in a .prj file) already describes geographic WGS84.
///
/// Projected systems wrap their GEOGCS in a PROJCS, so only a bare GEOGCS whose datum is
/// WGS 1984 qualifies.
pub fn is_geographic_wgs84_wkt(wkt: &str) -> bool {
    let normalized: String = wkt
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if normalized.is_empty() {
        return false;
    }

    let geographic = normalized.starts_with("GEOGCS[") || normalized.starts_with("GEOGCRS[");
    let wgs84_datum = normalized.contains("WGS_1984")
        || normalized.contains("WGS84")
        || normalized.contains("\"WGS1984\"")
        || normalized.contains("WORLDGEODETICSYSTEM1984");

    geographic && wgs84_datum
}
