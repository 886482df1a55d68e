use crate::error::{HarvestError, Result};
use crate::models::PanoramaRecord;
use crate::utils::constants::{STATUS_NOT_FOUND, STATUS_OK, STATUS_ZERO_RESULTS};
use serde::Deserialize;

/// What the provider said about one location
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(PanoramaRecord),
    /// Valid answer, but no imagery at that location
    NoPanorama,
}

impl FetchOutcome {
    pub fn record(&self) -> Option<&PanoramaRecord> {
        match self {
            FetchOutcome::Found(record) => Some(record),
            FetchOutcome::NoPanorama => None,
        }
    }
}

/// Parse the XML `cbk` response.
///
/// An empty `<panorama/>` root means no imagery. Otherwise the record lives in the
/// attributes of `<data_properties>`.
pub fn parse_xml_metadata(body: &str) -> Result<FetchOutcome> {
    let doc = roxmltree::Document::parse(body)?;
    let root = doc.root_element();

    if root.tag_name().name() != "panorama" {
        return Err(HarvestError::MalformedResponse(format!(
            "expected <panorama> root, found <{}>",
            root.tag_name().name()
        )));
    }

    if !root.children().any(|n| n.is_element()) {
        return Ok(FetchOutcome::NoPanorama);
    }

    let props = root
        .children()
        .find(|n| n.has_tag_name("data_properties"))
        .ok_or_else(|| {
            HarvestError::MalformedResponse("missing <data_properties>".to_string())
        })?;

    let attribute = |name: &str| {
        props.attribute(name).ok_or_else(|| {
            HarvestError::MalformedResponse(format!("missing attribute '{}'", name))
        })
    };

    let (lng, lat) = (attribute("lng")?, attribute("lat")?);
    let record = PanoramaRecord::from_reported(
        attribute("pano_id")?.to_string(),
        attribute("image_date")?.to_string(),
        lng,
        lat,
    )
    .ok_or_else(|| {
        HarvestError::MalformedResponse(format!("invalid coordinates: lng='{}' lat='{}'", lng, lat))
    })?;

    Ok(FetchOutcome::Found(record))
}

#[derive(Debug, Deserialize)]
struct JsonMetadata {
    status: Option<String>,
    error_message: Option<String>,
    date: Option<String>,
    pano_id: Option<String>,
    location: Option<JsonLocation>,
}

#[derive(Debug, Deserialize)]
struct JsonLocation {
    lat: f64,
    lng: f64,
}

/// Parse the JSON metadata API response.
///
/// `status` is optional; when present, `ZERO_RESULTS` and `NOT_FOUND` mean no imagery and
/// any other non-`OK` value is a provider error.
pub fn parse_json_metadata(body: &str) -> Result<FetchOutcome> {
    let meta: JsonMetadata = serde_json::from_str(body)?;

    match meta.status.as_deref() {
        None | Some(STATUS_OK) => {}
        Some(STATUS_ZERO_RESULTS) | Some(STATUS_NOT_FOUND) => return Ok(FetchOutcome::NoPanorama),
        Some(status) => {
            return Err(HarvestError::Provider {
                status: status.to_string(),
                message: meta.error_message.unwrap_or_default(),
            })
        }
    }

    let missing = |field: &str| HarvestError::MalformedResponse(format!("missing '{}'", field));

    let pano_id = meta.pano_id.ok_or_else(|| missing("pano_id"))?;
    let date = meta.date.ok_or_else(|| missing("date"))?;
    let location = meta.location.ok_or_else(|| missing("location"))?;

    Ok(FetchOutcome::Found(PanoramaRecord::new(
        pano_id,
        date,
        location.lng,
        location.lat,
    )))
}
