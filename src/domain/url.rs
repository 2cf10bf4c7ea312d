//! Share URL parsing: file/layer identifiers and link classification.

use url::Url;

use crate::domain::entities::FileLocator;

/// Query parameter carrying the layer id in full share URLs.
const LAYER_ID_PARAM: &str = "layer_id";

/// Path marker of short (redirecting) share links.
const SHORT_LINK_MARKER: &str = "/goto/";

/// Path marker of full file URLs.
const FILE_MARKER: &str = "/file/";

/// Host substring identifying MasterGo deployments.
const HOST_MARKER: &str = "mastergo";

/// Extract `(fileId, layerId)` from a full share URL.
///
/// `fileId` is the first path segment made only of ASCII digits, `layerId` the
/// first `layer_id` query value. Returns `None` if either is missing or the
/// input is not an absolute URL.
///
/// ```
/// use mgdsl::domain::url::parse_file_url;
///
/// let ids = parse_file_url("https://mastergo.com/file/155675508499265?layer_id=158:0002").unwrap();
/// assert_eq!(ids.file_id, "155675508499265");
/// assert_eq!(ids.layer_id, "158:0002");
/// ```
pub fn parse_file_url(url: &str) -> Option<FileLocator> {
    let parsed = Url::parse(url).ok()?;

    let file_id = parsed
        .path()
        .split('/')
        .find(|segment| is_numeric_segment(segment))?
        .to_string();

    let layer_id = parsed
        .query_pairs()
        .find(|(key, _)| key == LAYER_ID_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())?;

    Some(FileLocator { file_id, layer_id })
}

/// True if the URL is a short link that must be resolved by redirect.
///
/// Plain containment test on the raw input.
pub fn is_short_link(url: &str) -> bool {
    url.contains(SHORT_LINK_MARKER)
}

/// True if the URL points at a MasterGo host with a short-link or file path.
pub fn is_valid_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let host_matches = parsed
        .host_str()
        .is_some_and(|host| host.contains(HOST_MARKER));
    let path = parsed.path();
    host_matches && (path.contains(SHORT_LINK_MARKER) || path.contains(FILE_MARKER))
}

fn is_numeric_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}
