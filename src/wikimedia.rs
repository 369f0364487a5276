//! Image resolution against Wikimedia Commons.
//!
//! A file reference found in a table row is translated into a direct download
//! URL through the Commons `imageinfo` API, then fetched and normalized to
//! JPEG by an external ImageMagick executable, which is invoked a second time
//! to produce a 320px-wide thumbnail. Every failure along the way degrades to
//! "no image" for the row; nothing is retried and partial results are
//! discarded.

use crate::config::{COMMONS_API_URL, THUMB_RESIZE};
use crate::models::ImagePaths;
use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Seam between the table pipeline and the network/subprocess collaborators.
///
/// `row` is the 1-based position of the row within the extracted sequence;
/// downloaded files are named from the 0-based position (`m{N}.jpg`).
pub trait ImageResolver {
    fn resolve(&self, file_name: &str, row: usize) -> Option<ImagePaths>;
}

/// Resolver used with `--skip-images`: every row presents as having no image.
pub struct DisabledResolver;

impl ImageResolver for DisabledResolver {
    fn resolve(&self, _file_name: &str, _row: usize) -> Option<ImagePaths> {
        None
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    query: Option<QuerySection>,
}

#[derive(Deserialize)]
struct QuerySection {
    #[serde(deserialize_with = "pages_in_order")]
    pages: Vec<PageEntry>,
}

#[derive(Deserialize)]
struct PageEntry {
    imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Deserialize)]
struct ImageInfo {
    url: String,
}

/// The `pages` object is keyed by page ID; the IDs themselves are irrelevant,
/// but "first page entry" must follow document order, so the map is collected
/// into a Vec as encountered rather than through a hash map.
fn pages_in_order<'de, D>(deserializer: D) -> Result<Vec<PageEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PagesVisitor;

    impl<'de> Visitor<'de> for PagesVisitor {
        type Value = Vec<PageEntry>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of page entries")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pages = Vec::new();
            while let Some((_, page)) = map.next_entry::<IgnoredAny, PageEntry>()? {
                pages.push(page);
            }
            Ok(pages)
        }
    }

    deserializer.deserialize_map(PagesVisitor)
}

/// URL of the first page entry that carries image info, if any.
fn first_image_url(response: ApiResponse) -> Option<String> {
    response
        .query?
        .pages
        .into_iter()
        .find_map(|page| page.imageinfo.and_then(|infos| infos.into_iter().next()))
        .map(|info| info.url)
}

pub struct WikimediaResolver {
    client: Client,
    api_url: String,
    images_dir: PathBuf,
    magick: PathBuf,
}

impl WikimediaResolver {
    pub fn new(images_dir: &Path, magick: &Path) -> Result<Self> {
        Self::with_endpoint(COMMONS_API_URL, images_dir, magick)
    }

    pub fn with_endpoint(api_url: &str, images_dir: &Path, magick: &Path) -> Result<Self> {
        fs::create_dir_all(images_dir)
            .with_context(|| format!("Failed to create images directory: {}", images_dir.display()))?;
        // No request timeout: a hung lookup blocks the run rather than
        // producing a spurious "no image".
        let client = Client::builder()
            .timeout(None)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_url: api_url.to_string(),
            images_dir: images_dir.to_path_buf(),
            magick: magick.to_path_buf(),
        })
    }

    /// One GET against the Commons API, extracting the direct image URL.
    pub fn fetch_image_url(&self, file_name: &str) -> Result<Option<String>> {
        let title = format!("File:{file_name}");
        let response: ApiResponse = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "imageinfo"),
                ("iiprop", "url"),
                ("titles", title.as_str()),
            ])
            .send()
            .with_context(|| format!("imageinfo request failed for {title}"))?
            .error_for_status()
            .with_context(|| format!("imageinfo request rejected for {title}"))?
            .json()
            .with_context(|| format!("imageinfo response unparsable for {title}"))?;
        Ok(first_image_url(response))
    }

    fn convert(&self, source: &str, dest: &Path) -> Result<()> {
        let status = Command::new(&self.magick)
            .arg(source)
            .arg(dest)
            .status()
            .with_context(|| format!("Failed to run {}", self.magick.display()))?;
        if !status.success() {
            bail!("magick exited with {status} converting {source}");
        }
        Ok(())
    }

    fn thumbnail(&self, source: &Path, dest: &Path) -> Result<()> {
        let status = Command::new(&self.magick)
            .arg(source)
            .args(["-resize", THUMB_RESIZE])
            .arg(dest)
            .status()
            .with_context(|| format!("Failed to run {}", self.magick.display()))?;
        if !status.success() {
            bail!("magick exited with {status} resizing {}", source.display());
        }
        Ok(())
    }
}

impl ImageResolver for WikimediaResolver {
    fn resolve(&self, file_name: &str, row: usize) -> Option<ImagePaths> {
        let url = match self.fetch_image_url(file_name) {
            Ok(Some(url)) => url,
            Ok(None) => {
                warn!(file = file_name, "No image info in Commons response");
                return None;
            }
            Err(e) => {
                warn!(file = file_name, error = %e, "Commons lookup failed");
                return None;
            }
        };
        debug!(file = file_name, url = %url, "Resolved image URL");

        let index = row - 1;
        let full = self.images_dir.join(format!("m{index}.jpg"));
        let thumb = self.images_dir.join(format!("m{index}_small.jpg"));

        if let Err(e) = self.convert(&url, &full) {
            warn!(file = file_name, error = %e, "Image conversion failed");
            return None;
        }
        if let Err(e) = self.thumbnail(&full, &thumb) {
            warn!(file = file_name, error = %e, "Thumbnail conversion failed");
            return None;
        }

        Some(ImagePaths {
            full: full.to_string_lossy().into_owned(),
            thumb: thumb.to_string_lossy().into_owned(),
        })
    }
}
