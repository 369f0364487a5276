/// Minimum number of cells a split row must yield to be considered valid
pub const MIN_CELLS: usize = 11;

/// Resize directive handed to ImageMagick for thumbnails (320px wide)
pub const THUMB_RESIZE: &str = "320x";

/// Wikimedia Commons API endpoint for imageinfo lookups
pub const COMMONS_API_URL: &str = "https://commons.wikimedia.org/w/api.php";

/// Default location of the ImageMagick executable
pub const DEFAULT_MAGICK: &str = "./magick";

/// Default directory for downloaded images
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Default input and output paths
pub const DEFAULT_INPUT: &str = "table.txt";
pub const DEFAULT_OUTPUT: &str = "messier_objects.csv";
