/// Number of hour buckets processed per run (hours 0 through 22).
pub const HOUR_COUNT: u8 = 23;

/// Minimum candidate count in one hour to use Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Default run log file name.
pub const DEFAULT_LOG_FILE: &str = "log.csv";

/// First line of every run log.
pub const LOG_HEADER: &str = "file,real,imaginary,x,y";

/// Prefix of the per-hour marker line in the run log.
pub const LOG_HOUR_PREFIX: &str = "Hour ";

/// Prefix of the per-hour output directory name (`shifted07`).
pub const SHIFTED_DIR_PREFIX: &str = "shifted";

/// Suffix every reference file name must end with.
pub const REFERENCE_SUFFIX: &str = "jpg";

/// Default JPEG quality for shifted output images.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// ITU-R BT.601 luminance weights in 16-bit fixed point (R, G, B).
/// They sum to 65536, so a white pixel maps to exactly 255.
pub const LUMINANCE_WEIGHTS: [u32; 3] = [19_595, 38_470, 7_471];

/// Rounding term added before the 16-bit shift in luminance conversion.
pub const LUMINANCE_ROUNDING: u32 = 0x8000;
