// Library interface for wordrun
// Exposes the run counter and its backends for the CLI, fuzz targets and external crates

pub mod counter;
mod error;
#[cfg(target_arch = "aarch64")]
mod wc_arm64;
pub mod wc_default;
#[cfg(test)]
mod wc_default_test;
pub mod wc_parallel;
pub mod wc_pattern;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod wc_x86;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

pub use counter::{DEFAULT_BUFFER_SIZE, RunCounter, count_reader};
pub use error::InputError;

use crate::wc_default::ScanResult;

/// Count words (maximal runs of non-whitespace bytes) in `content`.
///
/// Uses the fastest scan the current CPU supports; every backend returns the same count.
///
/// # Example
/// ```
/// assert_eq!(wordrun::count(b""), 0);
/// assert_eq!(wordrun::count(b"  hello   world  "), 2);
/// assert_eq!(wordrun::count(b"a\nb\tc\r\nd"), 4);
/// assert_eq!(wordrun::count(&[0xFF, 0x20, 0xFE]), 2);
/// ```
pub fn count(content: &[u8]) -> usize {
    CountingBackend::detect().count_words(content)
}

// Private marker to prevent external construction of CountingBackend variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Private;

/// Scan implementation used for counting.
///
/// **IMPORTANT**: Variants cannot be constructed directly from outside this crate
/// due to the private `Private` field. Use `CountingBackend::detect()` to obtain a backend
/// supported by the current CPU.
#[allow(private_interfaces)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountingBackend {
    /// AVX2 256-bit vectors (x86/x86_64)
    Avx2(Private),
    /// SSE2 128-bit vectors (x86/x86_64)
    Sse2(Private),
    /// ARM NEON 128-bit vectors (aarch64)
    Neon(Private),
    /// Scalar linear scan, available everywhere
    Scalar(Private),
}

impl std::fmt::Display for CountingBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountingBackend::Avx2(_) => write!(f, "AVX2"),
            CountingBackend::Sse2(_) => write!(f, "SSE2"),
            CountingBackend::Neon(_) => write!(f, "NEON"),
            CountingBackend::Scalar(_) => write!(f, "Scalar"),
        }
    }
}

impl Default for CountingBackend {
    fn default() -> Self {
        Self::detect()
    }
}

impl CountingBackend {
    /// Detect the fastest backend supported by the current CPU at runtime.
    ///
    /// # Example
    /// ```
    /// use wordrun::CountingBackend;
    ///
    /// let backend = CountingBackend::detect();
    /// println!("Using backend: {}", backend);
    /// assert_eq!(backend.count_words(b"hello world\n"), 2);
    /// ```
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            if is_x86_feature_detected!("avx2") {
                return CountingBackend::Avx2(Private);
            } else if is_x86_feature_detected!("sse2") {
                return CountingBackend::Sse2(Private);
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                return CountingBackend::Neon(Private);
            }
        }

        CountingBackend::Scalar(Private)
    }

    /// The scalar reference scan. Safe on every CPU.
    pub fn scalar() -> Self {
        CountingBackend::Scalar(Private)
    }

    /// Construct a specific backend for consistency testing.
    ///
    /// # Safety
    ///
    /// **DANGER**: Caller MUST verify the CPU supports the requested feature
    /// BEFORE calling `count_words()`, or the program will crash with SIGILL
    /// (illegal instruction).
    ///
    /// # Example
    /// ```ignore
    /// #[cfg(target_arch = "x86_64")]
    /// if is_x86_feature_detected!("avx2") {
    ///     let backend = unsafe { CountingBackend::new_unchecked("avx2") }.unwrap();
    ///     let words = backend.count_words(data);
    /// }
    /// ```
    ///
    /// # Parameters
    /// - `backend_type`: One of: "scalar", "sse2", "avx2", "neon"
    ///
    /// # Returns
    /// - `Some(backend)` if the backend name is valid
    /// - `None` if the backend name is invalid
    pub unsafe fn new_unchecked(backend_type: &str) -> Option<Self> {
        match backend_type {
            "scalar" => Some(CountingBackend::Scalar(Private)),
            "sse2" => Some(CountingBackend::Sse2(Private)),
            "avx2" => Some(CountingBackend::Avx2(Private)),
            "neon" => Some(CountingBackend::Neon(Private)),
            _ => None,
        }
    }

    /// Count words in `content` using this backend.
    ///
    /// # Example
    /// ```
    /// use wordrun::CountingBackend;
    ///
    /// let backend = CountingBackend::detect();
    /// assert_eq!(backend.count_words(b"  one \t two\x0bthree\x0c "), 3);
    /// ```
    pub fn count_words(&self, content: &[u8]) -> usize {
        self.count_words_with_state(content, true).words
    }

    /// Scan `content` as the continuation of a previous scan whose last byte was whitespace
    /// iff `seen_space` (use `true` at start of input).
    pub(crate) fn count_words_with_state(&self, content: &[u8], seen_space: bool) -> ScanResult {
        match self {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            CountingBackend::Avx2(_) => unsafe { wc_x86::count_words_avx2(content, seen_space) },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            CountingBackend::Sse2(_) => unsafe { wc_x86::count_words_sse2(content, seen_space) },
            #[cfg(target_arch = "aarch64")]
            CountingBackend::Neon(_) => unsafe { wc_arm64::count_words_neon(content, seen_space) },
            _ => wc_default::count_words_scalar_with_state(content, seen_space),
        }
    }
}

/// How the input is counted. All strategies produce the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Strategy {
    /// Fastest detected SIMD scan over the whole buffer
    #[default]
    Simd,
    /// Scalar linear scan over the whole buffer
    Scalar,
    /// Count matches of the non-whitespace run pattern
    Pattern,
    /// Split the buffer across threads, seeding each chunk from the byte before it
    Parallel,
    /// Read and scan fixed-size chunks, carrying state across reads
    Stream,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Simd => "simd",
            Strategy::Scalar => "scalar",
            Strategy::Pattern => "pattern",
            Strategy::Parallel => "parallel",
            Strategy::Stream => "stream",
        };
        f.write_str(name)
    }
}

/// Counting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOptions {
    pub strategy: Strategy,
    /// Worker count for `Strategy::Parallel`; `None` uses `wc_parallel::default_threads()`
    pub threads: Option<usize>,
    /// Read size for `Strategy::Stream`
    pub buffer_size: usize,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            threads: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Count words in an in-memory buffer with the configured strategy.
///
/// # Example
/// ```
/// use wordrun::{CountOptions, Strategy, count_with};
///
/// let options = CountOptions { strategy: Strategy::Stream, buffer_size: 3, ..Default::default() };
/// assert_eq!(count_with(b"hello world", &options), 2);
/// ```
pub fn count_with(content: &[u8], options: &CountOptions) -> usize {
    debug!(strategy = %options.strategy, bytes = content.len(), "counting buffer");

    match options.strategy {
        Strategy::Simd => {
            let backend = CountingBackend::detect();
            debug!(%backend, "selected backend");
            backend.count_words(content)
        }
        Strategy::Scalar => wc_default::count_words_scalar(content),
        Strategy::Pattern => wc_pattern::count_words_pattern(content),
        Strategy::Parallel => {
            let threads = options.threads.unwrap_or_else(wc_parallel::default_threads);
            wc_parallel::count_words_parallel(content, threads)
        }
        Strategy::Stream => {
            let mut counter = RunCounter::new();
            for chunk in content.chunks(options.buffer_size.max(1)) {
                counter.update(chunk);
            }
            counter.words()
        }
    }
}

/// Count words in the file at `path` (or standard input when `path` is `-`).
///
/// `Strategy::Stream` reads the input in `buffer_size` pieces; every other strategy reads
/// the whole input first.
pub fn count_path(path: &Path, options: &CountOptions) -> Result<usize, InputError> {
    let is_stdin = path.as_os_str() == "-";

    if options.strategy == Strategy::Stream {
        debug!(path = %path.display(), buffer_size = options.buffer_size, "streaming input");
        let words = if is_stdin {
            count_reader(io::stdin().lock(), options.buffer_size).map_err(InputError::Stdin)?
        } else {
            let file = open_file(path)?;
            count_reader(file, options.buffer_size).map_err(|source| InputError::Read {
                path: path.to_path_buf(),
                source,
            })?
        };
        return Ok(words);
    }

    let content = if is_stdin {
        read_stdin()?
    } else {
        read_file(path)?
    };
    Ok(count_with(&content, options))
}

fn open_file(path: &Path) -> Result<File, InputError> {
    File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<Vec<u8>, InputError> {
    let mut file = open_file(path)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = content.len(), "read file");
    Ok(content)
}

fn read_stdin() -> Result<Vec<u8>, InputError> {
    let mut content = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut content)
        .map_err(InputError::Stdin)?;
    Ok(content)
}
