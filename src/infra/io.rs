use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

use crate::analysis::{AnalysisError, Side};

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

/// Path argument that means "read standard input"
pub const STDIN_MARKER: &str = "-";

/// Loaded document text, UTF-8 validated at load time
pub enum FileContent
{
    Mapped(Mmap),
    Buffered(String),
}

impl AsRef<str> for FileContent
{
    fn as_ref(&self) -> &str
    {
        match self
        {
            // Validated in `read_document`
            FileContent::Mapped(mmap) => std::str::from_utf8(mmap).unwrap_or(""),
            FileContent::Buffered(s) => s.as_str(),
        }
    }
}

/// Read one side of a comparison from a file path or stdin (`-`).
///
/// Files above 1 MiB are memory-mapped. Bytes that are not valid UTF-8 are
/// rejected as invalid input rather than lossily decoded.
pub fn read_document(
    path: &Path,
    which: Side,
) -> Result<FileContent>
{
    if path.as_os_str() == STDIN_MARKER
    {
        let mut bytes = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Failed to read standard input")?;
        return decode(bytes, which, "<stdin>").map(FileContent::Buffered);
    }

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

    if metadata.len() > MMAP_THRESHOLD
    {
        // Use memory mapping for large files
        let file =
            File::open(path).with_context(|| format!("Failed to open file {}", path.display()))?;

        // Safety: the map is read-only and dropped before the command returns
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to memory-map {}", path.display()))?;

        if let Err(e) = std::str::from_utf8(&mmap)
        {
            return Err(not_utf8(which, &path.display().to_string(), e.valid_up_to()).into());
        }

        Ok(FileContent::Mapped(mmap))
    }
    else
    {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))?;

        decode(bytes, which, &path.display().to_string()).map(FileContent::Buffered)
    }
}

fn decode(
    bytes: Vec<u8>,
    which: Side,
    origin: &str,
) -> Result<String>
{
    String::from_utf8(bytes).map_err(|e| {
        not_utf8(
            which,
            origin,
            e.utf8_error()
                .valid_up_to(),
        )
        .into()
    })
}

fn not_utf8(
    which: Side,
    origin: &str,
    offset: usize,
) -> AnalysisError
{
    AnalysisError::invalid_input(which, format!("{origin} is not valid UTF-8 (byte {offset})"))
}
