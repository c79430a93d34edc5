use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use crate::error::InputError;

/// Checks that `path` is a non-empty regular file and returns its length.
pub fn sanity_check<P: AsRef<Path>>(path: P) -> Result<u64, InputError> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(InputError::NotAFile(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(InputError::Empty(path.to_path_buf()));
    }
    Ok(metadata.len())
}

/// Maps the whole input file read-only.
pub fn map_input<P: AsRef<Path>>(path: P) -> Result<Mmap, InputError> {
    let path = path.as_ref();
    sanity_check(path)?;

    let io_error = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(io_error)?;

    Ok(mmap)
}
