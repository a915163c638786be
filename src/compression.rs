use crate::{Error, InvalidArgument};

/// Compression settings applied to every block of a grid.
///
/// When `active` is false the codec frames each block as `[u32 size][data]` and
/// `block_size` / `level` are ignored. When it is true the data is split into
/// `block_size` chunks that are zlib compressed independently at `level` (0-9, where 0
/// is fastest and 9 gives the best ratio).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compression {
    pub active: bool,
    pub block_size: u32,
    pub level: u8,
}

impl Compression {
    /// Disables compression.
    pub const NONE: Compression = Compression {
        active: false,
        block_size: 0,
        level: 0,
    };

    /// zlib with 32 KiB blocks at level 2.
    pub const ZLIB: Compression = Compression {
        active: true,
        block_size: 32768,
        level: 2,
    };

    /// zlib compression with a custom block size and level
    pub fn zlib(block_size: u32, level: u8) -> Result<Compression, Error> {
        let compression = Compression {
            active: true,
            block_size,
            level,
        };
        compression.validate()?;
        Ok(compression)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The value of the `compressor` attribute on the `VTKFile` element, if any.
    pub fn compressor_name(&self) -> Option<&'static str> {
        if self.active {
            Some("vtkZLibDataCompressor")
        } else {
            None
        }
    }

    /// check the chunking parameters. Inactive settings are always valid.
    pub(crate) fn validate(&self) -> Result<(), InvalidArgument> {
        if !self.active {
            return Ok(());
        }
        if self.block_size == 0 {
            return Err(InvalidArgument::BlockSize);
        }
        if self.level > 9 {
            return Err(InvalidArgument::Level(self.level));
        }
        Ok(())
    }
}

impl Default for Compression {
    fn default() -> Self {
        Self::ZLIB
    }
}
