//! # Block encoding
//!
//! Every array in the appended section is framed so that a reader can recover the raw
//! bytes from the block alone. Uncompressed blocks are a single `u32` byte count followed
//! by the data:
//!
//! ```text
//! [size][data]
//! ```
//!
//! Compressed blocks split the data into chunks of `block_size` bytes (the last one may be
//! shorter), zlib compress every chunk on its own and prefix the result with a table of
//! the chunk sizes:
//!
//! ```text
//! [#blocks][block size][last block size][compressed size 1]...[compressed size #blocks][data]
//! ```
//!
//! `last block size` is the uncompressed length of the trailing partial chunk, or
//! `block size` when every chunk is full. All header words are `u32` in native byte order.

use crate::block::EncodedBlock;
use crate::{Compression, CompressionFailed, Error, InvalidArgument};

use miniz_oxide::deflate::core::{
    compress, create_comp_flags_from_zip_params, CompressorOxide, TDEFLFlush, TDEFLStatus,
};

/// spare room kept at the end of the output buffer before handing it back to the deflater
const MIN_OUTPUT_SPACE: usize = 64;

/// Encode raw bytes into a single block according to `compression`.
///
/// Without compression this only fails for inputs longer than `u32::MAX` bytes, which
/// cannot be described by the header. With compression it additionally fails for invalid
/// settings or when the deflater reports an error for one of the chunks.
pub fn encode(bytes: &[u8], compression: &Compression) -> Result<EncodedBlock, Error> {
    let size = header_word(bytes.len(), "data block")?;

    if !compression.active {
        let mut block = Vec::with_capacity(HEADER_WORD + bytes.len());
        block.extend_from_slice(&size.to_ne_bytes());
        block.extend_from_slice(bytes);

        tracing::trace!(raw = bytes.len(), encoded = block.len(), "encoded uncompressed block");
        return Ok(EncodedBlock::from(block));
    }

    compression.validate()?;

    let block_size = compression.block_size as usize;
    let num_blocks = bytes.chunks(block_size).len();
    let last_block_size = match bytes.len() % block_size {
        0 => compression.block_size,
        partial => header_word(partial, "partial block")?,
    };

    let mut header = Vec::with_capacity(HEADER_WORD * (3 + num_blocks));
    header.extend_from_slice(&header_word(num_blocks, "block count")?.to_ne_bytes());
    header.extend_from_slice(&compression.block_size.to_ne_bytes());
    header.extend_from_slice(&last_block_size.to_ne_bytes());

    let flags = create_comp_flags_from_zip_params(i32::from(compression.level), 1, 0);
    let mut compressor = CompressorOxide::new(flags);
    let mut data = Vec::new();

    for (index, chunk) in bytes.chunks(block_size).enumerate() {
        let compressed = deflate_chunk(&mut compressor, chunk)
            .map_err(|status| CompressionFailed::new(index, chunk.len(), status as i32))?;

        header.extend_from_slice(&header_word(compressed.len(), "compressed block")?.to_ne_bytes());
        data.extend_from_slice(&compressed);
    }

    header.extend_from_slice(&data);

    tracing::trace!(
        raw = bytes.len(),
        encoded = header.len(),
        blocks = num_blocks,
        level = compression.level,
        "encoded compressed block"
    );

    Ok(EncodedBlock::from(header))
}

const HEADER_WORD: usize = std::mem::size_of::<u32>();

fn header_word(value: usize, what: &'static str) -> Result<u32, InvalidArgument> {
    u32::try_from(value).map_err(|_| InvalidArgument::Overflow {
        what,
        size: value as u64,
    })
}

/// compress one chunk into a complete zlib stream
fn deflate_chunk(compressor: &mut CompressorOxide, mut input: &[u8]) -> Result<Vec<u8>, TDEFLStatus> {
    compressor.reset();

    let mut output = vec![0; std::cmp::max(input.len() / 2, MIN_OUTPUT_SPACE)];
    let mut written = 0;

    loop {
        let (status, consumed, produced) = compress(
            compressor,
            input,
            &mut output[written..],
            TDEFLFlush::Finish,
        );
        written += produced;

        match status {
            TDEFLStatus::Done => {
                output.truncate(written);
                return Ok(output);
            }
            TDEFLStatus::Okay => {
                input = &input[consumed..];
                if output.len() - written < MIN_OUTPUT_SPACE {
                    let len = output.len();
                    output.resize(len * 2, 0);
                }
            }
            failed => return Err(failed),
        }
    }
}
