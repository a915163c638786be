use crate::codec;
use crate::{Compression, DataType, Error, InvalidArgument, Numeric};

use derive_more::{Deref, From, Into};
use num_traits::ToBytes;

/// The framed bytes of one array, exactly as they appear in the appended section.
///
/// See [`codec`](crate::codec) for the two layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From, Into)]
pub struct EncodedBlock(Vec<u8>);

impl EncodedBlock {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A named, typed and encoded array ready to be written.
///
/// A component count of `0` marks a structural array (connectivity, offsets, types) and
/// suppresses the `NumberOfComponents` attribute when the block is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    data_type: DataType,
    name: String,
    components: u32,
    compressed: bool,
    payload: EncodedBlock,
}

impl DataBlock {
    /// Encode `elements` into a new block.
    ///
    /// Fails without encoding anything if `components` is non-zero and does not divide the
    /// number of elements.
    pub fn build<T: Numeric>(
        name: impl Into<String>,
        elements: &[T],
        components: u32,
        compression: &Compression,
    ) -> Result<DataBlock, Error> {
        if components != 0 && elements.len() % components as usize != 0 {
            return Err(InvalidArgument::ComponentMismatch {
                len: elements.len(),
                components,
            }
            .into());
        }

        let mut bytes = Vec::with_capacity(elements.len() * T::DATA_TYPE.size());
        for element in elements {
            bytes.extend_from_slice(ToBytes::to_ne_bytes(element).as_ref());
        }

        let payload = codec::encode(&bytes, compression)?;

        Ok(DataBlock {
            data_type: T::DATA_TYPE,
            name: name.into(),
            components,
            compressed: compression.is_active(),
            payload,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        data_type: DataType,
        name: &str,
        components: u32,
        payload: EncodedBlock,
    ) -> DataBlock {
        DataBlock {
            data_type,
            name: name.to_string(),
            components,
            compressed: false,
            payload,
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> u32 {
        self.components
    }

    /// whether the payload uses the chunked zlib layout
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn payload(&self) -> &EncodedBlock {
        &self.payload
    }

    /// number of bytes this block occupies in the appended section
    pub fn encoded_len(&self) -> usize {
        self.payload.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint8_block() {
        let data: Vec<u8> = vec![1, 2, 3, 4];
        let block = DataBlock::build("UInt8Data", &data, 2, &Compression::NONE).unwrap();

        assert_eq!(block.data_type(), DataType::UInt8);
        assert_eq!(block.name(), "UInt8Data");
        assert_eq!(block.components(), 2);
        assert_eq!(block.encoded_len(), 8);
        assert_eq!(&block.payload()[..4], &4u32.to_ne_bytes());
        assert_eq!(&block.payload()[4..], data.as_slice());
    }

    #[test]
    fn int16_block() {
        let data: Vec<i16> = vec![-100, 200, -300, 400];
        let block = DataBlock::build("Int16Data", &data, 2, &Compression::NONE).unwrap();

        assert_eq!(block.data_type(), DataType::Int16);
        assert_eq!(block.encoded_len(), 4 + data.len() * 2);
        assert_eq!(&block.payload()[4..6], &(-100i16).to_ne_bytes());
    }

    #[test]
    fn float_blocks() {
        let single = DataBlock::build("f", &[1.5f32, 2.5, 3.5], 1, &Compression::NONE).unwrap();
        assert_eq!(single.data_type(), DataType::Float32);
        assert_eq!(single.encoded_len(), 4 + 3 * 4);

        let double = DataBlock::build("d", &[1.5f64, 2.5], 1, &Compression::NONE).unwrap();
        assert_eq!(double.data_type(), DataType::Float64);
        assert_eq!(&double.payload()[4..12], &1.5f64.to_ne_bytes());
    }

    #[test]
    fn size_header_counts_bytes() {
        let block = DataBlock::build("", &[7u64, 8, 9], 3, &Compression::NONE).unwrap();
        assert_eq!(&block.payload()[..4], &24u32.to_ne_bytes());
    }

    #[test]
    fn component_mismatch() {
        let err = DataBlock::build("bad", &[1i32, 2, 3], 2, &Compression::NONE).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument(InvalidArgument::ComponentMismatch {
                len: 3,
                components: 2
            })
        ));
    }

    #[test]
    fn structural_blocks_skip_component_check() {
        let block = DataBlock::build("offsets", &[3i32, 7, 9], 0, &Compression::NONE).unwrap();
        assert_eq!(block.components(), 0);
        assert_eq!(block.data_type(), DataType::Int32);
    }

    #[test]
    fn compressed_block_is_framed_by_chunks() {
        let data: Vec<f32> = (0..10_000).map(|i| i as f32).collect();
        let block = DataBlock::build("big", &data, 1, &Compression::ZLIB).unwrap();

        // 40000 bytes over 32768 byte chunks
        assert_eq!(&block.payload()[..4], &2u32.to_ne_bytes());
        assert_eq!(&block.payload()[8..12], &(40_000u32 - 32_768).to_ne_bytes());
        assert!(block.encoded_len() < 40_000);
    }

    #[test]
    fn records_compression() {
        let raw = DataBlock::build("a", &[1u8], 1, &Compression::NONE).unwrap();
        assert!(!raw.is_compressed());

        let zlib = DataBlock::build("a", &[1u8], 1, &Compression::ZLIB).unwrap();
        assert!(zlib.is_compressed());
    }
}
