#![allow(dead_code)]

use miniz_oxide::inflate::decompress_to_vec_zlib;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

const APPENDED_START: &[u8] = b"<AppendedData encoding=\"raw\">\n    _";
const APPENDED_END: &[u8] = b"\n  </AppendedData>\n</VTKFile>\n";

/// attributes of one `DataArray` element
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayHeader {
    pub name: Option<String>,
    pub components: Option<u32>,
    pub data_type: String,
    pub offset: usize,
}

/// a written file split into its xml header and the raw appended bytes
#[derive(Debug)]
pub struct VtuFile {
    pub header: String,
    pub arrays: Vec<ArrayHeader>,
    pub appended: Vec<u8>,
}

impl VtuFile {
    pub fn parse(bytes: &[u8]) -> Self {
        let start = bytes
            .windows(APPENDED_START.len())
            .position(|window| window == APPENDED_START)
            .expect("no appended data section");
        assert!(bytes.ends_with(APPENDED_END), "unexpected trailer");

        let appended = bytes[start + APPENDED_START.len()..bytes.len() - APPENDED_END.len()].to_vec();

        // drop the (indented) `<AppendedData` line and close the document so the
        // header is well formed on its own
        let header = std::str::from_utf8(&bytes[..start - 2]).unwrap().to_string();
        let arrays = data_arrays(&format!("{header}</VTKFile>"));

        Self {
            header,
            arrays,
            appended,
        }
    }

    pub fn array(&self, name: &str) -> &ArrayHeader {
        self.arrays
            .iter()
            .find(|array| array.name.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("no DataArray named {name}"))
    }
}

fn data_arrays(xml: &str) -> Vec<ArrayHeader> {
    let mut reader = Reader::from_str(xml);
    let mut arrays = Vec::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Empty(element) if element.name().as_ref() == b"DataArray" => {
                let mut header = ArrayHeader {
                    name: None,
                    components: None,
                    data_type: String::new(),
                    offset: 0,
                };
                for attribute in element.attributes() {
                    let attribute = attribute.unwrap();
                    let value = std::str::from_utf8(&attribute.value).unwrap().to_string();
                    match attribute.key.as_ref() {
                        b"Name" => header.name = Some(value),
                        b"NumberOfComponents" => header.components = Some(value.parse().unwrap()),
                        b"type" => header.data_type = value,
                        b"format" => assert_eq!(value, "appended"),
                        b"offset" => header.offset = value.parse().unwrap(),
                        other => panic!("unexpected attribute {:?}", other),
                    }
                }
                arrays.push(header);
            }
            Event::Eof => break,
            _ => (),
        }
    }

    arrays
}

fn word(bytes: &[u8], idx: usize) -> usize {
    let start = idx * 4;
    u32::from_ne_bytes(bytes[start..start + 4].try_into().unwrap()) as usize
}

/// decode the block starting at `offset`, returning the raw bytes and the
/// number of bytes the block occupies
pub fn decode_block(appended: &[u8], offset: usize, compressed: bool) -> (Vec<u8>, usize) {
    let block = &appended[offset..];

    if !compressed {
        let size = word(block, 0);
        return (block[4..4 + size].to_vec(), 4 + size);
    }

    let num_blocks = word(block, 0);
    let block_size = word(block, 1);
    let last_block_size = word(block, 2);

    let mut position = 4 * (3 + num_blocks);
    let mut raw = Vec::new();
    for i in 0..num_blocks {
        let len = word(block, 3 + i);
        let chunk = decompress_to_vec_zlib(&block[position..position + len]).unwrap();

        let expected = if i + 1 == num_blocks {
            last_block_size
        } else {
            block_size
        };
        assert_eq!(chunk.len(), expected);

        raw.extend(chunk);
        position += len;
    }

    (raw, position)
}

pub fn from_ne<const N: usize, T>(bytes: &[u8], convert: fn([u8; N]) -> T) -> Vec<T> {
    bytes
        .chunks(N)
        .map(|chunk| convert(chunk.try_into().unwrap()))
        .collect()
}
