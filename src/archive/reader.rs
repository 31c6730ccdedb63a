//! Low-level ZIP archive reading.
//!
//! ZIP files are read from the end: find the End of Central Directory
//! record, walk the Central Directory for entry metadata, then locate each
//! entry's data past its Local File Header. The postal-code archives are
//! small, so the whole file is held in memory and parsed in place.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use anyhow::{Result, bail};
use flate2::read::DeflateDecoder;

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: usize = 65535;

/// ZIP archive held in memory.
pub struct ZipArchive<'a> {
    data: &'a [u8],
}

impl<'a> ZipArchive<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// The EOCD sits at the end of the archive; when a ZIP comment follows
    /// it, the signature is searched backwards within the maximum comment
    /// window.
    fn find_eocd(&self) -> Result<EndOfCentralDirectory> {
        // Common case: no comment, EOCD is the file's last 22 bytes.
        if self.data.len() >= EndOfCentralDirectory::SIZE {
            let offset = self.data.len() - EndOfCentralDirectory::SIZE;
            let tail = &self.data[offset..];
            if &tail[0..4] == EndOfCentralDirectory::SIGNATURE {
                let eocd = EndOfCentralDirectory::from_bytes(tail)?;
                if eocd.comment_len == 0 {
                    return Ok(eocd);
                }
            }
        }

        let search_start = self
            .data
            .len()
            .saturating_sub(MAX_COMMENT_SIZE + EndOfCentralDirectory::SIZE);
        let window = &self.data[search_start..];

        for i in (0..window.len().saturating_sub(EndOfCentralDirectory::SIZE)).rev() {
            if &window[i..i + 4] == EndOfCentralDirectory::SIGNATURE {
                // Candidate EOCD: the comment length must account for every
                // byte that follows the record.
                let eocd =
                    EndOfCentralDirectory::from_bytes(&window[i..i + EndOfCentralDirectory::SIZE])?;
                if eocd.comment_len as usize == window.len() - i - EndOfCentralDirectory::SIZE {
                    return Ok(eocd);
                }
            }
        }

        bail!("not a valid ZIP file")
    }

    /// List all entries in the archive by walking the Central Directory.
    pub fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        let eocd = self.find_eocd()?;
        if eocd.is_zip64() {
            bail!("ZIP64 archives are not supported");
        }

        let cd_offset = eocd.cd_offset as usize;
        let cd_size = eocd.cd_size as usize;
        let Some(cd_end) = cd_offset.checked_add(cd_size) else {
            bail!("central directory size overflows");
        };
        if cd_end > self.data.len() {
            bail!("central directory lies outside the archive");
        }

        let cd_data = &self.data[cd_offset..cd_end];
        let mut cursor = Cursor::new(cd_data);
        let mut entries = Vec::with_capacity(eocd.total_entries as usize);
        for _ in 0..eocd.total_entries {
            entries.push(parse_cdfh(&mut cursor)?);
        }

        Ok(entries)
    }

    /// Read and decompress one entry's payload.
    pub fn read(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        let data_offset = self.data_offset(entry)? as usize;
        let Some(data_end) = data_offset.checked_add(entry.compressed_size as usize) else {
            bail!("entry data size overflows");
        };
        if data_end > self.data.len() {
            bail!("entry data lies outside the archive");
        }
        let raw = &self.data[data_offset..data_end];

        match entry.compression_method {
            CompressionMethod::Stored => Ok(raw.to_vec()),
            CompressionMethod::Deflate => {
                let mut decompressed = Vec::with_capacity(entry.uncompressed_size as usize);
                DeflateDecoder::new(raw).read_to_end(&mut decompressed)?;
                Ok(decompressed)
            }
            CompressionMethod::Unknown(v) => {
                bail!("unsupported compression method: {v}")
            }
        }
    }

    /// Resolve where an entry's data begins.
    ///
    /// The Local File Header carries its own variable-length filename and
    /// extra field, which may differ from the Central Directory's copy, so
    /// the LFH has to be consulted.
    fn data_offset(&self, entry: &ArchiveEntry) -> Result<u64> {
        let lfh_offset = entry.lfh_offset as usize;
        let Some(lfh_end) = lfh_offset.checked_add(LFH_SIZE) else {
            bail!("local header offset overflows");
        };
        if lfh_end > self.data.len() {
            bail!("local header lies outside the archive");
        }
        let lfh = &self.data[lfh_offset..lfh_end];
        if &lfh[0..4] != LFH_SIGNATURE {
            bail!("invalid Local File Header");
        }

        let file_name_length = u16::from_le_bytes([lfh[26], lfh[27]]) as u64;
        let extra_field_length = u16::from_le_bytes([lfh[28], lfh[29]]) as u64;

        Ok(entry.lfh_offset + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }
}

/// Parse one Central Directory File Header and advance the cursor past it.
fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> Result<ArchiveEntry> {
    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig)?;
    if sig != CDFH_SIGNATURE {
        bail!("invalid Central Directory File Header");
    }

    let _version_made_by = cursor.read_u16::<LittleEndian>()?;
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let _flags = cursor.read_u16::<LittleEndian>()?;
    let compression_method = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
    let _crc32 = cursor.read_u32::<LittleEndian>()?;
    let compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let file_name_length = cursor.read_u16::<LittleEndian>()?;
    let extra_field_length = cursor.read_u16::<LittleEndian>()?;
    let file_comment_length = cursor.read_u16::<LittleEndian>()?;
    let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
    let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
    let _external_attrs = cursor.read_u32::<LittleEndian>()?;
    let lfh_offset = cursor.read_u32::<LittleEndian>()? as u64;

    let mut file_name_bytes = vec![0u8; file_name_length as usize];
    cursor.read_exact(&mut file_name_bytes)?;
    // Lossy conversion keeps non-UTF8 filenames readable
    let file_name = String::from_utf8_lossy(&file_name_bytes).to_string();

    // Directory entries end with '/'
    let is_directory = file_name.ends_with('/');

    // Extra field and comment are not used
    cursor.set_position(cursor.position() + extra_field_length as u64 + file_comment_length as u64);

    Ok(ArchiveEntry {
        file_name,
        compression_method: CompressionMethod::from_u16(compression_method),
        compressed_size,
        uncompressed_size,
        lfh_offset,
        is_directory,
    })
}
