use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use bincode::{config, Decode, Encode};

use crate::error::Result;

/// Save to file, using Bincode.
pub fn save<T: Encode>(path: &Path, data: &T) -> Result<()> {
    let encoded: Vec<u8> = bincode::encode_to_vec(data, config::standard())?;

    let mut file = File::create(path)?;
    file.write_all(&encoded)?;
    Ok(())
}

/// Load from file, using Bincode.
pub fn load<T: Decode<()>>(path: &Path) -> Result<T> {
    let mut buffer = Vec::new();
    let mut file = File::open(path)?;
    file.read_to_end(&mut buffer)?;

    let (decoded, _len) = bincode::decode_from_slice(&buffer, config::standard())?;
    Ok(decoded)
}
