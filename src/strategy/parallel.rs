//! Parallel Batch Decoding
//!
//! Uses Rayon to decode many independent inputs against one shared decoder.
//! Each input still runs the ordinary sequential decode loop; only separate
//! inputs run concurrently, and results come back in input order.

use rayon::prelude::*;

use super::streaming::DecodeDriver;
use crate::error::Result;
use crate::reader::InputSource;
use crate::sax::{SaxCollector, SaxEvent, XmlWriter};

/// Decode each byte input in parallel, collecting its events
///
/// One input's failure does not affect the others.
pub fn decode_parallel(driver: &DecodeDriver, inputs: &[&[u8]]) -> Vec<Result<Vec<SaxEvent>>> {
    inputs
        .par_iter()
        .map(|bytes| {
            let mut collector = SaxCollector::new();
            driver.decode(InputSource::from_slice(bytes), &mut collector)?;
            Ok(collector.into_events())
        })
        .collect()
}

/// Decode each byte input in parallel, serialising it to XML text
pub fn decode_parallel_to_xml(driver: &DecodeDriver, inputs: &[&[u8]]) -> Vec<Result<String>> {
    inputs
        .par_iter()
        .map(|bytes| {
            let mut writer = XmlWriter::new();
            driver.decode(InputSource::from_slice(bytes), &mut writer)?;
            Ok(writer.into_string())
        })
        .collect()
}
