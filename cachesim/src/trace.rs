//! Address traces.
//!
//! A trace is a sequence of records, each a 32-bit big-endian address,
//! with no header.

// Imports
use {
	anyhow::Context,
	byteorder::{BigEndian, ReadBytesExt, WriteBytesExt},
	std::io,
};

/// Size of each record, in bytes
pub const RECORD_SIZE: usize = 4;

/// Trace reader
#[derive(Clone, Debug)]
pub struct TraceReader<R> {
	/// Records remaining
	records_remaining: u64,

	/// Reader
	reader: R,
}

impl<R: io::Read + io::Seek> TraceReader<R> {
	/// Creates a trace reader from the current position of `reader` until its end.
	///
	/// # Errors
	/// Returns an error if the remaining stream isn't made of whole records.
	pub fn from_reader(mut reader: R) -> Result<Self, anyhow::Error> {
		let start = reader.stream_position().context("Unable to get stream position")?;
		let end = reader
			.seek(io::SeekFrom::End(0))
			.context("Unable to seek to end of stream")?;
		reader
			.seek(io::SeekFrom::Start(start))
			.context("Unable to seek back to start of trace")?;

		let total_size = end.saturating_sub(start);
		let record_size = RECORD_SIZE as u64;
		anyhow::ensure!(
			total_size % record_size == 0,
			"Trace size ({total_size}) isn't a multiple of the record size ({record_size})"
		);

		let records = total_size / record_size;
		tracing::debug!(records, "Opened trace");

		Ok(Self {
			records_remaining: records,
			reader,
		})
	}
}

impl<R: io::Read> TraceReader<R> {
	/// Reads the next address
	pub fn read_next(&mut self) -> Result<Option<u32>, anyhow::Error> {
		// If we're done, return `None`
		if self.records_remaining == 0 {
			return Ok(None);
		}

		// Else parse the next record and reduce the remaining records
		let address = self
			.reader
			.read_u32::<BigEndian>()
			.context("Unable to read record")?;
		self.records_remaining -= 1;

		Ok(Some(address))
	}

	/// Returns the remaining records
	pub fn records_remaining(&self) -> u64 {
		self.records_remaining
	}
}

/// Trace writer
#[derive(Clone, Debug)]
pub struct TraceWriter<W> {
	/// Records written
	records_written: u64,

	/// Writer
	writer: W,
}

impl<W: io::Write> TraceWriter<W> {
	/// Creates a new writer
	pub fn new(writer: W) -> Self {
		Self {
			records_written: 0,
			writer,
		}
	}

	/// Writes an address
	pub fn write(&mut self, address: u32) -> Result<(), anyhow::Error> {
		self.writer
			.write_u32::<BigEndian>(address)
			.context("Unable to write record")?;

		self.records_written += 1;
		Ok(())
	}

	/// Returns the number of records written
	pub fn records_written(&self) -> u64 {
		self.records_written
	}

	/// Finishes writing, flushing the writer and returning it
	pub fn finish(mut self) -> Result<W, anyhow::Error> {
		self.writer.flush().context("Unable to flush writer")?;

		Ok(self.writer)
	}
}
