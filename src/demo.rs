//! The demonstration flow
//!
//! [`run`] greets, builds and prints a small list, tears it down, performs one
//! bounded line read and one allocate-use-release cycle. Failures inside the
//! flow are logged and leave the remaining steps to run; only errors writing to
//! `output` are returned.

use crate::block::{
    fill_scoped_block, BlockAllocator, CountingAllocator, LibcAllocator, DEFAULT_BLOCK_SIZE,
    DEFAULT_PAYLOAD,
};
use crate::error::Result;
use crate::input::{ExcessPolicy, LineBuffer};
use crate::list::LinkedList;
use std::io::{BufRead, Write};

/// Line printed before anything else
pub const GREETING: &str = "Hello, world!";

/// Capacity of the line buffer, terminator included
pub const DEFAULT_LINE_CAPACITY: usize = 10;

/// Settings for the demonstration flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Line buffer capacity in bytes, terminator included
    pub line_capacity: usize,
    /// What happens to the part of a line that does not fit
    pub excess: ExcessPolicy,
    /// Size of the scoped block
    pub block_size: usize,
    /// Text copied into the scoped block
    pub payload: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            line_capacity: DEFAULT_LINE_CAPACITY,
            excess: ExcessPolicy::Keep,
            block_size: DEFAULT_BLOCK_SIZE,
            payload: DEFAULT_PAYLOAD.to_string(),
        }
    }
}

impl DemoConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// What one run of the flow observed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoReport {
    /// Every list rendering printed, in order
    pub list_lines: Vec<String>,
    /// Nodes released by the teardown
    pub nodes_released: usize,
    /// Bytes captured by the bounded read; `None` at end of stream or on error
    pub line: Option<Vec<u8>>,
    /// Payload bytes written to the block; `None` if the step failed
    pub block_written: Option<usize>,
    pub blocks_acquired: usize,
    pub blocks_released: usize,
}

/// Run the flow against the C heap
pub fn run<R, W>(config: &DemoConfig, input: &mut R, output: &mut W) -> Result<DemoReport>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    run_with(config, input, output, LibcAllocator)
}

/// Run the flow, taking the scoped block from `alloc`
pub fn run_with<R, W, A>(
    config: &DemoConfig,
    input: &mut R,
    output: &mut W,
    alloc: A,
) -> Result<DemoReport>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
    A: BlockAllocator,
{
    let mut report = DemoReport::default();

    writeln!(output, "{}", GREETING)?;

    // Allocation failures are logged by the list itself and leave it unchanged
    let mut list = LinkedList::new();
    let _ = list.insert_at_beginning(1);
    let _ = list.insert_at_beginning(2);
    let _ = list.insert_at_end(3);

    print_list(&list, output, &mut report)?;
    report.nodes_released = list.delete_list();
    print_list(&list, output, &mut report)?;

    report.line = read_line(config, input);

    let mut heap = CountingAllocator::new(alloc);
    report.block_written = fill_scoped_block(&mut heap, config.block_size, &config.payload).ok();
    report.blocks_acquired = heap.acquired();
    report.blocks_released = heap.released();
    log::info!(
        "block step: {} acquired, {} released",
        report.blocks_acquired,
        report.blocks_released
    );

    output.flush()?;
    Ok(report)
}

fn print_list<W: Write + ?Sized>(
    list: &LinkedList,
    output: &mut W,
    report: &mut DemoReport,
) -> Result<()> {
    list.print_to(output)?;
    report.list_lines.push(list.to_string());
    Ok(())
}

fn read_line<R: BufRead + ?Sized>(config: &DemoConfig, input: &mut R) -> Option<Vec<u8>> {
    let mut line = match LineBuffer::with_policy(config.line_capacity, config.excess) {
        Ok(line) => line,
        Err(err) => {
            log::error!("skipping bounded read: {}", err);
            return None;
        }
    };

    match line.read_from(input) {
        Ok(true) => {
            log::info!("read {} bytes (capacity {})", line.len(), line.capacity());
            Some(line.as_bytes().to_vec())
        }
        Ok(false) => {
            log::info!("no input available");
            None
        }
        Err(err) => {
            log::error!("bounded read failed: {}", err);
            None
        }
    }
}
