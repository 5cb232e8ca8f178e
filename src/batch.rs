// MotionStream — Batch Buffer
//
// Fixed-capacity, ordered collection of wire-form sample records. Records are
// serialized on append; the buffer never grows past its capacity because the
// sampler drains it in the same step that fills the last slot.

use crate::sample::SampleRecord;

pub struct SampleBatch {
    records: Vec<String>,
    capacity: usize,
}

impl SampleBatch {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Serialize one record into its wire form and store it in order.
    ///
    /// The caller must drain a full buffer before appending again.
    pub fn append(&mut self, record: &SampleRecord) -> anyhow::Result<()> {
        debug_assert!(self.records.len() < self.capacity, "append into full batch");
        let wire = serde_json::to_string(record)?;
        self.records.push(wire);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hand over the buffered records in acquisition order and reset to empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::replace(&mut self.records, Vec::with_capacity(self.capacity))
    }
}
