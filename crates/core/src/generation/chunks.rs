/// Concatenates streamed reply fragments in delivery order.
///
/// The stream is finite and read once; nothing is parsed until `finish`.
#[derive(Debug, Default, Clone)]
pub struct ChunkAccumulator {
    text: String,
    chunks: usize,
}

impl ChunkAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.chunks += 1;
    }

    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.text
    }
}
